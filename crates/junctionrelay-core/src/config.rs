// ── Runtime connection configuration ──
//
// Describes how to reach one JunctionRelay backend. Never touches disk:
// the config crate or the CLI builds a `HubConfig` and hands it in.

use std::time::Duration;

use junctionrelay_api::{ApiPaths, TlsMode, TransportConfig, DEFAULT_TIMEOUT};

use crate::host::Host;

/// Default interval between refresh cycles.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(30);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed backends).
    DangerAcceptInvalid,
}

/// Configuration for polling a single backend.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Normalized backend address.
    pub host: Host,
    /// Endpoint layout.
    pub paths: ApiPaths,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Time between refresh cycles in [`Hub::run`](crate::Hub::run).
    pub scan_interval: Duration,
}

impl HubConfig {
    pub fn new(host: Host) -> Self {
        Self {
            host,
            paths: ApiPaths::default(),
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }

    pub fn transport(&self) -> TransportConfig {
        build_transport(&self.tls, self.timeout)
    }
}

/// Transport for a TLS strategy and timeout, for callers without a `HubConfig`.
pub fn build_transport(tls: &TlsVerification, timeout: Duration) -> TransportConfig {
    let tls = match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };
    TransportConfig { tls, timeout }
}
