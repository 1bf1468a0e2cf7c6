//! CLI configuration: a thin wrapper around `junctionrelay_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--host, --entry, --timeout, --insecure).

use std::time::Duration;

use junctionrelay_config::{Config, Defaults, entry_to_hub_config, flow_transport};
use junctionrelay_core::{ApiPaths, ConfigEntry, Host, HubConfig, TlsVerification, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use junctionrelay_config::{FileEntryStore, config_path};

/// Load the config file, surfacing parse and validation errors.
pub fn load() -> Result<Config, CliError> {
    Ok(junctionrelay_config::load_config()?)
}

/// Pick the entry named by `--entry`, or the only stored entry.
pub fn active_entry<'a>(global: &GlobalOpts, config: &'a Config) -> Result<&'a ConfigEntry, CliError> {
    let available = || {
        config
            .entries
            .iter()
            .map(|e| e.entry_id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    if let Some(ref wanted) = global.entry {
        return config
            .entries
            .iter()
            .find(|e| &e.entry_id == wanted)
            .ok_or_else(|| CliError::EntryNotFound {
                entry_id: wanted.clone(),
                available: available(),
            });
    }

    match config.entries.as_slice() {
        [] => Err(CliError::NoEntries {
            path: config_path().display().to_string(),
        }),
        [only] => Ok(only),
        _ => Err(CliError::AmbiguousEntry {
            available: available(),
        }),
    }
}

/// Build the `HubConfig` for this invocation.
///
/// `--host` bypasses stored entries; otherwise the active entry is used.
/// Flag overrides win over config defaults either way.
pub fn resolve_hub_config(global: &GlobalOpts, config: &Config) -> Result<HubConfig, CliError> {
    let mut hub = match global.host {
        Some(ref host) => {
            let entry = ConfigEntry::new(
                junctionrelay_core::flow::ENTRY_TITLE,
                junctionrelay_core::EntryData {
                    host: Host::normalize(host),
                },
            );
            entry_to_hub_config(&entry, &config.defaults)
        }
        None => entry_to_hub_config(active_entry(global, config)?, &config.defaults),
    };

    if global.insecure {
        hub.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        hub.timeout = timeout_from_flag(secs)?;
    }
    Ok(hub)
}

/// Paths and transport for the setup flow.
pub fn flow_settings(global: &GlobalOpts, defaults: &Defaults) -> Result<(ApiPaths, TransportConfig), CliError> {
    let mut transport = flow_transport(defaults);
    if global.insecure {
        transport.tls = junctionrelay_core::TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        transport.timeout = timeout_from_flag(secs)?;
    }
    Ok((defaults.api_paths(), transport))
}

fn timeout_from_flag(secs: u64) -> Result<Duration, CliError> {
    if secs == 0 {
        return Err(CliError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}
