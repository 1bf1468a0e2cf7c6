//! Shared configuration for JunctionRelay tools.
//!
//! TOML defaults plus persisted config entries, layered with environment
//! overrides, and translation to `junctionrelay_core::HubConfig`. The CLI
//! adds `GlobalOpts`-aware wrappers on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use junctionrelay_core::{
    ApiPaths, ConfigEntry, EntryStore, HubConfig, TlsVerification, TransportConfig, build_transport,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Connection and polling defaults applied to every entry.
    #[serde(default)]
    pub defaults: Defaults,

    /// Entries created by `setup`.
    #[serde(default)]
    pub entries: Vec<ConfigEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Seconds between refresh cycles.
    #[serde(default = "default_scan_interval")]
    pub scan_interval: u64,

    /// Prefix for the runtime junction/connection endpoints.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Path probed during setup.
    #[serde(default = "default_probe_path")]
    pub probe_path: String,

    /// Accept self-signed certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            scan_interval: default_scan_interval(),
            api_prefix: default_api_prefix(),
            probe_path: default_probe_path(),
            insecure: false,
            ca_cert: None,
        }
    }
}

fn default_timeout() -> u64 {
    10
}
fn default_scan_interval() -> u64 {
    30
}
fn default_api_prefix() -> String {
    junctionrelay_core::ApiPaths::default().prefix
}
fn default_probe_path() -> String {
    junctionrelay_core::ApiPaths::default().probe
}

impl Defaults {
    pub fn api_paths(&self) -> ApiPaths {
        ApiPaths {
            prefix: self.api_prefix.clone(),
            probe: self.probe_path.clone(),
        }
    }

    pub fn tls(&self) -> TlsVerification {
        if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.scan_interval == 0 {
            return Err(ConfigError::Validation {
                field: "scan_interval".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if !self.api_prefix.starts_with('/') {
            return Err(ConfigError::Validation {
                field: "api_prefix".into(),
                reason: format!("must start with '/', got '{}'", self.api_prefix),
            });
        }
        if !self.probe_path.starts_with('/') {
            return Err(ConfigError::Validation {
                field: "probe_path".into(),
                reason: format!("must start with '/', got '{}'", self.probe_path),
            });
        }
        Ok(())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "junctionrelay", "junctionrelay").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("junctionrelay");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path` + `JUNCTIONRELAY_*` environment variables.
///
/// Nested keys use a double underscore: `JUNCTIONRELAY_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("JUNCTIONRELAY_").split("__"));

    let config: Config = figment.extract()?;
    config.defaults.validate()?;
    debug!(path = %path.display(), entries = config.entries.len(), "loaded config");
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core ─────────────────────────────────────────────

/// Build a `HubConfig` for an entry using the file's defaults.
pub fn entry_to_hub_config(entry: &ConfigEntry, defaults: &Defaults) -> HubConfig {
    HubConfig {
        host: entry.data.host.clone(),
        paths: defaults.api_paths(),
        tls: defaults.tls(),
        timeout: Duration::from_secs(defaults.timeout),
        scan_interval: Duration::from_secs(defaults.scan_interval),
    }
}

/// Transport used by the setup flow, before any entry exists.
pub fn flow_transport(defaults: &Defaults) -> TransportConfig {
    build_transport(&defaults.tls(), Duration::from_secs(defaults.timeout))
}

// ── Entry store ─────────────────────────────────────────────────────

/// Config entries persisted in the TOML file.
///
/// Every mutation rewrites the whole file.
pub struct FileEntryStore {
    path: PathBuf,
    config: Config,
}

impl FileEntryStore {
    /// Open the store at the canonical config path.
    pub fn open() -> Result<Self, ConfigError> {
        Self::open_at(config_path())
    }

    /// Open the store at `path`; a missing file is an empty store.
    pub fn open_at(path: PathBuf) -> Result<Self, ConfigError> {
        let config = load_config_from(&path)?;
        Ok(Self { path, config })
    }
}

impl EntryStore for FileEntryStore {
    type Error = ConfigError;

    fn entries(&self) -> &[ConfigEntry] {
        &self.config.entries
    }

    fn add(&mut self, entry: ConfigEntry) -> Result<Option<ConfigEntry>, ConfigError> {
        let replaced = match self
            .config
            .entries
            .iter_mut()
            .find(|e| e.entry_id == entry.entry_id)
        {
            Some(existing) => Some(std::mem::replace(existing, entry)),
            None => {
                self.config.entries.push(entry);
                None
            }
        };
        save_config_to(&self.path, &self.config)?;
        Ok(replaced)
    }

    fn remove(&mut self, entry_id: &str) -> Result<Option<ConfigEntry>, ConfigError> {
        let Some(pos) = self.config.entries.iter().position(|e| e.entry_id == entry_id) else {
            return Ok(None);
        };
        let removed = self.config.entries.remove(pos);
        save_config_to(&self.path, &self.config)?;
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use junctionrelay_core::{EntryData, Host};
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(host: &str) -> ConfigEntry {
        ConfigEntry::new(
            "JunctionRelay",
            EntryData {
                host: Host::normalize(host),
            },
        )
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg.defaults.timeout, 10);
        assert_eq!(cfg.defaults.scan_interval, 30);
        assert_eq!(cfg.defaults.api_prefix, "/api/homeassistant");
        assert!(cfg.entries.is_empty());
    }

    #[test]
    fn reads_entries_and_defaults_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[defaults]
timeout = 5
api_prefix = "/api"

[[entries]]
entry_id = "relay.local_7180"
title = "JunctionRelay"
host = "http://relay.local:7180"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.defaults.timeout, 5);
        assert_eq!(cfg.defaults.scan_interval, 30);
        assert_eq!(cfg.entries.len(), 1);
        assert_eq!(cfg.entries[0].data.host.as_str(), "http://relay.local:7180");

        let hub = entry_to_hub_config(&cfg.entries[0], &cfg.defaults);
        assert_eq!(hub.timeout, Duration::from_secs(5));
        assert_eq!(hub.paths.prefix, "/api");
        assert_eq!(hub.paths.probe, "/api/junctions/summary");
    }

    #[test]
    fn invalid_defaults_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\napi_prefix = \"api\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api_prefix"));
    }

    #[test]
    fn relative_probe_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nprobe_path = \"api/junctions/summary\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "probe_path"));
    }

    #[test]
    fn store_add_replace_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut store = FileEntryStore::open_at(path.clone()).unwrap();
        assert_eq!(store.add(entry("relay.local")).unwrap(), None);
        assert_eq!(store.add(entry("other.local:9000")).unwrap(), None);
        // A different scheme on the same host replaces rather than duplicates.
        let replaced = store.add(entry("https://relay.local")).unwrap();
        assert_eq!(replaced.map(|e| e.data.host.to_string()), Some("http://relay.local".into()));
        assert_eq!(store.entries().len(), 2);

        let reopened = FileEntryStore::open_at(path.clone()).unwrap();
        let ids: Vec<&str> = reopened.entries().iter().map(|e| e.entry_id.as_str()).collect();
        assert_eq!(ids, vec!["relay.local", "other.local_9000"]);
        assert!(reopened.get("other.local_9000").is_some());

        let mut store = reopened;
        let removed = store.remove("relay.local").unwrap();
        assert_eq!(removed.map(|e| e.data.host.to_string()), Some("https://relay.local".into()));
        assert_eq!(store.remove("relay.local").unwrap(), None);

        let reopened = FileEntryStore::open_at(path).unwrap();
        assert_eq!(reopened.entries().len(), 1);
    }

    #[test]
    fn insecure_wins_over_ca_cert() {
        let defaults = Defaults {
            insecure: true,
            ca_cert: Some(PathBuf::from("/etc/ca.pem")),
            ..Defaults::default()
        };
        assert_eq!(defaults.tls(), TlsVerification::DangerAcceptInvalid);
    }
}
