// junctionrelay-core: Setup flow, entities, and polling between junctionrelay-api and consumers.

pub mod config;
pub mod discovery;
pub mod entity;
pub mod entry;
pub mod error;
pub mod flow;
pub mod host;
pub mod hub;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{HubConfig, TlsVerification, DEFAULT_SCAN_INTERVAL, build_transport};
pub use entity::{
    DeviceInfo, Entity, EntityCategory, EntityKind, EntitySnapshot, JunctionRef, JunctionSensor,
    JunctionSwitch, DOMAIN,
};
pub use entry::{ConfigEntry, EntryData, EntryStore};
pub use error::{CoreError, FormError, SetupError};
pub use flow::{ConfigFlow, FlowResult, UserInput, ValidatedHost, validate_input};
pub use host::Host;
pub use hub::Hub;

pub use junctionrelay_api as api;
pub use junctionrelay_api::{ApiPaths, JunctionId, TlsMode, TransportConfig};
