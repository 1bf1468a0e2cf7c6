// ── Entities ──
//
// Sensors and switches mirror one junction each. Both share identity,
// device grouping and attributes through the `Entity` trait; their
// refresh/action logic lives in the per-kind modules.

pub mod sensor;
pub mod switch;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use junctionrelay_api::JunctionId;
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::host::Host;

pub use sensor::JunctionSensor;
pub use switch::JunctionSwitch;

/// Integration domain, used as the unique-id prefix and device identifier namespace.
pub const DOMAIN: &str = "junctionrelay";

/// Which platform an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Sensor,
    Switch,
}

/// Host-platform entity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Config,
}

/// The junction an entity mirrors, and the backend it lives on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JunctionRef {
    pub id: JunctionId,
    pub name: String,
    pub host: Host,
}

/// Device grouping: every entity of one host hangs off one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub identifiers: Vec<(String, String)>,
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub configuration_url: String,
}

impl DeviceInfo {
    pub fn for_host(host: &Host) -> Self {
        Self {
            identifiers: vec![(DOMAIN.into(), host.to_string())],
            name: "JunctionRelay".into(),
            manufacturer: "JunctionRelay".into(),
            model: "Junction Monitor".into(),
            configuration_url: host.to_string(),
        }
    }
}

/// Common surface of sensors and switches.
pub trait Entity {
    fn kind(&self) -> EntityKind;

    fn junction(&self) -> &JunctionRef;

    /// Display name.
    fn name(&self) -> String;

    /// Rendered state string.
    fn state(&self) -> Option<String>;

    fn available(&self) -> bool;

    fn icon(&self) -> &'static str;

    /// Time of the last successful refresh or action.
    fn last_updated(&self) -> Option<DateTime<Utc>>;

    fn entity_category(&self) -> Option<EntityCategory> {
        None
    }

    /// `junctionrelay_{host slug}_{kind}_{junction id}`
    fn unique_id(&self) -> String {
        unique_id(&self.junction().host, self.kind(), &self.junction().id)
    }

    fn extra_state_attributes(&self) -> BTreeMap<&'static str, String> {
        let junction = self.junction();
        BTreeMap::from([
            ("junction_id", junction.id.to_string()),
            ("junction_name", junction.name.clone()),
            ("host", junction.host.to_string()),
        ])
    }

    fn device_info(&self) -> DeviceInfo {
        DeviceInfo::for_host(&self.junction().host)
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            unique_id: self.unique_id(),
            name: self.name(),
            kind: self.kind(),
            state: self.state(),
            available: self.available(),
            icon: self.icon(),
            entity_category: self.entity_category(),
            attributes: self.extra_state_attributes(),
            last_updated: self.last_updated(),
        }
    }
}

/// Point-in-time view of an entity, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySnapshot {
    pub unique_id: String,
    pub name: String,
    pub kind: EntityKind,
    pub state: Option<String>,
    pub available: bool,
    pub icon: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_category: Option<EntityCategory>,
    pub attributes: BTreeMap<&'static str, String>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Deterministic unique id for a (host, kind, junction) triple.
pub fn unique_id(host: &Host, kind: EntityKind, id: &JunctionId) -> String {
    format!("{DOMAIN}_{}_{kind}_{id}", host.slug())
}
