// ── Status sensor ──

use chrono::{DateTime, Utc};
use junctionrelay_api::{JunctionClient, JunctionStatus};

use super::{Entity, EntityKind, JunctionRef};
use crate::discovery;

pub const STATE_UNKNOWN: &str = "Unknown";
pub const STATE_UNAVAILABLE: &str = "Unavailable";

/// Read-only sensor reporting a junction's status string.
#[derive(Debug, Clone)]
pub struct JunctionSensor {
    junction: JunctionRef,
    state: Option<String>,
    available: bool,
    last_updated: Option<DateTime<Utc>>,
}

impl JunctionSensor {
    pub fn new(junction: JunctionRef) -> Self {
        Self {
            junction,
            state: None,
            available: true,
            last_updated: None,
        }
    }

    /// `GET {prefix}/junctions/{id}` and apply the outcome.
    pub async fn update(&mut self, client: &JunctionClient) {
        match discovery::refresh(client, &self.junction, EntityKind::Sensor).await {
            Ok(status) => self.apply_status(status),
            Err(_) => self.mark_unavailable(),
        }
    }

    /// A missing `status` field reads as `Unknown`.
    pub fn apply_status(&mut self, status: JunctionStatus) {
        self.state = Some(status.status.unwrap_or_else(|| STATE_UNKNOWN.into()));
        self.available = true;
        self.last_updated = Some(Utc::now());
    }

    pub fn mark_unavailable(&mut self) {
        self.state = Some(STATE_UNAVAILABLE.into());
        self.available = false;
    }
}

impl Entity for JunctionSensor {
    fn kind(&self) -> EntityKind {
        EntityKind::Sensor
    }

    fn junction(&self) -> &JunctionRef {
        &self.junction
    }

    fn name(&self) -> String {
        format!("Junction {} Status", self.junction.name)
    }

    fn state(&self) -> Option<String> {
        self.state.clone()
    }

    fn available(&self) -> bool {
        self.available
    }

    fn icon(&self) -> &'static str {
        match self.state.as_deref() {
            Some("Running") => "mdi:play-circle",
            Some("Idle") => "mdi:pause-circle",
            _ => "mdi:help-circle",
        }
    }

    fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use junctionrelay_api::JunctionId;

    use super::*;
    use crate::host::Host;

    fn sensor() -> JunctionSensor {
        JunctionSensor::new(JunctionRef {
            id: JunctionId::new("3"),
            name: "Desk".into(),
            host: Host::normalize("relay.local"),
        })
    }

    fn status(s: Option<&str>) -> JunctionStatus {
        JunctionStatus {
            status: s.map(str::to_owned),
            ..JunctionStatus::default()
        }
    }

    #[test]
    fn starts_available_without_state() {
        let s = sensor();
        assert!(s.available());
        assert_eq!(s.state(), None);
        assert_eq!(s.name(), "Junction Desk Status");
    }

    #[test]
    fn icon_follows_exact_status() {
        let mut s = sensor();
        s.apply_status(status(Some("Running")));
        assert_eq!(s.icon(), "mdi:play-circle");
        s.apply_status(status(Some("Idle")));
        assert_eq!(s.icon(), "mdi:pause-circle");
        s.apply_status(status(Some("running")));
        assert_eq!(s.icon(), "mdi:help-circle");
    }

    #[test]
    fn missing_status_reads_unknown() {
        let mut s = sensor();
        s.apply_status(status(None));
        assert_eq!(s.state().as_deref(), Some("Unknown"));
        assert!(s.last_updated().is_some());
    }

    #[test]
    fn failure_marks_unavailable() {
        let mut s = sensor();
        s.apply_status(status(Some("Running")));
        s.mark_unavailable();
        assert!(!s.available());
        assert_eq!(s.state().as_deref(), Some("Unavailable"));
    }

    #[test]
    fn attributes_and_device() {
        let s = sensor();
        let attrs = s.extra_state_attributes();
        assert_eq!(attrs["junction_id"], "3");
        assert_eq!(attrs["junction_name"], "Desk");
        assert_eq!(attrs["host"], "http://relay.local");
        let device = s.device_info();
        assert_eq!(device.model, "Junction Monitor");
        assert_eq!(
            device.identifiers,
            vec![(String::from("junctionrelay"), String::from("http://relay.local"))]
        );
    }
}
