// ── Start/stop switch ──
//
// Each action is one POST whose result directly sets local state; the
// next refresh corrects any drift from the backend.

use chrono::{DateTime, Utc};
use junctionrelay_api::{Error as ApiError, JunctionClient, JunctionStatus};
use tracing::{error, info};

use super::{Entity, EntityCategory, EntityKind, JunctionRef};
use crate::discovery;
use crate::error::CoreError;

/// Which backend command a switch action maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Start,
    Stop,
}

/// On/off control over a junction's connections.
#[derive(Debug, Clone)]
pub struct JunctionSwitch {
    junction: JunctionRef,
    is_on: bool,
    available: bool,
    last_updated: Option<DateTime<Utc>>,
}

impl JunctionSwitch {
    pub fn new(junction: JunctionRef) -> Self {
        Self {
            junction,
            is_on: false,
            available: true,
            last_updated: None,
        }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// `GET {prefix}/junctions/{id}` and derive on/off from `status`.
    pub async fn update(&mut self, client: &JunctionClient) {
        match discovery::refresh(client, &self.junction, EntityKind::Switch).await {
            Ok(status) => self.apply_status(&status),
            Err(_) => self.available = false,
        }
    }

    /// On iff the lower-cased status equals `running`.
    pub fn apply_status(&mut self, status: &JunctionStatus) {
        self.is_on = status
            .status
            .as_deref()
            .is_some_and(|s| s.to_lowercase() == "running");
        self.available = true;
        self.last_updated = Some(Utc::now());
    }

    /// `POST {prefix}/connections/start/{id}`
    ///
    /// Success turns the switch on. Failure marks it unavailable and
    /// leaves the on-state untouched. Local state is updated before the
    /// result is returned.
    pub async fn turn_on(&mut self, client: &JunctionClient) -> Result<(), CoreError> {
        let result = client.start_connection(&self.junction.id).await;
        self.apply_action(Action::Start, result)
    }

    /// `POST {prefix}/connections/stop/{id}`
    pub async fn turn_off(&mut self, client: &JunctionClient) -> Result<(), CoreError> {
        let result = client.stop_connection(&self.junction.id).await;
        self.apply_action(Action::Stop, result)
    }

    fn apply_action(&mut self, action: Action, result: Result<(), ApiError>) -> Result<(), CoreError> {
        let verb = match action {
            Action::Start => "start",
            Action::Stop => "stop",
        };
        let id = &self.junction.id;

        match result {
            Ok(()) => {
                self.is_on = action == Action::Start;
                self.available = true;
                self.last_updated = Some(Utc::now());
                info!(name = %self.junction.name, %id, "{verb} junction succeeded");
                Ok(())
            }
            Err(e) => {
                match &e {
                    ApiError::Status { status, body } => {
                        error!(%id, status, response = %body, "failed to {verb} junction");
                    }
                    other => error!(%id, error = %other, "error trying to {verb} junction"),
                }
                self.available = false;
                Err(e.into())
            }
        }
    }
}

impl Entity for JunctionSwitch {
    fn kind(&self) -> EntityKind {
        EntityKind::Switch
    }

    fn junction(&self) -> &JunctionRef {
        &self.junction
    }

    fn name(&self) -> String {
        format!("Junction {} Control", self.junction.name)
    }

    fn state(&self) -> Option<String> {
        Some(if self.is_on { "on" } else { "off" }.into())
    }

    fn available(&self) -> bool {
        self.available
    }

    fn icon(&self) -> &'static str {
        if self.is_on {
            "mdi:electric-switch"
        } else {
            "mdi:electric-switch-closed"
        }
    }

    fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    fn entity_category(&self) -> Option<EntityCategory> {
        Some(EntityCategory::Config)
    }
}
