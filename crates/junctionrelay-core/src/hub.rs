// ── Hub ──
//
// Owns the client and the entities of one config entry. Sensor and
// switch platforms are set up independently, then refreshed on a fixed
// interval until cancelled.

use junctionrelay_api::{JunctionClient, JunctionId};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::HubConfig;
use crate::discovery;
use crate::entity::{Entity, EntityKind, JunctionSensor, JunctionSwitch};
use crate::error::CoreError;

/// Entities for one JunctionRelay backend.
pub struct Hub {
    config: HubConfig,
    client: JunctionClient,
    sensors: Vec<JunctionSensor>,
    switches: Vec<JunctionSwitch>,
}

impl Hub {
    /// Create a hub. Does NOT contact the backend -- call [`setup()`](Self::setup).
    ///
    /// A zero `scan_interval` is rejected.
    pub fn new(config: HubConfig) -> Result<Self, CoreError> {
        if config.scan_interval.is_zero() {
            return Err(CoreError::Config {
                message: "scan_interval must be greater than zero".into(),
            });
        }
        let client =
            JunctionClient::new(config.host.as_str(), config.paths.clone(), config.transport())?;
        Ok(Self {
            config,
            client,
            sensors: Vec::new(),
            switches: Vec::new(),
        })
    }

    pub fn client(&self) -> &JunctionClient {
        &self.client
    }

    // ── Platform setup ───────────────────────────────────────────────

    /// Set up both platforms.
    ///
    /// Each platform fetches the summary on its own; a failed fetch just
    /// leaves that platform empty. New entities get one refresh before
    /// they are exposed.
    pub async fn setup(&mut self) {
        self.setup_sensors().await;
        self.setup_switches().await;
    }

    pub async fn setup_sensors(&mut self) {
        let host = &self.config.host;
        let junctions = discovery::discover(&self.client, host, EntityKind::Sensor).await;

        let mut sensors: Vec<JunctionSensor> = junctions.into_iter().map(JunctionSensor::new).collect();
        for sensor in &mut sensors {
            sensor.update(&self.client).await;
        }
        self.sensors = sensors;
    }

    pub async fn setup_switches(&mut self) {
        let host = &self.config.host;
        let junctions = discovery::discover(&self.client, host, EntityKind::Switch).await;

        let mut switches: Vec<JunctionSwitch> = junctions.into_iter().map(JunctionSwitch::new).collect();
        for switch in &mut switches {
            switch.update(&self.client).await;
        }
        self.switches = switches;
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn sensors(&self) -> &[JunctionSensor] {
        &self.sensors
    }

    pub fn switches(&self) -> &[JunctionSwitch] {
        &self.switches
    }

    /// Every entity, sensors first.
    pub fn entities(&self) -> impl Iterator<Item = &dyn Entity> {
        self.sensors
            .iter()
            .map(|s| s as &dyn Entity)
            .chain(self.switches.iter().map(|s| s as &dyn Entity))
    }

    pub fn switch(&self, id: &JunctionId) -> Option<&JunctionSwitch> {
        self.switches.iter().find(|s| &s.junction().id == id)
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Refresh every entity once, one request at a time.
    pub async fn refresh_all(&mut self) {
        for sensor in &mut self.sensors {
            sensor.update(&self.client).await;
        }
        for switch in &mut self.switches {
            switch.update(&self.client).await;
        }
        debug!(
            sensors = self.sensors.len(),
            switches = self.switches.len(),
            "refresh cycle complete"
        );
    }

    /// Refresh on `scan_interval` until `cancel` fires.
    ///
    /// The first refresh happens one interval after the call, since
    /// [`setup()`](Self::setup) already refreshed everything. `on_refresh`
    /// runs after every cycle.
    pub async fn run<F>(&mut self, cancel: &CancellationToken, mut on_refresh: F)
    where
        F: FnMut(&Self),
    {
        let mut interval = tokio::time::interval(self.config.scan_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // First tick completes immediately.
        interval.tick().await;

        info!(interval = ?self.config.scan_interval, host = %self.config.host, "polling started");
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                _ = interval.tick() => {
                    self.refresh_all().await;
                    on_refresh(self);
                }
            }
        }
        info!(host = %self.config.host, "polling stopped");
    }

    // ── Actions ──────────────────────────────────────────────────────

    pub async fn turn_on(&mut self, id: &JunctionId) -> Result<(), CoreError> {
        let client = &self.client;
        let switch = find_switch(&mut self.switches, id)?;
        switch.turn_on(client).await
    }

    pub async fn turn_off(&mut self, id: &JunctionId) -> Result<(), CoreError> {
        let client = &self.client;
        let switch = find_switch(&mut self.switches, id)?;
        switch.turn_off(client).await
    }
}

fn find_switch<'a>(
    switches: &'a mut [JunctionSwitch],
    id: &JunctionId,
) -> Result<&'a mut JunctionSwitch, CoreError> {
    switches
        .iter_mut()
        .find(|s| &s.junction().id == id)
        .ok_or_else(|| CoreError::JunctionNotFound { id: id.to_string() })
}
