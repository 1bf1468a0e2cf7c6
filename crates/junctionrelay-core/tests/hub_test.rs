#![allow(clippy::unwrap_used)]
// Hub discovery, refresh, and action tests against a wiremock backend.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use junctionrelay_core::{CoreError, Entity, Host, Hub, HubConfig, JunctionId};

// ── Helpers ─────────────────────────────────────────────────────────

fn ha_path(suffix: &str) -> String {
    format!("/api/homeassistant/{suffix}")
}

fn hub_for(server: &MockServer) -> Hub {
    Hub::new(HubConfig::new(Host::normalize(&server.uri()))).unwrap()
}

async fn mount_summary(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(ha_path("junctions/summary")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, id: &str, status: &str) {
    Mock::given(method("GET"))
        .and(path(ha_path(&format!("junctions/{id}"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": status })))
        .mount(server)
        .await;
}

// ── Discovery ───────────────────────────────────────────────────────

#[tokio::test]
async fn two_junctions_yield_two_entities_per_platform() {
    let server = MockServer::start().await;
    mount_summary(
        &server,
        json!([
            { "id": 1, "name": "Desk", "status": "Running" },
            { "id": 2, "name": "Shelf", "status": "Idle" },
        ]),
    )
    .await;
    mount_status(&server, "1", "Running").await;
    mount_status(&server, "2", "Idle").await;

    let mut hub = hub_for(&server);
    hub.setup().await;

    let slug = Host::normalize(&server.uri()).slug();
    let sensor_ids: Vec<String> = hub.sensors().iter().map(Entity::unique_id).collect();
    assert_eq!(
        sensor_ids,
        vec![
            format!("junctionrelay_{slug}_sensor_1"),
            format!("junctionrelay_{slug}_sensor_2"),
        ]
    );
    assert_eq!(hub.switches().len(), 2);
    assert_eq!(hub.entities().count(), 4);

    // Initial refresh ran before the entities were exposed.
    assert_eq!(hub.sensors()[0].state().as_deref(), Some("Running"));
    assert_eq!(hub.sensors()[1].icon(), "mdi:pause-circle");
    assert!(hub.switches()[0].is_on());
    assert!(!hub.switches()[1].is_on());
}

#[tokio::test]
async fn summary_error_status_creates_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ha_path("junctions/summary")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut hub = hub_for(&server);
    hub.setup().await;

    assert_eq!(hub.entities().count(), 0);
}

#[tokio::test]
async fn malformed_entries_are_skipped() {
    let server = MockServer::start().await;
    mount_summary(
        &server,
        json!([
            { "id": 1 },
            "junk",
            { "name": "no id" },
            { "id": "7", "name": "Valid" },
        ]),
    )
    .await;
    mount_status(&server, "7", "Running").await;

    let mut hub = hub_for(&server);
    hub.setup().await;

    assert_eq!(hub.sensors().len(), 1);
    assert_eq!(hub.sensors()[0].name(), "Junction Valid Status");
    assert_eq!(hub.switches().len(), 1);
}

// ── Refresh ─────────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_timeout_marks_unavailable() {
    let server = MockServer::start().await;
    mount_summary(&server, json!([{ "id": 1, "name": "Slow" }])).await;
    Mock::given(method("GET"))
        .and(path(ha_path("junctions/1")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "Running" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut config = HubConfig::new(Host::normalize(&server.uri()));
    config.timeout = Duration::from_millis(300);
    let mut hub = Hub::new(config).unwrap();
    hub.setup().await;

    let sensor = &hub.sensors()[0];
    assert!(!sensor.available());
    assert_eq!(sensor.state().as_deref(), Some("Unavailable"));
    assert!(!hub.switches()[0].available());
}

#[tokio::test]
async fn failed_switch_refresh_keeps_last_on_state() {
    let server = MockServer::start().await;
    mount_summary(&server, json!([{ "id": 5, "name": "Lamp" }])).await;
    Mock::given(method("GET"))
        .and(path(ha_path("junctions/5")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Running" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ha_path("junctions/5")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut hub = hub_for(&server);
    hub.setup_switches().await;
    assert!(hub.switches()[0].is_on());
    assert!(hub.switches()[0].available());

    hub.refresh_all().await;

    let switch = &hub.switches()[0];
    assert!(!switch.available());
    assert!(switch.is_on());
    assert_eq!(switch.state().as_deref(), Some("on"));
}

#[test]
fn zero_scan_interval_is_rejected() {
    let mut config = HubConfig::new(Host::normalize("relay.local"));
    config.scan_interval = Duration::ZERO;
    let result = Hub::new(config);
    assert!(matches!(result, Err(CoreError::Config { .. })), "expected Config error");
}

#[tokio::test]
async fn refresh_error_status_marks_unavailable() {
    let server = MockServer::start().await;
    mount_summary(&server, json!([{ "id": 4, "name": "Broken" }])).await;
    Mock::given(method("GET"))
        .and(path(ha_path("junctions/4")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut hub = hub_for(&server);
    hub.setup().await;

    assert!(!hub.sensors()[0].available());
    assert_eq!(hub.sensors()[0].state().as_deref(), Some("Unavailable"));
}

#[tokio::test]
async fn missing_status_field_is_unknown() {
    let server = MockServer::start().await;
    mount_summary(&server, json!([{ "id": 5, "name": "Quiet" }])).await;
    Mock::given(method("GET"))
        .and(path(ha_path("junctions/5")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uptime": 3 })))
        .mount(&server)
        .await;

    let mut hub = hub_for(&server);
    hub.setup().await;

    assert!(hub.sensors()[0].available());
    assert_eq!(hub.sensors()[0].state().as_deref(), Some("Unknown"));
    assert_eq!(hub.sensors()[0].icon(), "mdi:help-circle");
}

// ── Actions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn start_success_turns_switch_on() {
    let server = MockServer::start().await;
    mount_summary(&server, json!([{ "id": 3, "name": "Lamp" }])).await;
    mount_status(&server, "3", "Idle").await;
    Mock::given(method("POST"))
        .and(path(ha_path("connections/start/3")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut hub = hub_for(&server);
    hub.setup().await;
    let id = JunctionId::new("3");
    assert!(!hub.switch(&id).unwrap().is_on());

    hub.turn_on(&id).await.unwrap();

    let switch = hub.switch(&id).unwrap();
    assert!(switch.is_on());
    assert!(switch.available());
}

#[tokio::test]
async fn start_failure_leaves_state_and_marks_unavailable() {
    let server = MockServer::start().await;
    mount_summary(&server, json!([{ "id": 3, "name": "Lamp" }])).await;
    mount_status(&server, "3", "Idle").await;
    Mock::given(method("POST"))
        .and(path(ha_path("connections/start/3")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let mut hub = hub_for(&server);
    hub.setup().await;
    let id = JunctionId::new("3");

    assert!(hub.turn_on(&id).await.is_err());

    let switch = hub.switch(&id).unwrap();
    assert!(!switch.is_on());
    assert!(!switch.available());
}

#[tokio::test]
async fn stop_failure_does_not_force_off() {
    let server = MockServer::start().await;
    mount_summary(&server, json!([{ "id": 3, "name": "Lamp" }])).await;
    mount_status(&server, "3", "Running").await;
    Mock::given(method("POST"))
        .and(path(ha_path("connections/stop/3")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut hub = hub_for(&server);
    hub.setup().await;
    let id = JunctionId::new("3");

    assert!(hub.turn_off(&id).await.is_err());
    assert!(hub.switch(&id).unwrap().is_on());
    assert!(!hub.switch(&id).unwrap().available());
}

#[tokio::test]
async fn unknown_switch_is_not_found() {
    let server = MockServer::start().await;
    mount_summary(&server, json!([])).await;

    let mut hub = hub_for(&server);
    hub.setup().await;

    let err = hub.turn_on(&JunctionId::new("nope")).await.unwrap_err();
    assert!(matches!(err, junctionrelay_core::CoreError::JunctionNotFound { .. }));
}

// ── Polling ─────────────────────────────────────────────────────────

#[tokio::test]
async fn run_refreshes_until_cancelled() {
    let server = MockServer::start().await;
    mount_summary(&server, json!([{ "id": 1, "name": "Desk" }])).await;
    mount_status(&server, "1", "Running").await;

    let mut config = HubConfig::new(Host::normalize(&server.uri()));
    config.scan_interval = Duration::from_millis(20);
    let mut hub = Hub::new(config).unwrap();
    hub.setup().await;

    let cancel = CancellationToken::new();
    let stop = cancel.clone();
    let mut cycles = 0;
    hub.run(&cancel, |hub| {
        cycles += 1;
        assert!(hub.sensors()[0].available());
        if cycles == 3 {
            stop.cancel();
        }
    })
    .await;

    assert_eq!(cycles, 3);
}
