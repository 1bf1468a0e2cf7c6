#![allow(clippy::unwrap_used)]
// Setup flow tests against a wiremock backend.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use junctionrelay_core::flow::{DATA_SCHEMA, STEP_USER};
use junctionrelay_core::{
    ApiPaths, ConfigFlow, FlowResult, FormError, SetupError, TransportConfig, UserInput,
    validate_input,
};

fn input(host: &str) -> UserInput {
    UserInput { host: host.into() }
}

async fn backend(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/junctions/summary"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!([])))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn first_step_shows_empty_form() {
    let flow = ConfigFlow::default();
    match flow.step_user(None).await {
        FlowResult::ShowForm {
            step_id,
            schema,
            errors,
        } => {
            assert_eq!(step_id, STEP_USER);
            assert_eq!(schema, DATA_SCHEMA);
            assert!(errors.is_empty());
        }
        other => panic!("expected form, got {other:?}"),
    }
}

#[tokio::test]
async fn reachable_host_creates_entry() {
    let server = backend(200).await;
    let flow = ConfigFlow::default();

    match flow.step_user(Some(input(&server.uri()))).await {
        FlowResult::CreateEntry { title, data } => {
            assert_eq!(title, "JunctionRelay");
            assert_eq!(data.host.as_str(), server.uri());
        }
        other => panic!("expected entry, got {other:?}"),
    }
}

#[tokio::test]
async fn bare_host_is_saved_with_scheme() {
    let server = backend(200).await;
    let bare = server.uri().trim_start_matches("http://").to_owned();

    let validated = validate_input(&input(&bare), &ApiPaths::default(), &TransportConfig::default())
        .await
        .unwrap();

    assert_eq!(validated.host.as_str(), format!("http://{bare}"));
}

#[tokio::test]
async fn bad_status_is_cannot_connect() {
    let server = backend(500).await;
    let flow = ConfigFlow::default();

    match flow.step_user(Some(input(&server.uri()))).await {
        FlowResult::ShowForm { errors, .. } => {
            assert_eq!(errors.get("base"), Some(&FormError::CannotConnect));
            assert_eq!(FormError::CannotConnect.as_ref(), "cannot_connect");
        }
        other => panic!("expected form with error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_cannot_connect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/junctions/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let err = validate_input(&input(&server.uri()), &ApiPaths::default(), &TransportConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SetupError::CannotConnect { .. }), "got {err:?}");
}

#[tokio::test]
async fn timeout_is_cannot_connect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/junctions/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let transport = TransportConfig::default().with_timeout(Duration::from_millis(200));
    let err = validate_input(&input(&server.uri()), &ApiPaths::default(), &transport)
        .await
        .unwrap_err();
    match err {
        SetupError::CannotConnect { source, .. } => assert!(source.is_timeout()),
        other => panic!("expected CannotConnect, got {other:?}"),
    }
}

#[tokio::test]
async fn unbuildable_client_is_unknown() {
    let transport = TransportConfig::default().with_tls(junctionrelay_api::TlsMode::CustomCa(
        "/nonexistent/ca.pem".into(),
    ));
    let flow = ConfigFlow::new(ApiPaths::default(), transport);

    match flow.step_user(Some(input("relay.invalid"))).await {
        FlowResult::ShowForm { errors, .. } => {
            assert_eq!(errors.get("base"), Some(&FormError::Unknown));
        }
        other => panic!("expected form with error, got {other:?}"),
    }
}
