//! Integration tests for the greeting and health-check service.
//!
//! Most tests drive the router in-process; the `live_` tests bind an
//! ephemeral loopback port and go over real HTTP.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::DateTime;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tokio::sync::oneshot;
use tower::ServiceExt;

use pipeline_demo::api::{create_router, AppState};
use pipeline_demo::config::Config;
use pipeline_demo::server::Server;
use pipeline_demo::ServiceError;

/// Config as if no environment variables were set.
fn empty_env_config() -> Config {
    Config::from_vars(Vec::new()).expect("empty environment must parse")
}

fn loopback_config(port: u16) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port,
        ..empty_env_config()
    }
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn assert_iso_timestamp(value: &Value) {
    let ts = value.as_str().expect("timestamp must be a string");
    assert!(
        DateTime::parse_from_rfc3339(ts).is_ok(),
        "not an ISO-8601 timestamp: {ts}"
    );
}

#[tokio::test]
async fn get_root_with_no_environment() {
    let config = empty_env_config();
    let app = create_router(AppState::new(&config));

    let (status, body) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hello from CI/CD Pipeline!");
    assert_eq!(body["environment"], "development");
    assert_iso_timestamp(&body["timestamp"]);
}

#[tokio::test]
async fn get_root_reports_configured_environment() {
    let config = Config::from_vars(vec![("NODE_ENV".to_string(), "production".to_string())])
        .unwrap();
    let app = create_router(AppState::new(&config));

    let (status, body) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["environment"], "production");
}

#[tokio::test]
async fn get_health_immediately_after_start() {
    let app = create_router(AppState::new(&empty_env_config()));

    let (status, body) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    let uptime = body["uptime"].as_f64().expect("uptime must be numeric");
    assert!((0.0..60.0).contains(&uptime), "uptime = {uptime}");
    assert_iso_timestamp(&body["timestamp"]);
}

#[tokio::test]
async fn health_uptime_never_decreases() {
    let app = create_router(AppState::new(&empty_env_config()));

    let (_, first) = get_json(app.clone(), "/health").await;
    let (_, second) = get_json(app, "/health").await;

    let first = first["uptime"].as_f64().unwrap();
    let second = second["uptime"].as_f64().unwrap();
    assert!(second >= first, "{second} < {first}");
}

#[tokio::test]
async fn constructing_twice_does_not_bind() {
    let first = Server::new(loopback_config(3000), AppState::default());
    let second = Server::new(loopback_config(3000), AppState::default());

    let (status_a, _) = get_json(first.router(), "/health").await;
    let (status_b, _) = get_json(second.router(), "/health").await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
}

#[tokio::test]
async fn live_server_answers_both_routes() {
    let bound = Server::new(loopback_config(0), AppState::default())
        .bind()
        .await
        .unwrap();
    let addr = bound.local_addr();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(bound.run(async {
        stop_rx.await.ok();
    }));

    let client = reqwest::Client::new();

    let root = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(root.status(), reqwest::StatusCode::OK);
    let root: Value = root.json().await.unwrap();
    assert_eq!(root["message"], "Hello from CI/CD Pipeline!");

    let health = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), reqwest::StatusCode::OK);
    let health: Value = health.json().await.unwrap();
    assert_eq!(health["status"], "OK");

    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn live_bind_conflict_is_fatal() {
    let first = Server::new(loopback_config(0), AppState::default())
        .bind()
        .await
        .unwrap();
    let port = first.local_addr().port();

    let result = Server::new(loopback_config(port), AppState::default())
        .bind()
        .await;

    match result {
        Err(ServiceError::Bind { addr, .. }) => assert_eq!(addr.port(), port),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("second bind on port {port} succeeded"),
    }
}
