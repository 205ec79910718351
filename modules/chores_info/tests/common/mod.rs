#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response, StatusCode},
    Router,
};
use chores_info::config::{ChoresInfoConfig, ErrorStatusPolicy};
use chores_info::ChoresInfo;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

/// Fresh in-memory database with migrations applied.
///
/// One pooled connection: every extra connection to `sqlite::memory:` would
/// open its own empty database.
pub async fn create_test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to test database");
    ChoresInfo::migrate(&db)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn create_test_module() -> ChoresInfo {
    create_test_module_with(ChoresInfoConfig::default()).await
}

pub async fn create_test_module_with(cfg: ChoresInfoConfig) -> ChoresInfo {
    ChoresInfo::with_db(create_test_db().await, cfg)
}

pub async fn create_test_router(policy: ErrorStatusPolicy) -> Router {
    let cfg = ChoresInfoConfig {
        error_status: policy,
        ..ChoresInfoConfig::default()
    };
    create_test_module_with(cfg).await.router()
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    router.clone().oneshot(req).await.unwrap()
}

pub async fn json_body(resp: Response<Body>) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

pub async fn expect_json(router: &Router, method: &str, uri: &str, body: Option<Value>, status: StatusCode) -> Value {
    let resp = send(router, method, uri, body).await;
    let actual = resp.status();
    let json = json_body(resp).await;
    assert_eq!(actual, status, "{method} {uri} -> {json}");
    json
}
