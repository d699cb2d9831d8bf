//! Test helpers: build the application against a mock catalog.
//!
//! Run from workspace root: `cargo test -p tierlink-api`.

#![allow(dead_code)]

use axum_test::TestServer;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};
use tierlink_api::setup::build_app;
use tierlink_core::{Config, LogFormat};

pub const SECRET: &str = "test-shared-secret";
pub const APP_ID: &str = "test-app-id";
pub const AUTH_TOKEN: &str = "test-auth-token";
pub const EDGE_STORAGE_ID: &str = "edge-storage";
pub const OBJECT_STORAGE_ID: &str = "object-storage";
pub const ASSET_ID: &str = "asset-1";
pub const SUBCOLLECTION_ID: &str = "collection-1";

/// Test application: HTTP test server plus the mock catalog it talks to.
pub struct TestApp {
    pub server: TestServer,
    pub catalog: ServerGuard,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(catalog_url: &str) -> Config {
    Config {
        shared_secret: SECRET.to_string(),
        catalog_app_id: APP_ID.to_string(),
        catalog_api_url: catalog_url.to_string(),
        format_names: vec!["ORIGINAL".to_string(), "PPRO_PROXY".to_string()],
        edge_storage_id: None,
        object_storage_id: None,
        server_port: 0,
        environment: "test".to_string(),
        synchronous_processing: true,
        job_poll_interval_ms: 1,
        catalog_timeout_secs: 5,
        log_format: LogFormat::Compact,
    }
}

/// Setup test app in synchronous mode with a fresh mock catalog.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

pub async fn setup_test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let catalog = Server::new_async().await;
    let mut config = test_config(&catalog.url());
    configure(&mut config);

    let (_state, router) = build_app(config).unwrap();
    let server = TestServer::new(router).unwrap();

    TestApp { server, catalog }
}

/// Custom-action URL with both storage ids.
pub fn action_path(action: &str) -> String {
    format!(
        "/{}?b2_storage_id={}&ll_storage_id={}",
        action, OBJECT_STORAGE_ID, EDGE_STORAGE_ID
    )
}

/// BULK payload with one asset and one collection.
pub fn bulk_payload() -> Value {
    json!({
        "context": "BULK",
        "asset_ids": [ASSET_ID],
        "collection_ids": [SUBCOLLECTION_ID],
        "auth_token": AUTH_TOKEN,
    })
}

/// Both storages resolve.
pub async fn mock_storages(catalog: &mut ServerGuard) -> (Mock, Mock) {
    let edge = mock_storage(catalog, EDGE_STORAGE_ID, 200).await;
    let object = mock_storage(catalog, OBJECT_STORAGE_ID, 200).await;
    (edge, object)
}

pub async fn mock_storage(catalog: &mut ServerGuard, storage_id: &str, status: usize) -> Mock {
    catalog
        .mock("GET", format!("/API/files/v1/storages/{}/", storage_id).as_str())
        .match_header("app-id", APP_ID)
        .match_header("auth-token", AUTH_TOKEN)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(json!({"id": storage_id, "name": storage_id}).to_string())
        .create_async()
        .await
}

/// Bulk copy towards `storage_id`, answering with `job_id`, expected `times` times.
pub async fn mock_bulk(
    catalog: &mut ServerGuard,
    storage_id: &str,
    job_id: &str,
    times: usize,
) -> Mock {
    catalog
        .mock(
            "POST",
            format!("/API/files/v1/storages/{}/bulk/", storage_id).as_str(),
        )
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({ "job_id": job_id }).to_string())
        .expect(times)
        .create_async()
        .await
}

pub async fn mock_bulk_matching(
    catalog: &mut ServerGuard,
    storage_id: &str,
    body: Value,
    times: usize,
) -> Mock {
    catalog
        .mock(
            "POST",
            format!("/API/files/v1/storages/{}/bulk/", storage_id).as_str(),
        )
        .match_body(Matcher::PartialJson(body))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({"job_id": "job-1"}).to_string())
        .expect(times)
        .create_async()
        .await
}

pub async fn mock_job(catalog: &mut ServerGuard, job_id: &str, status: &str) -> Mock {
    catalog
        .mock("GET", format!("/API/jobs/v1/jobs/{}/", job_id).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"id": job_id, "status": status}).to_string())
        .create_async()
        .await
}
