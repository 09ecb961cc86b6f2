//! Shared fixtures for infra integration tests.

use std::sync::Arc;
use std::time::Duration;

use attrsync_domain::{ApsConfig, HttpSettings};
use attrsync_infra::{ApsClient, ClientCredentialsAuth, HttpClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PROJECT_ID: &str = "b.project-1";
pub const DOCS_PROJECT_ID: &str = "project-1";

pub fn aps_config(server: &MockServer) -> ApsConfig {
    ApsConfig {
        base_url: server.uri(),
        client_id: "client".into(),
        client_secret: "secret".into(),
        project_id: PROJECT_ID.into(),
        root_folder_urn: "urn:root".into(),
    }
}

pub fn http_client() -> HttpClient {
    HttpClient::new(&HttpSettings { timeout_seconds: 5, max_attempts: 2 })
        .expect("http client")
        .with_backoff(Duration::from_millis(5))
}

/// APS client wired to `server`, with a real token provider.
pub fn aps_client(server: &MockServer) -> Arc<ApsClient> {
    let config = aps_config(server);
    let auth = Arc::new(ClientCredentialsAuth::new(&config, http_client()));
    Arc::new(ApsClient::new(&config, http_client(), auth))
}

/// Serve a token for every token request.
pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/authentication/v2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "token_type": "Bearer",
            "expires_in": 3599
        })))
        .mount(server)
        .await;
}

pub fn contents_path(folder_id: &str) -> String {
    format!("/data/v1/projects/{PROJECT_ID}/folders/{folder_id}/contents")
}

pub fn tip_path(item_id: &str) -> String {
    format!("/data/v1/projects/{PROJECT_ID}/items/{item_id}/tip")
}

pub fn item(id: &str, name: &str) -> Value {
    json!({ "type": "items", "id": id, "attributes": { "displayName": name } })
}

pub fn folder(id: &str, name: &str) -> Value {
    json!({ "type": "folders", "id": id, "attributes": { "displayName": name } })
}

/// Serve a single-page listing for `folder_id`.
pub async fn mount_listing(server: &MockServer, folder_id: &str, entries: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(contents_path(folder_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": entries })))
        .mount(server)
        .await;
}

pub async fn mount_tip(server: &MockServer, item_id: &str, version_id: &str) {
    Mock::given(method("GET"))
        .and(path(tip_path(item_id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "type": "versions", "id": version_id } })),
        )
        .mount(server)
        .await;
}
