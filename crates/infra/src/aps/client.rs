//! APS Data Management and Docs client
//!
//! Implements the remote ports used by a sync run:
//! - [`FolderBrowser`] over `GET /data/v1/projects/{p}/folders/{f}/contents`,
//!   following `links.next` pagination
//! - [`AttributeUpdater`] over the item tip lookup and the Docs
//!   `custom-attributes:batch-update` endpoint

use std::sync::Arc;

use async_trait::async_trait;
use attrsync_core::{AttributeUpdater, FolderBrowser};
use attrsync_domain::{
    ApsConfig, AttrSyncError, FolderEntry, Result, UpdatePayload, VersionRef,
};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::auth::AccessTokenProvider;
use super::types::{FolderContents, TipResponse};
use crate::http::HttpClient;

/// Upper bound on followed `links.next` pages for one folder.
const MAX_PAGES: usize = 1_000;

/// Client for the APS endpoints a sync run needs.
pub struct ApsClient {
    base_url: String,
    project_id: String,
    docs_project_id: String,
    http: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
}

impl ApsClient {
    pub fn new(config: &ApsConfig, http: HttpClient, auth: Arc<dyn AccessTokenProvider>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            docs_project_id: config.docs_project_id().to_string(),
            http,
            auth,
        }
    }

    fn contents_url(&self, folder_id: &str) -> String {
        format!("{}/data/v1/projects/{}/folders/{}/contents", self.base_url, self.project_id, folder_id)
    }

    fn tip_url(&self, item_id: &str) -> String {
        format!("{}/data/v1/projects/{}/items/{}/tip", self.base_url, self.project_id, item_id)
    }

    fn batch_update_url(&self, version: &VersionRef) -> String {
        format!(
            "{}/bim360/docs/v1/projects/{}/versions/{}/custom-attributes:batch-update",
            self.base_url,
            self.docs_project_id,
            urlencoding::encode(version.as_str())
        )
    }

    async fn authorized_get(&self, url: &str) -> Result<Response> {
        let token = self.auth.access_token().await?;
        let request = self.http.request(Method::GET, url).bearer_auth(token);
        self.http.send(request).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| AttrSyncError::InvalidInput(format!("unexpected {} response: {}", what, e)))
}

#[async_trait]
impl FolderBrowser for ApsClient {
    #[instrument(skip(self))]
    async fn list_children(&self, folder_id: &str) -> Result<Vec<FolderEntry>> {
        let mut entries = Vec::new();
        let mut next_url = Some(self.contents_url(folder_id));
        let mut pages = 0;

        while let Some(url) = next_url.take() {
            pages += 1;
            if pages > MAX_PAGES {
                return Err(AttrSyncError::Traversal(format!(
                    "folder {} exceeded {} pages",
                    folder_id, MAX_PAGES
                )));
            }

            let response = self.authorized_get(&url).await?;
            let status = response.status();
            if status != StatusCode::OK {
                return Err(AttrSyncError::Traversal(format!(
                    "listing folder {} failed: HTTP {}",
                    folder_id,
                    status.as_u16()
                )));
            }

            let page: FolderContents = read_json(response, "folder contents").await?;
            next_url = page.next_page().map(str::to_string);
            entries.extend(page.data.into_iter().map(FolderEntry::from));
        }

        debug!(count = entries.len(), pages, "Listed folder");
        Ok(entries)
    }
}

#[async_trait]
impl AttributeUpdater for ApsClient {
    #[instrument(skip(self))]
    async fn resolve_current_version(&self, file_id: &str) -> Result<VersionRef> {
        let response = self.authorized_get(&self.tip_url(file_id)).await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(AttrSyncError::VersionResolution(format!(
                "tip lookup for {} failed: HTTP {}",
                file_id,
                status.as_u16()
            )));
        }

        let tip: TipResponse = read_json(response, "item tip").await?;
        Ok(VersionRef(tip.data.id))
    }

    #[instrument(skip(self, payload), fields(attributes = payload.len()))]
    async fn apply_attributes(&self, version: &VersionRef, payload: &UpdatePayload) -> Result<()> {
        let token = self.auth.access_token().await?;
        let request = self
            .http
            .request(Method::POST, self.batch_update_url(version))
            .bearer_auth(token)
            .json(payload);

        let response = self.http.send(request).await?;
        match response.status() {
            StatusCode::OK => Ok(()),
            status => {
                let body = response.text().await.unwrap_or_default();
                debug!(status = status.as_u16(), body = %body, "Batch update rejected");
                Err(AttrSyncError::Update(format!("Status {}", status.as_u16())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use attrsync_domain::HttpSettings;

    use super::*;

    struct StaticToken;

    #[async_trait]
    impl AccessTokenProvider for StaticToken {
        async fn access_token(&self) -> Result<String> {
            Ok("token".into())
        }
    }

    fn client(project_id: &str) -> ApsClient {
        let config = ApsConfig {
            base_url: "https://aps.example.com/".into(),
            client_id: "id".into(),
            client_secret: "secret".into(),
            project_id: project_id.into(),
            root_folder_urn: "urn:root".into(),
        };
        let http = HttpClient::new(&HttpSettings::default()).unwrap();
        ApsClient::new(&config, http, Arc::new(StaticToken))
    }

    #[test]
    fn data_management_urls_keep_the_b_prefix() {
        let client = client("b.123");
        assert_eq!(
            client.contents_url("urn:adsk.wipprod:fs.folder:co.x"),
            "https://aps.example.com/data/v1/projects/b.123/folders/urn:adsk.wipprod:fs.folder:co.x/contents"
        );
        assert_eq!(
            client.tip_url("urn:adsk.wipprod:dm.lineage:abc"),
            "https://aps.example.com/data/v1/projects/b.123/items/urn:adsk.wipprod:dm.lineage:abc/tip"
        );
    }

    #[test]
    fn batch_update_url_strips_prefix_and_encodes_version() {
        let client = client("b.123");
        let version = VersionRef("urn:adsk.wipprod:fs.file:vf.abc?version=2".into());
        assert_eq!(
            client.batch_update_url(&version),
            "https://aps.example.com/bim360/docs/v1/projects/123/versions/urn%3Aadsk.wipprod%3Afs.file%3Avf.abc%3Fversion%3D2/custom-attributes:batch-update"
        );
    }
}
