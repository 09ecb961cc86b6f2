//! Two-legged OAuth for APS
//!
//! Exchanges the application's client credentials for a bearer token and
//! reuses it until shortly before it expires.

use std::time::Duration;

use async_trait::async_trait;
use attrsync_domain::{ApsConfig, AttrSyncError, Result};
use reqwest::Method;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, instrument};

use super::types::{TokenRequest, TokenResponse};
use crate::http::HttpClient;

const TOKEN_PATH: &str = "/authentication/v2/token";
const TOKEN_SCOPE: &str = "data:read data:write data:create";
/// Tokens are refreshed this long before their reported expiry.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Provides bearer tokens for APS calls.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Retrieve a bearer token, refreshing it if needed.
    async fn access_token(&self) -> Result<String>;
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Client-credentials token provider with an in-memory cache.
pub struct ClientCredentialsAuth {
    http: HttpClient,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsAuth {
    pub fn new(config: &ApsConfig, http: HttpClient) -> Self {
        Self {
            http,
            token_url: format!("{}{}", config.base_url.trim_end_matches('/'), TOKEN_PATH),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            cached: Mutex::new(None),
        }
    }

    #[instrument(skip(self))]
    async fn fetch_token(&self) -> Result<CachedToken> {
        let form = TokenRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            grant_type: "client_credentials",
            scope: TOKEN_SCOPE,
        };
        let request = self.http.request(Method::POST, &self.token_url).form(&form);
        let response = self.http.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttrSyncError::Auth(format!(
                "token request rejected (HTTP {}): {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AttrSyncError::Auth(format!("invalid token response: {}", e)))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(REFRESH_MARGIN);
        info!(expires_in = token.expires_in, "Obtained APS access token");

        Ok(CachedToken { value: token.access_token, refresh_at: Instant::now() + lifetime })
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsAuth {
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
            debug!("Cached APS token is due for refresh");
        }

        let fresh = self.fetch_token().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }
}
