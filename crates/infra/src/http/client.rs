use std::time::Duration;

use attrsync_domain::{AttrSyncError, HttpSettings};
use reqwest::{Client as ReqwestClient, IntoUrl, Method, RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::errors::InfraError;

const USER_AGENT: &str = concat!("attrsync/", env!("CARGO_PKG_VERSION"));
const DEFAULT_BACKOFF: Duration = Duration::from_millis(200);

/// reqwest client shared by the APS adapters.
///
/// Connection failures, timeouts, 5xx and 429 responses are retried with
/// exponential backoff up to `max_attempts` tries. Any other response is
/// handed back to the caller, which owns status interpretation.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new(settings: &HttpSettings) -> Result<Self, AttrSyncError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent(USER_AGENT)
            .no_proxy()
            .build()
            .map_err(into_domain)?;

        let retry =
            RetryPolicy { max_attempts: settings.max_attempts.max(1), backoff: DEFAULT_BACKOFF };
        Ok(Self { client, retry })
    }

    /// Replace the base delay before the first retry; later retries double it.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.retry.backoff = backoff;
        self
    }

    pub fn request(&self, method: Method, url: impl IntoUrl) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Execute `builder`, retrying transient failures.
    ///
    /// The request is rebuilt for every attempt, so its body must be
    /// buffered (form, JSON, or bytes).
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, AttrSyncError> {
        let mut attempt = 1;
        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| {
                    AttrSyncError::Internal("streaming request bodies cannot be retried".into())
                })?
                .build()
                .map_err(into_domain)?;
            let (method, url) = (request.method().clone(), request.url().clone());
            let can_retry = attempt < self.retry.max_attempts;

            match self.client.execute(request).await {
                Ok(response) if can_retry && is_transient_status(response.status()) => {
                    debug!(attempt, %method, %url, status = %response.status(), "retrying HTTP request");
                }
                Ok(response) => {
                    debug!(attempt, %method, %url, status = %response.status(), "HTTP response");
                    return Ok(response);
                }
                Err(err) if can_retry && is_transient_error(&err) => {
                    debug!(attempt, %method, %url, error = %err, "retrying HTTP request");
                }
                Err(err) => return Err(into_domain(err)),
            }

            tokio::time::sleep(self.retry.delay_before(attempt + 1)).await;
            attempt += 1;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    max_attempts: usize,
    backoff: Duration,
}

impl RetryPolicy {
    /// Delay before try number `attempt` (2 for the first retry).
    fn delay_before(&self, attempt: usize) -> Duration {
        let doublings = attempt.saturating_sub(2).min(8) as u32;
        self.backoff.saturating_mul(1 << doublings)
    }
}

fn into_domain(err: reqwest::Error) -> AttrSyncError {
    InfraError::from(err).into()
}

fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

fn is_transient_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
