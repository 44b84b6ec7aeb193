use std::time::Duration;

use tracing::trace;

use finsdk_model::DEFAULT_FETCH_TIMEOUT_MS;

use crate::error::FetchError;

/// Result of a completed HTTP GET.
///
/// A response is returned for every completed exchange, success or not; the
/// status code stays visible so callers can tell an empty `200` body from an
/// error page. Transport failures never reach this type, they surface as
/// [`FetchError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl FetchResponse {
    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Thin wrapper over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
}

impl FetchClient {
    /// Create a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;
        Ok(Self { http })
    }

    /// Wrap a pre-configured `reqwest::Client`.
    ///
    /// Useful when the host shares one client (with consistent timeout,
    /// proxy, headers) across several components.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Perform a GET against `url`.
    pub async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        trace!(url, "issuing GET");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchResponse { status, body })
    }
}

impl Default for FetchClient {
    fn default() -> Self {
        let timeout = Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS);
        // builder construction only fails when the TLS backend is unusable;
        // fall back to the stock client rather than panic
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { http }
    }
}
