//! HTTP transport for the GitHub REST API
//!
//! Every call is an authenticated, idempotent GET. Network failures, 5xx and 429
//! responses are retried with exponential backoff; any other failure is returned
//! on the first attempt for the classifier to interpret.

use crate::core::retry::{retry_async, RetryPolicy};
use crate::scanner::error::ProviderError;
use crate::scanner::provider::{AccessToken, GitHubApi};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;

/// Default timeout for a single provider request
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// reqwest-backed [`GitHubApi`] implementation with retry
pub struct HttpTransport {
    client: Client,
    retry_policy: RetryPolicy,
}

impl HttpTransport {
    pub fn new(timeout: Duration, retry_policy: RetryPolicy) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("reposcan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            retry_policy,
        })
    }

    async fn get_once(
        &self,
        url: &str,
        token: &AccessToken,
    ) -> Result<serde_json::Value, ProviderError> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("token {}", token.expose()))
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies look like {"message": "...", "documentation_url": "..."}
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok())
                .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(String::from));

            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl GitHubApi for HttpTransport {
    async fn get_json(
        &self,
        url: &str,
        token: &AccessToken,
    ) -> Result<serde_json::Value, ProviderError> {
        retry_async(
            url,
            &self.retry_policy,
            || self.get_once(url, token),
            ProviderError::is_transient,
        )
        .await
    }
}
