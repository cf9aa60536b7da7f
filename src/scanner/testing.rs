//! In-process fake provider for tests
//!
//! `FakeGitHub` answers GETs from a table of canned responses keyed by full URL,
//! can delay individual URLs, and records how it was called. Unknown URLs answer
//! 404 like the real API.

use crate::scanner::error::ProviderError;
use crate::scanner::provider::{AccessToken, GitHubApi};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Route {
    Json(serde_json::Value),
    Fail { status: u16, message: String },
}

/// Canned-response implementation of [`GitHubApi`]
#[derive(Debug, Default)]
pub struct FakeGitHub {
    routes: HashMap<String, Route>,
    delays: HashMap<String, Duration>,
    accepted_token: Option<String>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with a 200 and `body`
    pub fn respond(mut self, url: &str, body: serde_json::Value) -> Self {
        self.routes.insert(url.to_string(), Route::Json(body));
        self
    }

    /// Answer `url` with an error status and `{"message": message}`
    pub fn fail(mut self, url: &str, status: u16, message: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Fail {
                status,
                message: message.to_string(),
            },
        );
        self
    }

    /// Sleep for `delay` before answering `url`
    pub fn delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// Answer every request with 401 unless it carries this token
    pub fn require_token(mut self, token: &str) -> Self {
        self.accepted_token = Some(token.to_string());
        self
    }

    /// Total number of requests served
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of requests that were being answered at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// URLs in the order they were requested
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|requested| requested.clone())
            .unwrap_or_default()
    }

    fn answer(&self, url: &str, token: &AccessToken) -> Result<serde_json::Value, ProviderError> {
        if let Some(accepted) = &self.accepted_token {
            if token.expose() != accepted {
                return Err(ProviderError::Status {
                    status: 401,
                    message: Some("Bad credentials".to_string()),
                });
            }
        }

        match self.routes.get(url) {
            Some(Route::Json(body)) => Ok(body.clone()),
            Some(Route::Fail { status, message }) => Err(ProviderError::Status {
                status: *status,
                message: Some(message.clone()),
            }),
            None => Err(ProviderError::Status {
                status: 404,
                message: Some("Not Found".to_string()),
            }),
        }
    }
}

#[async_trait::async_trait]
impl GitHubApi for FakeGitHub {
    async fn get_json(
        &self,
        url: &str,
        token: &AccessToken,
    ) -> Result<serde_json::Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        // Always yield once so sibling requests genuinely overlap
        tokio::task::yield_now().await;
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.answer(url, token)
    }
}
