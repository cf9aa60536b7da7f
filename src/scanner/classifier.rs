//! Provider failure classification
//!
//! Translates a [`ProviderError`] into exactly one [`ScanError`]. The 403 outcome
//! depends on which call failed, so callers pass the kind to use for it.

use crate::scanner::error::{ProviderError, ScanError};
use std::fmt;

const RATE_LIMIT_MARKER: &str = "rate limit exceeded";

/// Where a provider call was made, for diagnostics of internal failures
#[derive(Debug, Clone, Copy, Default)]
pub struct CallContext<'a> {
    pub operation: &'a str,
    pub owner: Option<&'a str>,
    pub name: Option<&'a str>,
    pub path: Option<&'a str>,
}

impl<'a> CallContext<'a> {
    pub fn new(operation: &'a str) -> Self {
        Self {
            operation,
            ..Default::default()
        }
    }

    pub fn repository(mut self, owner: &'a str, name: &'a str) -> Self {
        self.owner = Some(owner);
        self.name = Some(name);
        self
    }

    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }
}

impl fmt::Display for CallContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation: {}", self.operation)?;
        if let Some(owner) = self.owner {
            write!(f, ", owner: {}", owner)?;
        }
        if let Some(name) = self.name {
            write!(f, ", name: {}", name)?;
        }
        if let Some(path) = self.path {
            write!(f, ", path: {}", path)?;
        }
        Ok(())
    }
}

/// Whether the provider reported that the caller's rate limit is exhausted
pub fn is_rate_limited(failure: &ProviderError) -> bool {
    failure
        .message()
        .is_some_and(|message| message.to_lowercase().contains(RATE_LIMIT_MARKER))
}

/// Map a failed provider call to a domain error
///
/// Rules, first match wins: rate-limit message, 401, 403 (`on_forbidden`), 404,
/// anything else is `Internal` and logged with `context`.
pub fn classify(
    failure: &ProviderError,
    on_forbidden: ScanError,
    context: CallContext<'_>,
) -> ScanError {
    if is_rate_limited(failure) {
        log::debug!("Rate limit reported by provider ({}): {}", context, failure);
        return ScanError::RateLimitExceeded;
    }

    match failure.status() {
        Some(401) => ScanError::InvalidToken,
        Some(403) => on_forbidden,
        Some(404) => ScanError::RepoNotFound,
        _ => {
            log::error!("Unexpected provider failure ({}): {}", context, failure);
            ScanError::Internal
        }
    }
}
