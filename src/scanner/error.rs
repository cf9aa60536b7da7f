//! Scanner Error Types
//!
//! `ProviderError` is the raw failure of a single provider call. `ScanError` is the
//! stable, user-safe taxonomy that every public scanner operation returns; its
//! messages never echo provider payloads.

use strum_macros::EnumIter;

const INVALID_TOKEN: &str = "Invalid GitHub token. Please provide a valid token.";
const ORG_ACCESS_DENIED: &str =
    "Access to organizations is denied. Please check your token permissions.";
const REPO_ACCESS_DENIED: &str =
    "Access to the repository is denied. Please check your token permissions.";
const REPO_NOT_FOUND: &str = "Repository not found. Please check the owner and repository name.";
const WEBHOOK_ACCESS_DENIED: &str =
    "Unable to access repository webhooks. Please check your token permissions.";
const RATE_LIMIT_EXCEEDED: &str =
    "Github API rate limit exceeded for user. Please try again later.";
const INTERNAL: &str = "An internal error occurred. Please try again later.";

/// Domain error kinds surfaced by scan operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, thiserror::Error)]
pub enum ScanError {
    #[error("{}", INVALID_TOKEN)]
    InvalidToken,

    #[error("{}", ORG_ACCESS_DENIED)]
    OrgAccessDenied,

    #[error("{}", REPO_ACCESS_DENIED)]
    RepoAccessDenied,

    #[error("{}", REPO_NOT_FOUND)]
    RepoNotFound,

    #[error("{}", WEBHOOK_ACCESS_DENIED)]
    WebhookAccessDenied,

    #[error("{}", RATE_LIMIT_EXCEEDED)]
    RateLimitExceeded,

    #[error("{}", INTERNAL)]
    Internal,
}

impl ScanError {
    /// Fixed user-facing message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            ScanError::InvalidToken => INVALID_TOKEN,
            ScanError::OrgAccessDenied => ORG_ACCESS_DENIED,
            ScanError::RepoAccessDenied => REPO_ACCESS_DENIED,
            ScanError::RepoNotFound => REPO_NOT_FOUND,
            ScanError::WebhookAccessDenied => WEBHOOK_ACCESS_DENIED,
            ScanError::RateLimitExceeded => RATE_LIMIT_EXCEEDED,
            ScanError::Internal => INTERNAL,
        }
    }
}

impl crate::core::error_handling::ContextualError for ScanError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ScanError::Internal)
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ScanError::Internal => None,
            other => Some(other.message()),
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;

/// Failure of a single provider call, as seen after the transport gave up
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Provider answered with a non-success status
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// Request never produced a response (connect, timeout, TLS)
    #[error("Network request failed: {0}")]
    Network(String),

    /// Response body could not be decoded into the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Shared walk state became unusable after a panic in a sibling task
    #[error("{0}")]
    Synchronisation(String),
}

impl ProviderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ProviderError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether retrying the same GET could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Network(_) => true,
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            ProviderError::Decode(_) | ProviderError::Synchronisation(_) => false,
        }
    }
}
