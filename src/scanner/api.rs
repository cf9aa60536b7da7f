//! Scanner API
//!
//! Public surface of the scanner system. Callers outside the scanner module
//! should import from here rather than from individual submodules.

// Core scanner management
pub use crate::scanner::gate::{GatePermit, ScanGate, DEFAULT_SCAN_SLOTS};
pub use crate::scanner::manager::{ScanSettings, ScannerManager};

// Error handling
pub use crate::scanner::error::{ProviderError, ScanError, ScanResult};

// Provider access
pub use crate::scanner::provider::{AccessToken, GitHubApi};
pub use crate::scanner::transport::{HttpTransport, DEFAULT_HTTP_TIMEOUT_SECS};
pub use crate::scanner::urls::{GitHubUrls, DEFAULT_API_URL};

// Core data types and structures
pub use crate::scanner::types::{
    RepositoryDetail, RepositoryList, RepositoryResponse, RepositorySummary, WebhookName,
};
