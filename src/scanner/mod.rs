//! Scanner Component
//!
//! Reads repository metadata from the GitHub REST API. The component is made of
//! small pieces that each own one concern:
//!
//! - **ScannerManager**: orchestrates the list and detail operations
//! - **Transport**: authenticated JSON GETs with bounded retries
//! - **Pagination**: drains `per_page`/`page` list endpoints
//! - **Walker**: concurrent recursive traversal of a repository's contents
//! - **Classifier**: maps provider failures to a fixed set of domain errors
//! - **Gate**: process-wide cap on concurrent detail scans

pub mod api;
pub mod classifier;
pub mod error;
pub mod gate;
pub mod manager;
pub mod pagination;
pub mod provider;
pub mod testing;
pub mod transport;
pub mod types;
pub mod urls;
pub mod walker;
pub mod webhooks;

#[cfg(test)]
mod tests;

pub use error::{ProviderError, ScanError, ScanResult};
pub use manager::{ScanSettings, ScannerManager};
