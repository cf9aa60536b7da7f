//! Scanner Integration Test Modules

pub mod concurrency;
pub mod list_repositories;
pub mod repository_detail;
