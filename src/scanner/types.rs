//! Scanner Types
//!
//! Response documents produced by the scan operations. Field names serialize in
//! camelCase to match the query interface.

use crate::scanner::provider::GitHubRepo;
use crate::scanner::walker::TreeScan;
use serde::{Deserialize, Serialize};

/// One repository as reported by the list operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    pub name: String,
    pub owner: String,
    /// Size in KB as reported by the provider
    pub size: u64,
}

impl From<GitHubRepo> for RepositorySummary {
    fn from(repo: GitHubRepo) -> Self {
        Self {
            name: repo.name,
            owner: repo.owner.login,
            size: repo.size,
        }
    }
}

/// Result of the list operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryList {
    pub repositories: Vec<RepositorySummary>,
    pub total: usize,
}

impl From<Vec<RepositorySummary>> for RepositoryList {
    fn from(repositories: Vec<RepositorySummary>) -> Self {
        Self {
            total: repositories.len(),
            repositories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebhookName {
    pub name: String,
}

/// Result of the detail operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDetail {
    pub name: String,
    pub owner: String,
    pub size: u64,
    pub is_private: bool,
    pub file_count: usize,
    pub yml_content: Option<String>,
    pub active_webhooks: Vec<WebhookName>,
}

impl RepositoryDetail {
    /// Assemble the detail document from its three independent sub-fetches
    pub fn assemble(
        repo: GitHubRepo,
        tree: &TreeScan,
        yml_content: Option<String>,
        active_webhooks: Vec<WebhookName>,
    ) -> Self {
        Self {
            name: repo.name,
            owner: repo.owner.login,
            size: repo.size,
            is_private: repo.private,
            file_count: tree.file_count,
            yml_content,
            active_webhooks,
        }
    }
}

/// Envelope returned to callers of the detail operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryResponse {
    pub repository: Option<RepositoryDetail>,
}
