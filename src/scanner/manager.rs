//! Scanner Manager
//!
//! Composes pagination, the tree walk, webhook listing and error classification
//! into the two public scan operations. Detail scans are admitted through the
//! process-wide [`ScanGate`].

use crate::scanner::classifier::{classify, CallContext};
use crate::scanner::error::{ProviderError, ScanError, ScanResult};
use crate::scanner::gate::ScanGate;
use crate::scanner::pagination::{fetch_all, MAX_PAGE_SIZE};
use crate::scanner::provider::{AccessToken, FileContent, GitHubApi, GitHubRepo};
use crate::scanner::types::{RepositoryDetail, RepositoryList, RepositorySummary};
use crate::scanner::urls::GitHubUrls;
use crate::scanner::walker::DirectoryWalker;
use crate::scanner::webhooks;
use std::sync::Arc;

/// Tunables for scan operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// `per_page` used when paginating list endpoints
    pub page_size: u32,
    /// Optional cap on in-flight listing calls per walk (unbounded when `None`)
    pub walk_concurrency: Option<usize>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            walk_concurrency: None,
        }
    }
}

/// Entry point for repository scans
pub struct ScannerManager {
    api: Arc<dyn GitHubApi>,
    urls: GitHubUrls,
    gate: ScanGate,
    settings: ScanSettings,
}

impl ScannerManager {
    pub fn new(
        api: Arc<dyn GitHubApi>,
        urls: GitHubUrls,
        gate: ScanGate,
        settings: ScanSettings,
    ) -> Self {
        Self {
            api,
            urls,
            gate,
            settings,
        }
    }

    pub fn gate(&self) -> &ScanGate {
        &self.gate
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// List every repository visible to the token, in provider order
    pub async fn list_repositories(&self, token: &AccessToken) -> ScanResult<RepositoryList> {
        self.check_org_access(token).await?;

        let records: Vec<GitHubRepo> = fetch_all(
            self.api.as_ref(),
            &self.urls.repos(),
            token,
            self.settings.page_size,
        )
        .await
        .map_err(|failure| match failure.status() {
            Some(401) => ScanError::InvalidToken,
            _ => {
                log::error!("Error while fetching all repositories: {}", failure);
                ScanError::Internal
            }
        })?;

        log::info!("Listed {} repositories", records.len());
        Ok(records
            .into_iter()
            .map(RepositorySummary::from)
            .collect::<Vec<_>>()
            .into())
    }

    /// Full metadata for one repository
    ///
    /// Waits for a gate slot before doing any work and holds it until the scan ends,
    /// however it ends.
    pub async fn get_repository_detail(
        &self,
        token: &AccessToken,
        owner: &str,
        name: &str,
    ) -> ScanResult<RepositoryDetail> {
        let operation = format!("repository detail {}/{}", owner, name);
        let _slot = self.gate.acquire(&operation).await.ok_or_else(|| {
            log::error!("Scan gate closed while waiting ({})", operation);
            ScanError::Internal
        })?;

        self.scan_repository(token, owner, name).await
    }

    async fn check_org_access(&self, token: &AccessToken) -> ScanResult<()> {
        match self.api.get_json(&self.urls.orgs(), token).await {
            Ok(_) => Ok(()),
            Err(failure) => {
                let context = CallContext::new("check_org_access");
                Err(match classify(&failure, ScanError::OrgAccessDenied, context) {
                    // there is no repository involved in this call
                    ScanError::RepoNotFound => ScanError::OrgAccessDenied,
                    other => other,
                })
            }
        }
    }

    async fn scan_repository(
        &self,
        token: &AccessToken,
        owner: &str,
        name: &str,
    ) -> ScanResult<RepositoryDetail> {
        let api = self.api.as_ref();

        let repo: GitHubRepo = api
            .get_json(&self.urls.repo(owner, name), token)
            .await
            .and_then(|body| {
                serde_json::from_value(body).map_err(|e| ProviderError::Decode(e.to_string()))
            })
            .map_err(|failure| {
                classify(
                    &failure,
                    ScanError::RepoAccessDenied,
                    CallContext::new("fetch_repository").repository(owner, name),
                )
            })?;

        let walk = async {
            DirectoryWalker::new(api)
                .with_ceiling(self.settings.walk_concurrency)
                .walk(&self.urls.contents(owner, name), token)
                .await
                .map_err(|failure| {
                    classify(
                        &failure,
                        ScanError::RepoAccessDenied,
                        CallContext::new("walk_contents").repository(owner, name),
                    )
                })
        };
        let hooks = webhooks::list_active(api, &self.urls, owner, name, token);

        let (tree, active_webhooks) = tokio::try_join!(walk, hooks)?;

        let yml_content = match tree.first_yml_path() {
            Some(path) => self.fetch_yaml_content(token, owner, name, path).await,
            None => None,
        };

        log::info!(
            "Scanned {}/{}: {} files, {} active webhooks",
            owner,
            name,
            tree.file_count,
            active_webhooks.len()
        );
        Ok(RepositoryDetail::assemble(repo, &tree, yml_content, active_webhooks))
    }

    /// Content of the first YAML file; failures degrade to no content
    async fn fetch_yaml_content(
        &self,
        token: &AccessToken,
        owner: &str,
        name: &str,
        path: &str,
    ) -> Option<String> {
        let content = match self.urls.contents_file(owner, name, path) {
            Ok(url) => self.api.get_json(&url, token).await,
            Err(failure) => Err(failure),
        };
        let content = content
            .and_then(|body| {
                serde_json::from_value::<FileContent>(body)
                    .map_err(|e| ProviderError::Decode(e.to_string()))
            })
            .and_then(|file| file.decode_text());

        match content {
            Ok(content) => content,
            Err(failure) => {
                log::warn!(
                    "Error while fetching yaml file content ({}): {}",
                    CallContext::new("fetch_yaml_content")
                        .repository(owner, name)
                        .path(path),
                    failure
                );
                None
            }
        }
    }
}
