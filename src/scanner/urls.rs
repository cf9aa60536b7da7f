//! Provider endpoint builder

use crate::scanner::error::ProviderError;
use reqwest::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Builds GitHub REST endpoint URLs relative to a configurable API base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubUrls {
    base: String,
}

impl Default for GitHubUrls {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl GitHubUrls {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn repos(&self) -> String {
        format!("{}/user/repos", self.base)
    }

    pub fn orgs(&self) -> String {
        format!("{}/user/orgs", self.base)
    }

    pub fn repo(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}", self.base, owner, repo)
    }

    pub fn contents(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}/contents", self.base, owner, repo)
    }

    pub fn hooks(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}/hooks", self.base, owner, repo)
    }

    pub fn contents_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<String, ProviderError> {
        join_path(&self.contents(owner, repo), path)
    }
}

/// Append a repository path below `base`, one percent-encoded segment per path component
///
/// Repository paths may contain `#`, `?`, `%` or spaces, which must not leak into
/// the fragment, the query or an escape sequence.
pub fn join_path(base: &str, path: &str) -> Result<String, ProviderError> {
    let mut url = Url::parse(base)
        .map_err(|e| ProviderError::Decode(format!("Invalid API URL {}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| ProviderError::Decode(format!("API URL cannot take a path: {}", base)))?
        .pop_if_empty()
        .extend(path.split('/'));
    Ok(url.into())
}
