//! Provider seam
//!
//! The scanner talks to the hosting provider only through [`GitHubApi`], so the
//! engine can run against the real HTTP transport or an in-process fake.

use crate::scanner::error::ProviderError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Deserialize;
use std::fmt;

/// Personal access token used to authenticate provider calls
///
/// Debug and Display never reveal the secret, so a token can be passed to
/// logging macros without leaking.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw secret, only for building the Authorization header
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Authenticated JSON GET against the provider
#[async_trait::async_trait]
pub trait GitHubApi: Send + Sync {
    /// Fetch `url` and return the decoded JSON body of a successful response
    async fn get_json(
        &self,
        url: &str,
        token: &AccessToken,
    ) -> Result<serde_json::Value, ProviderError>;
}

/// Repository record as returned by `/repos/{owner}/{repo}` and `/user/repos`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    pub owner: GitHubOwner,
    #[serde(default)]
    pub private: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
}

/// Kind of node in a contents listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    #[serde(other)]
    Other,
}

/// One entry of a `/contents` directory listing
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

/// Single file fetched through `/contents/{path}`
#[derive(Debug, Clone, Deserialize)]
pub struct FileContent {
    pub content: Option<String>,
    pub encoding: Option<String>,
}

impl FileContent {
    /// Decoded text of a base64-encoded file; `None` for any other encoding or an empty body
    ///
    /// The provider wraps base64 at 60 columns, so whitespace is stripped first.
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn decode_text(&self) -> Result<Option<String>, ProviderError> {
        let content = match (self.content.as_deref(), self.encoding.as_deref()) {
            (Some(content), Some("base64")) if !content.is_empty() => content,
            _ => return Ok(None),
        };

        let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = BASE64
            .decode(compact)
            .map_err(|e| ProviderError::Decode(format!("Invalid base64 content: {}", e)))?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubWebhook {
    pub name: String,
    #[serde(default)]
    pub active: bool,
}

/// Decode a JSON array body into records; any other body shape counts as no items
pub fn decode_items<T: serde::de::DeserializeOwned>(
    body: serde_json::Value,
) -> Result<Vec<T>, ProviderError> {
    match body {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|e| ProviderError::Decode(e.to_string()))
            })
            .collect(),
        _ => Ok(Vec::new()),
    }
}
