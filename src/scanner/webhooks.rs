//! Active webhook listing

use crate::scanner::classifier::{classify, CallContext};
use crate::scanner::error::{ScanError, ScanResult};
use crate::scanner::provider::{decode_items, AccessToken, GitHubApi, GitHubWebhook};
use crate::scanner::types::WebhookName;
use crate::scanner::urls::GitHubUrls;

/// Names of the repository's active webhooks, in provider order
pub async fn list_active(
    api: &dyn GitHubApi,
    urls: &GitHubUrls,
    owner: &str,
    repo: &str,
    token: &AccessToken,
) -> ScanResult<Vec<WebhookName>> {
    let context = CallContext::new("list_webhooks").repository(owner, repo);

    let hooks: Vec<GitHubWebhook> = api
        .get_json(&urls.hooks(owner, repo), token)
        .await
        .and_then(decode_items::<GitHubWebhook>)
        .map_err(|failure| classify(&failure, ScanError::WebhookAccessDenied, context))?;

    Ok(hooks
        .into_iter()
        .filter(|hook| hook.active)
        .map(|hook| WebhookName { name: hook.name })
        .collect())
}
