//! Page-by-page retrieval of provider list endpoints

use crate::scanner::error::ProviderError;
use crate::scanner::provider::{decode_items, AccessToken, GitHubApi};
use serde::de::DeserializeOwned;

/// Largest page the provider accepts for `per_page`
pub const MAX_PAGE_SIZE: u32 = 100;

/// Fetch every page of `base_url` until the provider returns an empty page
///
/// Records keep page order, then in-page order. There is no page cap: an endpoint
/// that never returns an empty page is fetched forever.
pub async fn fetch_all<T: DeserializeOwned>(
    api: &dyn GitHubApi,
    base_url: &str,
    token: &AccessToken,
    page_size: u32,
) -> Result<Vec<T>, ProviderError> {
    let mut results = Vec::new();
    let mut page: u64 = 1;

    loop {
        let paged_url = format!("{}?per_page={}&page={}", base_url, page_size, page);
        let body = api.get_json(&paged_url, token).await?;
        let records: Vec<T> = decode_items(body)?;

        log::debug!("Fetched page {} of {} ({} records)", page, base_url, records.len());

        if records.is_empty() {
            return Ok(results);
        }
        results.extend(records);
        page += 1;
    }
}
