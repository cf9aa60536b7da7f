//! Retry utility for handling transient errors in async operations
//!
//! Provides a configurable retry policy with exponential backoff. The caller decides
//! which errors are transient; anything else is surfaced on the first failure.

use std::time::Duration;
use tokio::time::sleep;

/// Configurable retry policy for async operations
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt (total attempts = max_retries + 1)
    pub max_retries: usize,
    /// Delay before the first retry; doubled for every further retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait before retry number `retry` (zero based)
    pub fn delay_for(&self, retry: usize) -> Duration {
        let factor = 1u32.checked_shl(retry as u32).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Execute an async operation, retrying failures that `is_transient` accepts
///
/// # Examples
/// ```rust
/// use reposcan::core::retry::{retry_async, RetryPolicy};
///
/// # async fn example() -> Result<String, String> {
/// let result = retry_async(
///     "fetch_repositories",
///     &RetryPolicy::default(),
///     || async { Ok::<String, String>("success".to_string()) },
///     |_error| true,
/// )
/// .await?;
/// # Ok(result)
/// # }
/// ```
pub async fn retry_async<F, T, E, Fut, P>(
    operation_name: &str,
    policy: &RetryPolicy,
    mut operation: F,
    is_transient: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let mut retry = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(error) => {
                if retry >= policy.max_retries || !is_transient(&error) {
                    return Err(error);
                }
                let delay = policy.delay_for(retry);
                log::debug!(
                    "Operation '{}' failed on attempt {}/{}, retrying in {:?}: {}",
                    operation_name,
                    retry + 1,
                    policy.max_retries + 1,
                    delay,
                    error
                );
                sleep(delay).await;
                retry += 1;
            }
        }
    }
}
