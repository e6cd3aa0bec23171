//! Retry with exponential backoff for read queries.
//!
//! Retries only on transport errors (connection failures, timeouts). HTTP
//! error statuses and GraphQL errors are returned to the caller untouched.
//! Mutations never go through here: a lifecycle request that reached the
//! server may have taken effect, so repeating it is not safe.

use std::time::Duration;

/// Base delay between retries (doubles each attempt: 200ms, 400ms, 800ms).
const BASE_DELAY_MS: u64 = 200;

/// Doubling stops after this many attempts (6.4s).
const MAX_BACKOFF_SHIFT: u32 = 5;

/// Delay before retry number `attempt + 1`.
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS.saturating_mul(1u64 << attempt.min(MAX_BACKOFF_SHIFT)))
}

/// Send a request, retrying up to `max_retries` times on transport errors.
///
/// The closure is called at most `max_retries + 1` times.
pub(crate) async fn retry_send<F, Fut>(
    max_retries: u32,
    f: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    for attempt in 0..max_retries {
        match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) => {
                let delay = backoff_delay(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries,
                    "review API request failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
    f().await
}
