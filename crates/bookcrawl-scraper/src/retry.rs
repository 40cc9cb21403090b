//! Fixed-delay retry for page fetches.
//!
//! The catalog is crawled politely and sequentially, so the retry policy
//! is deliberately simple: every transport-level failure — connection
//! error, timeout, non-2xx status — is retried in place after the same
//! fixed delay, up to a bounded attempt count. Exhaustion returns the
//! last error; the caller treats that as "page unavailable", never as a
//! fatal condition.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Executes `operation` up to `attempts` times total, sleeping
/// `delay_secs` between attempts. Returns the first success or the final
/// attempt's error. `attempts` is clamped to at least 1.
pub(crate) async fn retry_with_delay<T, F, Fut>(
    attempts: u32,
    delay_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let attempts = attempts.max(1);

    let mut attempt = 1u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= attempts {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    attempts,
                    delay_secs,
                    error = %err,
                    "fetch attempt failed, retrying after delay"
                );
            }
        }
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
