//! Retry with exponential back-off and jitter for provider calls.
//!
//! Only transient failures are retried: timeouts, connection errors, 5xx and
//! 429 responses. Everything else is returned on the first failure.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;

use crate::error::ReportError;

const MAX_DELAY_MS: u64 = 60_000;

pub(crate) fn is_retriable(err: &ReportError) -> bool {
    match err {
        ReportError::Http(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.status().is_some_and(|s| {
                    s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS
                })
        }
        ReportError::EmptyCompletion
        | ReportError::Deserialize { .. }
        | ReportError::InvalidBaseUrl { .. }
        | ReportError::Analysis(_)
        | ReportError::Config(_)
        | ReportError::Io { .. } => false,
    }
}

/// Delay before retry number `attempt` (1-based), before jitter.
fn base_delay_ms(backoff_base_ms: u64, attempt: u32) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    computed.min(MAX_DELAY_MS)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The n-th retry sleeps `backoff_base_ms × 2^(n-1)` ± 25 % jitter, capped at 60 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ReportError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ReportError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let capped = base_delay_ms(backoff_base_ms, attempt);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "provider transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
