//! Retry policy for upstream GET requests.
//!
//! Only GET is ever issued against the upstream, so every request is
//! idempotent and eligible. Eligibility is decided by status code, or by the
//! transport failing to connect or timing out.

use rand::Rng;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

/// Upstream statuses worth another attempt.
pub const RETRYABLE_STATUSES: [u16; 10] = [408, 413, 429, 500, 502, 503, 504, 521, 522, 524];

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, first one included
    pub max_attempts: u32,
    /// Delay before the first retry, doubled on every following one
    pub base_delay: Duration,
    /// Upper bound for any single wait, `Retry-After` included
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(4),
        }
    }
}

impl RetryPolicy {
    /// Wait before attempt `attempt + 1`, given the failed response headers.
    pub fn delay_for(&self, attempt: u32, headers: Option<&HeaderMap>) -> Duration {
        if let Some(secs) = headers.and_then(retry_after_secs) {
            return Duration::from_secs(secs).min(self.max_delay);
        }
        calculate_backoff(
            attempt,
            self.base_delay.as_millis() as u64,
            self.max_delay.as_millis() as u64,
        )
    }
}

pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

/// Calculate exponential backoff delay with jitter.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = base_ms.saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(max_ms);

    // 0 to 10% of the delay
    let jitter_range = capped_delay / 10;
    let jitter = if jitter_range > 0 {
        rand::rng().random_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay + jitter)
}

// Only the delta-seconds form; HTTP dates fall back to backoff.
fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
