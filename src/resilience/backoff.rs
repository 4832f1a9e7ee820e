//! Exponential backoff with optional jitter.

use rand::Rng;
use std::time::Duration;

use crate::types::BackoffConfig;

/// Delay to wait before retry `attempt` (1-based). Attempt 0 never waits.
///
/// The nominal delay is `base * factor^(attempt-1)`, capped; jitter adds
/// 0-10% on top so synchronized retries spread out.
pub fn backoff_delay(attempt: u32, config: &BackoffConfig) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let base_ms = config.base.as_millis() as u64;
    let cap_ms = config.cap.as_millis() as u64;
    let exponent = u64::from(config.factor).saturating_pow(attempt - 1);
    let capped_ms = base_ms.saturating_mul(exponent).min(cap_ms);

    let jitter_ms = if config.jitter && capped_ms >= 10 {
        rand::thread_rng().gen_range(0..capped_ms / 10)
    } else {
        0
    };

    Duration::from_millis(capped_ms + jitter_ms)
}
