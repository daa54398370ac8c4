//! Backoff for generator calls.

use std::time::Duration;

use rand::Rng;

/// Jitter applied to each delay (±20%).
const JITTER_FACTOR: f64 = 0.2;

/// Exponential backoff with jitter, bounded by a retry budget.
#[derive(Debug)]
pub struct Backoff {
    attempt: u32,
    max_retries: u32,
    initial_ms: u64,
}

impl Backoff {
    /// Create a backoff allowing `max_retries` retries after the first attempt.
    #[must_use]
    pub const fn new(max_retries: u32, initial_ms: u64) -> Self {
        Self {
            attempt: 0,
            max_retries,
            initial_ms,
        }
    }

    /// Delay before the next retry, or `None` once the budget is spent.
    pub fn next_backoff(&mut self) -> Option<Duration> {
        if self.attempt >= self.max_retries {
            return None;
        }

        let base = self.initial_ms.saturating_mul(1 << self.attempt.min(16));
        self.attempt += 1;

        Some(Duration::from_millis(apply_jitter(base)))
    }

    /// Retries taken so far.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.attempt
    }
}

fn apply_jitter(backoff_ms: u64) -> u64 {
    if backoff_ms == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss)]
    let base = backoff_ms as f64;
    let range = base * JITTER_FACTOR;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let jittered = rand::rng().random_range((base - range).max(0.0)..=base + range) as u64;
    jittered
}

/// HTTP status codes worth retrying besides 5xx.
const RETRYABLE_STATUS_CODES: &[u16] = &[
    408, // Request Timeout
    429, // Too Many Requests
];

/// Check if an HTTP status code is retryable.
#[must_use]
pub fn is_retryable_status(status_code: u16) -> bool {
    (500..600).contains(&status_code) || RETRYABLE_STATUS_CODES.contains(&status_code)
}
