//! Retry classification and the retry executor.
//!
//! [`should_retry`] decides whether a provider error is transient.
//! [`retry_with`] runs an operation under a classification function and
//! exponential backoff, surfacing the last error once attempts run out.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::error::Error;
use crate::infrastructure::config::retry::RetryConfig;

/// Classify an error as transient (`true`) or terminal (`false`).
///
/// - Timeouts always retry.
/// - Connection errors retry on 429, 5xx, or when no status can be parsed
///   from the `"<code>: <reason>"` message; other 4xx are terminal.
/// - Anything else retries.
#[must_use]
pub fn should_retry(error: &Error) -> bool {
    match error {
        Error::Timeout(_) => true,
        Error::Connection(message) => status_from_message(message).map_or(true, retryable_status),
        Error::Http(err) if err.is_timeout() => true,
        Error::Http(err) => err
            .status()
            .map_or(true, |status| retryable_status(status.as_u16())),
        _ => true,
    }
}

fn retryable_status(code: u16) -> bool {
    code == 429 || !(400..500).contains(&code)
}

fn status_from_message(message: &str) -> Option<u16> {
    let (code, _) = message.split_once(':')?;
    code.trim().parse().ok()
}

/// Delay before retry number `attempt` (1-based).
///
/// Grows as `min_delay * multiplier^(attempt - 1)`, capped at `max_delay`.
/// With jitter the delay is drawn uniformly between `min_delay` and that value.
#[must_use]
pub fn backoff_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(64) as i32;
    let scaled = config.min_delay_ms as f64 * config.multiplier.powi(exponent);
    let capped = scaled.min(config.max_delay_ms as f64) as u64;

    let millis = if config.jitter && capped > config.min_delay_ms {
        rand::thread_rng().gen_range(config.min_delay_ms..=capped)
    } else {
        capped
    };
    Duration::from_millis(millis)
}

/// Run `op` until it succeeds, `classify` rejects its error, or the attempt
/// cap in `config` is reached. The last error is returned, never swallowed.
pub async fn retry_with<T, F, Fut, C>(
    operation: &str,
    config: &RetryConfig,
    classify: C,
    mut op: F,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
    C: Fn(&Error) -> bool,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !classify(&err) {
            debug!(operation, attempt, error = %err, "Non-retryable error");
            return Err(err);
        }
        if attempt >= max_attempts {
            error!(operation, attempts = attempt, error = %err, "Retry attempts exhausted");
            return Err(err);
        }

        let delay = backoff_delay(config, attempt);
        warn!(
            operation,
            attempt,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Request failed, retrying"
        );
        sleep(delay).await;
    }
}

/// Retry policy for provider fetches: [`should_retry`] plus configured backoff.
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    #[must_use]
    pub fn should_retry(&self, error: &Error) -> bool {
        should_retry(error)
    }

    /// Run `op` as one retryable unit.
    pub async fn execute<T, F, Fut>(&self, operation: &str, op: F) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        retry_with(operation, &self.config, should_retry, op).await
    }
}
