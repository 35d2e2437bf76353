//! Bounded exponential backoff with an injectable sleeper.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How often and how patiently an operation is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles for each further retry.
    pub initial_delay: Duration,
}

impl BackoffPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
        }
    }

    /// Delay before retry number `retry` (0-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.initial_delay.saturating_mul(factor)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_millis(1000))
    }
}

/// Suspends the current task. Tests swap in a recording implementation.
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Runs `operation` until it succeeds, fails with an error `should_retry`
/// rejects, or the policy runs out of attempts.
///
/// The closure receives the 1-based attempt number. The last error is
/// returned unchanged.
pub async fn retry_with_backoff<T, E, F, Fut, P>(
    policy: &BackoffPolicy,
    sleeper: &dyn Sleeper,
    should_retry: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && should_retry(&err) => {
                let delay = policy.delay_for(attempt - 1);
                tracing::warn!(
                    "[Backoff] Attempt {}/{} failed: {}. Retrying in {}ms",
                    attempt,
                    max_attempts,
                    err,
                    delay.as_millis()
                );
                sleeper.sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSleeper {
        slept: Mutex<Vec<Duration>>,
    }

    #[async_trait::async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }

    #[test]
    fn test_delays_double() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(8000));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        assert_eq!(BackoffPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_retries() {
        let sleeper = RecordingSleeper::default();
        let result: Result<u32, String> = retry_with_backoff(
            &BackoffPolicy::default(),
            &sleeper,
            |_| true,
            |attempt| async move {
                if attempt < 3 {
                    Err(format!("attempt {attempt}"))
                } else {
                    Ok(attempt)
                }
            },
        )
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(
            *sleeper.slept.lock().unwrap(),
            vec![Duration::from_millis(1000), Duration::from_millis(2000)]
        );
    }

    #[tokio::test]
    async fn test_non_retryable_error_stops_immediately() {
        let sleeper = RecordingSleeper::default();
        let mut calls = 0;
        let result: Result<(), String> = retry_with_backoff(
            &BackoffPolicy::default(),
            &sleeper,
            |err: &String| err.contains("429"),
            |_| {
                calls += 1;
                async { Err("500 internal".to_string()) }
            },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls, 1);
        assert!(sleeper.slept.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let sleeper = RecordingSleeper::default();
        let mut calls = 0;
        let result: Result<(), String> = retry_with_backoff(
            &BackoffPolicy::new(3, Duration::from_millis(10)),
            &sleeper,
            |_| true,
            |_| {
                calls += 1;
                async { Err("429".to_string()) }
            },
        )
        .await;

        assert_eq!(result, Err("429".to_string()));
        assert_eq!(calls, 3);
        assert_eq!(
            *sleeper.slept.lock().unwrap(),
            vec![Duration::from_millis(10), Duration::from_millis(20)]
        );
    }
}
