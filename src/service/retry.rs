use backon::{ConstantBuilder, Retryable};
use std::future::Future;
use std::time::Duration;

/// Fixed-delay retry budget: `max_attempts` tries in total, `delay` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn retries(&self) -> u32 {
        self.max_attempts.saturating_sub(1)
    }

    /// Upper bound on the time spent sleeping between attempts.
    pub fn total_delay(&self) -> Duration {
        self.delay * self.retries()
    }

    fn backoff(&self) -> ConstantBuilder {
        ConstantBuilder::default()
            .with_delay(self.delay)
            .with_max_times(self.retries() as usize)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(5))
    }
}

/// Run `op` until it succeeds or the policy's attempts are used up.
/// `op` receives the 1-based attempt number. The last error is returned.
///
/// Delays go through tokio's timer, so tests can run with paused time.
pub async fn retry_bounded<T, E, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    (|| {
        attempt += 1;
        op(attempt)
    })
    .retry(policy.backoff())
    .await
}
