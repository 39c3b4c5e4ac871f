use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Indicates whether an error should be retried or treated as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDisposition {
    Retry,
    Stop,
}

/// Result of running an operation under the retry policy.
#[derive(Debug)]
pub enum RetryError<E> {
    /// The error was considered fatal and should bubble up immediately.
    Fatal(E),
    /// The error was retryable, but the configured attempts were exhausted.
    AttemptsExceeded(E),
}

impl<E> RetryError<E> {
    /// Returns the last error seen, whatever the reason for giving up.
    pub fn into_inner(self) -> E {
        match self {
            RetryError::Fatal(err) | RetryError::AttemptsExceeded(err) => err,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay: Duration,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Preset for catalog calls: 5 attempts, 1s multiplier, waits clamped
    /// to the 4s..10s window (4, 4, 4, 8).
    pub fn for_upstream() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            min_delay: Duration::from_secs(4),
            max_delay: Duration::from_secs(10),
        }
    }

    /// Policy that retries without sleeping. Used by tests.
    pub fn immediate(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::ZERO,
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Executes the operation with the configured retry policy.
    pub async fn run<F, Fut, T, E, Classifier>(
        &self,
        op: F,
        classify: Classifier,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        Classifier: Fn(&E) -> RetryDisposition,
    {
        self.run_observed(op, classify, |_, _| {}).await
    }

    /// Same as [`RetryPolicy::run`], calling `on_retry` with the 1-based
    /// attempt number that failed and the delay before the next one.
    pub async fn run_observed<F, Fut, T, E, Classifier, Observer>(
        &self,
        mut op: F,
        classify: Classifier,
        on_retry: Observer,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        Classifier: Fn(&E) -> RetryDisposition,
        Observer: Fn(usize, Duration),
    {
        let mut attempt = 0;

        loop {
            match op().await {
                Ok(result) => return Ok(result),
                Err(err) => match classify(&err) {
                    RetryDisposition::Stop => return Err(RetryError::Fatal(err)),
                    RetryDisposition::Retry => {
                        if attempt + 1 >= self.max_attempts {
                            return Err(RetryError::AttemptsExceeded(err));
                        }

                        let delay = self.backoff_delay(attempt);
                        warn!(
                            attempt = attempt + 1,
                            max_attempts = self.max_attempts,
                            delay_ms = delay.as_millis() as u64,
                            "Retryable failure, backing off"
                        );
                        on_retry(attempt + 1, delay);
                        sleep(delay).await;
                        attempt += 1;
                    }
                },
            }
        }
    }

    pub fn backoff_delay(&self, attempt: usize) -> Duration {
        if self.base_delay.is_zero() && self.min_delay.is_zero() {
            return Duration::from_millis(0);
        }

        let factor = 1u128 << attempt.min(6);
        let base_ms = self.base_delay.as_millis();
        let delay_ms = base_ms.saturating_mul(factor);
        let capped = delay_ms
            .max(self.min_delay.as_millis())
            .min(self.max_delay.as_millis());
        Duration::from_millis(capped as u64)
    }
}
