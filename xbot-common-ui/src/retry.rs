//! One retry abstraction shared by the poller (timeouts only, one extra try)
//! and the control dispatcher (any failure, two extra tries).

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;
use xbot_common::Error;

/// Wait between attempts. Constant only: the backend is a local process and
/// the retry counts are tiny.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    None,
    Constant(Duration),
}

impl Backoff {
    pub fn delay(&self, _attempt: u32) -> Duration {
        match self {
            Backoff::None => Duration::ZERO,
            Backoff::Constant(d) => *d,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Never less than 1.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self { max_attempts, backoff }
    }

    /// Policy for control commands: 1 initial + 2 retries, 1 s apart.
    pub const fn control() -> Self {
        Self::new(3, Backoff::Constant(Duration::from_millis(1000)))
    }

    /// Policy for status polls: a single extra try 5 s after a timeout.
    pub const fn status_timeout() -> Self {
        Self::new(2, Backoff::Constant(Duration::from_millis(5000)))
    }

    /// Run `op` until it succeeds, the error is not `retryable`, or attempts
    /// run out. `on_failure` sees every failed attempt (1-based) before the
    /// wait, so callers can surface the error while the retry is pending.
    /// The last error is returned unchanged.
    pub async fn run<T, F, Fut, P, O>(
        &self,
        mut op: F,
        retryable: P,
        mut on_failure: O,
    ) -> Result<T, Error>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, Error>>,
        P: Fn(&Error) -> bool,
        O: FnMut(u32, &Error),
    {
        let max = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    on_failure(attempt, &err);
                    if attempt >= max || !retryable(&err) {
                        return Err(err);
                    }
                    let wait = self.backoff.delay(attempt);
                    debug!("attempt {}/{} failed ({}), retrying in {:?}", attempt, max, err, wait);
                    sleep(wait).await;
                    attempt += 1;
                }
            }
        }
    }
}
