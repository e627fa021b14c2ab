//! Rate limiting for UI work: coalescing renders and guarding manual refresh.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

pub const DEFAULT_WAIT: Duration = Duration::from_millis(300);

/// Runs only the last of a burst of calls, `wait` after the burst ends.
#[derive(Debug)]
pub struct Debouncer {
    wait: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WAIT)
    }
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self { wait, pending: Mutex::new(None) }
    }

    /// Cancel whatever is pending and schedule `f`.
    pub fn call<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let wait = self.wait;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            f().await;
        });
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(prev) = pending.replace(handle) {
            prev.abort();
        }
    }

    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(prev) = pending.take() {
            prev.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Lets a call through at most once per `limit`; extra calls are dropped.
#[derive(Debug)]
pub struct Throttler {
    limit: Duration,
    last: Mutex<Option<Instant>>,
}

impl Default for Throttler {
    fn default() -> Self {
        Self::new(DEFAULT_WAIT)
    }
}

impl Throttler {
    pub fn new(limit: Duration) -> Self {
        Self { limit, last: Mutex::new(None) }
    }

    /// Runs `f` and returns true unless the previous run is under `limit` ago.
    pub fn try_call<F: FnOnce()>(&self, f: F) -> bool {
        let now = Instant::now();
        {
            let mut last = self.last.lock().unwrap_or_else(|p| p.into_inner());
            if let Some(prev) = *last {
                if now.duration_since(prev) < self.limit {
                    return false;
                }
            }
            *last = Some(now);
        }
        f();
        true
    }
}
