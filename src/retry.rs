//! Retry schedule and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use tokio::sync::Notify;

/// Attempt budget and linear backoff schedule for one logical request.
///
/// State is created fresh per request inside the client; nothing persists
/// across requests.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Never exceeded.
    pub max_attempts: usize,
    /// Base delay; the nth failure waits `n * base_delay`.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Backoff delay after the nth failure (n starts at 1).
    pub fn delay_for(&self, failures: usize) -> Duration {
        let n = u32::try_from(failures).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(n)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1_000),
        }
    }
}

/// Signals cancellation to in-flight requests.
///
/// Clones share the same state. The client observes the token before each
/// attempt and during backoff suspension; a request already on the wire is
/// not interrupted.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    #[cfg(not(target_arch = "wasm32"))]
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels every request holding a clone of this token. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        #[cfg(not(target_arch = "wasm32"))]
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn cancelled(&self) {
        loop {
            // Register before the flag check so a concurrent cancel() cannot
            // slip between them.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{CancelToken, RetryPolicy};

    #[test]
    fn delay_grows_linearly() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1_000),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2_000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(3_000));
    }

    #[test]
    fn delay_is_monotonically_non_decreasing() {
        let policy = RetryPolicy::default();
        let mut previous = Duration::ZERO;
        for failures in 1..=10 {
            let delay = policy.delay_for(failures);
            assert!(delay >= previous);
            previous = delay;
        }
    }

    #[test]
    fn delay_saturates_instead_of_overflowing() {
        let policy = RetryPolicy {
            max_attempts: usize::MAX,
            base_delay: Duration::from_secs(u64::MAX / 2),
        };
        let _ = policy.delay_for(usize::MAX);
    }

    #[test]
    fn token_starts_clear_and_latches() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
        assert!(token.clone().is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_future_resolves_after_cancel() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move {
            waiter.cancelled().await;
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();
        handle.await.expect("waiter task must finish");
    }

    #[tokio::test]
    async fn cancelled_future_resolves_immediately_when_already_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        token.cancelled().await;
    }
}
