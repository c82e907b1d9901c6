//! Bounded-completion handle
//!
//! Callers register the number of transactions they expect before feeding
//! orders; the engine signals one unit per finalized transaction. `wait`
//! unblocks once every registered unit has been signalled, which lets a
//! caller drain in-flight work before shutdown.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Counts outstanding transactions and wakes waiters at zero
///
/// Cloning shares the same counter. Signalling more units than were
/// registered is a caller bug; it drives the count negative and `wait`
/// returns immediately.
#[derive(Debug, Clone, Default)]
pub struct CompletionHandle {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    outstanding: AtomicI64,
    notify: Notify,
}

impl CompletionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register intent to wait for `n` more transactions
    pub fn register_expected(&self, n: u64) {
        self.inner.outstanding.fetch_add(n as i64, Ordering::AcqRel);
    }

    /// Signal completion of one transaction
    pub fn signal_one(&self) {
        if self.inner.outstanding.fetch_sub(1, Ordering::AcqRel) <= 1 {
            self.inner.notify.notify_waiters();
        }
    }

    /// Current number of outstanding transactions
    pub fn outstanding(&self) -> i64 {
        self.inner.outstanding.load(Ordering::Acquire)
    }

    /// Wait until all registered transactions have been signalled
    pub async fn wait(&self) {
        loop {
            // Arm the notification before checking, so a signal landing
            // between the check and the await is not lost.
            let notified = self.inner.notify.notified();
            if self.inner.outstanding.load(Ordering::Acquire) <= 0 {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_returns_immediately_when_nothing_registered() {
        let handle = CompletionHandle::new();
        handle.wait().await;
    }

    #[tokio::test]
    async fn test_wait_blocks_until_signalled() {
        let handle = CompletionHandle::new();
        handle.register_expected(2);

        let waiter = handle.clone();
        let task = tokio::spawn(async move { waiter.wait().await });

        handle.signal_one();
        assert!(!task.is_finished());

        handle.signal_one();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("wait should unblock after final signal")
            .unwrap();
    }

    #[tokio::test]
    async fn test_register_accumulates() {
        let handle = CompletionHandle::new();
        handle.register_expected(1);
        handle.register_expected(2);
        assert_eq!(handle.outstanding(), 3);

        handle.signal_one();
        assert_eq!(handle.outstanding(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_the_counter() {
        let handle = CompletionHandle::new();
        let clone = handle.clone();

        handle.register_expected(1);
        clone.signal_one();

        assert_eq!(handle.outstanding(), 0);
        handle.wait().await;
    }
}
