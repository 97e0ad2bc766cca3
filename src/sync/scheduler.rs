//! Debounced persistence scheduler.
//!
//! DESIGN
//! ======
//! Rapid local edits collapse into a single save: each `schedule` call aborts
//! the previously scheduled-but-unfired save and arms a fresh quiet-window
//! timer. When the timer fires, the save future is detached onto its own
//! task, so a later `schedule` or `cancel` only ever kills a pending timer,
//! never an in-flight write. Overlapping network saves are tolerated because
//! saves are idempotent full-state overwrites.
//!
//! A failed save is logged by the save future and not retried here; the next
//! local edit re-arms the scheduler naturally.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Coalesces bursts of save intents into one save per quiet window.
pub struct SaveScheduler {
    quiet: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SaveScheduler {
    /// Create a scheduler with the given quiet window.
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: Mutex::new(None) }
    }

    /// Arm (or re-arm) the save timer. Any previously scheduled save that has
    /// not fired yet is cancelled.
    pub fn schedule<F>(&self, save: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let quiet = self.quiet;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            // Detach: once the quiet window has elapsed the save must run to
            // completion even if the timer task is aborted afterwards.
            tokio::spawn(save);
        });

        let mut pending = self.pending.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Cancel any scheduled-but-unfired save.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SaveScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
