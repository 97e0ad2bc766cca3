//! Remote-change poller / reconciler.
//!
//! DESIGN
//! ======
//! Every tick compares the digest of the local persistable shape set against
//! the store's digest. A mismatch alone is not drift: our own debounced save
//! may simply not have landed yet. Drift is a *remote digest that moved since
//! we last observed it* — another writer changed the board — and resolves by
//! reloading the whole scene through the bootstrap loader. This is
//! deliberately last-writer-wins, not a merge; unsaved local edits are
//! discarded.
//!
//! CONCURRENCY
//! ===========
//! An atomic guard enforces at-most-one reconciliation pass at a time: a tick
//! that fires while the previous one is still awaiting the store is skipped.
//! The guard is cleared on every exit path, including store failures.

#[cfg(test)]
#[path = "reconciler_test.rs"]
mod reconciler_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::checksum::{Digest, compute_checksum};
use crate::config::SyncConfig;
use crate::net::canvas::CanvasStore;
use crate::scene::SceneModel;
use crate::sync::bootstrap;

/// What a single reconciliation pass decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A previous pass was still in flight; nothing was done.
    Skipped,
    /// Local and remote digests match; state is convergent.
    Converged,
    /// Remote digest is unchanged since last observation; the mismatch is our
    /// own unsaved local edit. No reload.
    LocalPending,
    /// A third party changed the board; the scene was reloaded from the store.
    Reloaded,
    /// The checksum fetch or the reload failed; retried on the next tick.
    Failed,
}

/// Polls the store's checksum and reloads the scene on detected drift.
pub struct Reconciler {
    board_id: String,
    config: SyncConfig,
    store: Arc<dyn CanvasStore>,
    scene: Arc<RwLock<SceneModel>>,
    last_remote: Mutex<Option<Digest>>,
    in_flight: AtomicBool,
}

impl Reconciler {
    #[must_use]
    pub fn new(
        board_id: impl Into<String>,
        config: SyncConfig,
        store: Arc<dyn CanvasStore>,
        scene: Arc<RwLock<SceneModel>>,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            config,
            store,
            scene,
            last_remote: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one reconciliation pass.
    pub async fn tick(&self) -> TickOutcome {
        // At-most-one concurrent pass. swap returns the previous value.
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!(board_id = %self.board_id, "reconcile pass already in flight; skipping tick");
            return TickOutcome::Skipped;
        }
        let outcome = self.tick_inner().await;
        self.in_flight.store(false, Ordering::SeqCst);
        outcome
    }

    async fn tick_inner(&self) -> TickOutcome {
        let local = {
            let scene = self.scene.read().await;
            compute_checksum(scene.persistable_shapes())
        };

        let remote = match self.store.checksum(&self.board_id).await {
            Ok(digest) => digest,
            Err(e) => {
                warn!(board_id = %self.board_id, error = %e, "checksum fetch failed");
                return TickOutcome::Failed;
            }
        };

        let drift = {
            let mut last = self
                .last_remote
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let drift = remote != local
                && last.as_ref().is_some_and(|previous| *previous != remote);
            // The remote digest is recorded after every tick's decision.
            *last = Some(remote.clone());
            drift
        };

        if !drift {
            return if remote == local {
                TickOutcome::Converged
            } else {
                debug!(board_id = %self.board_id, "local edits not yet persisted; no reload");
                TickOutcome::LocalPending
            };
        }

        info!(board_id = %self.board_id, remote = %remote, "remote change detected; reloading scene");
        match bootstrap::refresh(&self.scene, self.store.as_ref(), &self.board_id, &self.config).await {
            Ok(()) => TickOutcome::Reloaded,
            Err(e) => {
                warn!(board_id = %self.board_id, error = %e, "reload after drift failed");
                TickOutcome::Failed
            }
        }
    }
}

/// Spawn the polling loop. The returned handle is aborted at board teardown.
#[must_use]
pub fn spawn(reconciler: Arc<Reconciler>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first interval tick completes immediately; skip it so polling
        // starts one full interval after the board opens.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            reconciler.tick().await;
        }
    })
}
