//! Sync engine — session object tying the sync components together.
//!
//! DESIGN
//! ======
//! One `SyncEngine` per open board view. It owns the scene, the debounced
//! save scheduler, the reconciler, and the poll task handle, and is handed
//! its identity explicitly through a [`Session`] — no ambient globals or
//! storage-derived identifiers.
//!
//! Lifecycle: `open` bootstraps the scene from the store (tolerating a
//! provisioning race) and starts the checksum poller; `close` aborts the
//! poller and cancels any pending debounce timer. In-flight network calls are
//! not cancelled; they run to harmless completion.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::sync::{Arc, Mutex};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::SyncConfig;
use crate::net::StoreError;
use crate::net::canvas::CanvasStore;
use crate::scene::SceneModel;
use crate::sync::reconciler::Reconciler;
use crate::sync::scheduler::SaveScheduler;
use crate::sync::{bootstrap, reconciler};

/// Identity context for one board view: which board, acting as whom.
#[derive(Debug, Clone)]
pub struct Session {
    pub board_id: String,
    pub user_id: String,
}

/// Per-board sync engine. See module docs for lifecycle.
pub struct SyncEngine {
    session: Session,
    config: SyncConfig,
    scene: Arc<RwLock<SceneModel>>,
    store: Arc<dyn CanvasStore>,
    scheduler: SaveScheduler,
    reconciler: Arc<Reconciler>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl SyncEngine {
    /// Build an engine for one board view. No I/O happens until [`open`].
    ///
    /// [`open`]: SyncEngine::open
    #[must_use]
    pub fn new(session: Session, config: SyncConfig, store: Arc<dyn CanvasStore>) -> Self {
        let scene = Arc::new(RwLock::new(SceneModel::new()));
        let reconciler = Arc::new(Reconciler::new(
            session.board_id.clone(),
            config,
            Arc::clone(&store),
            Arc::clone(&scene),
        ));
        Self {
            session,
            config,
            scene,
            store,
            scheduler: SaveScheduler::new(config.debounce()),
            reconciler,
            poll_task: Mutex::new(None),
        }
    }

    /// Shared handle to the scene model.
    #[must_use]
    pub fn scene(&self) -> Arc<RwLock<SceneModel>> {
        Arc::clone(&self.scene)
    }

    /// Bootstrap the scene from the store and start the checksum poller.
    ///
    /// # Errors
    ///
    /// Propagates the bootstrap failure; the poller is not started in that
    /// case.
    pub async fn open(&self) -> Result<(), StoreError> {
        bootstrap::refresh(&self.scene, self.store.as_ref(), &self.session.board_id, &self.config)
            .await?;
        let handle = reconciler::spawn(Arc::clone(&self.reconciler), self.config.poll_interval());
        let mut poll_task = self
            .poll_task
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = poll_task.replace(handle) {
            previous.abort();
        }
        debug!(board_id = %self.session.board_id, "board opened");
        Ok(())
    }

    /// Apply a local mutation under the scene lock, then arm the debounced
    /// save.
    pub async fn edit<F>(&self, mutate: F)
    where
        F: FnOnce(&mut SceneModel),
    {
        {
            let mut scene = self.scene.write().await;
            mutate(&mut scene);
        }
        self.schedule_save();
    }

    /// Arm the debounced save without mutating the scene.
    pub fn schedule_save(&self) {
        let store = Arc::clone(&self.store);
        let scene = Arc::clone(&self.scene);
        let session = self.session.clone();
        self.scheduler.schedule(async move {
            if let Err(e) = push_board_state(&*store, &scene, &session).await {
                warn!(board_id = %session.board_id, error = %e, "debounced save failed");
            }
        });
    }

    /// Save immediately, bypassing the debounce window.
    ///
    /// # Errors
    ///
    /// Propagates the store failure. No retry; the next edit re-arms the
    /// scheduler.
    pub async fn save_now(&self) -> Result<(), StoreError> {
        push_board_state(self.store.as_ref(), &self.scene, &self.session).await
    }

    /// One manual reconciliation pass (the poller does this on its own).
    pub async fn reconcile(&self) -> reconciler::TickOutcome {
        self.reconciler.tick().await
    }

    /// Stop the poller and drop any pending debounce timer.
    pub fn close(&self) {
        let mut poll_task = self
            .poll_task
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(handle) = poll_task.take() {
            handle.abort();
        }
        self.scheduler.cancel();
        debug!(board_id = %self.session.board_id, "board closed");
    }
}

impl Drop for SyncEngine {
    fn drop(&mut self) {
        self.close();
    }
}

/// Snapshot the scene under the read lock, then push the full state.
async fn push_board_state(
    store: &dyn CanvasStore,
    scene: &RwLock<SceneModel>,
    session: &Session,
) -> Result<(), StoreError> {
    let (layers, shapes) = {
        let scene = scene.read().await;
        let shapes: Vec<_> = scene.persistable_shapes().into_iter().cloned().collect();
        (scene.layers.clone(), shapes)
    };
    store
        .save(&session.board_id, &session.user_id, &layers, &shapes)
        .await?;
    debug!(board_id = %session.board_id, layers = layers.len(), shapes = shapes.len(), "board saved");
    Ok(())
}
