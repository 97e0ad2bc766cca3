//! Bootstrap loader — initial board load with retry-on-absent.
//!
//! DESIGN
//! ======
//! Board records are provisioned by a separate service, so the first load can
//! race the provisioning write. A 404 from the store is therefore retried a
//! bounded number of times with a fixed delay; any other failure aborts
//! immediately. An empty successful result is a genuinely new board and gets
//! a default layer rather than another retry.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::net::StoreError;
use crate::net::canvas::{CanvasDocument, CanvasStore};
use crate::scene::{Layer, SceneModel};

/// Load a board's persisted state, retrying while the store reports it absent.
///
/// Retries only on `NotFound`, up to `config.load_retries` total attempts
/// with `config.load_retry_delay` between them. An empty document is
/// normalized to a single default layer and no shapes.
///
/// # Errors
///
/// `NotFound` once the retry budget is exhausted; any other store error
/// immediately.
pub async fn load_board(
    store: &dyn CanvasStore,
    board_id: &str,
    config: &SyncConfig,
) -> Result<CanvasDocument, StoreError> {
    let attempts = config.load_retries.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match store.load(board_id).await {
            Ok(mut doc) => {
                if doc.is_empty() {
                    info!(board_id, "empty board; initializing default layer");
                    doc.layers = vec![Layer::new("Layer 1")];
                    doc.shapes = Vec::new();
                }
                debug!(board_id, attempt, layers = doc.layers.len(), shapes = doc.shapes.len(), "board loaded");
                return Ok(doc);
            }
            Err(StoreError::NotFound) if attempt < attempts => {
                debug!(board_id, attempt, total = attempts, "board not provisioned yet; retrying");
                tokio::time::sleep(config.load_retry_delay()).await;
            }
            Err(StoreError::NotFound) => {
                warn!(board_id, attempts, "board still absent after retries");
                return Err(StoreError::NotFound);
            }
            Err(e) => {
                warn!(board_id, error = %e, "board load failed");
                return Err(e);
            }
        }
    }
}

/// Load a board and wholesale-replace the scene's layers and shapes.
///
/// The replacement is atomic with respect to the scene lock and leaves
/// comments untouched; the first loaded layer becomes current.
///
/// # Errors
///
/// Propagates any [`load_board`] failure without touching the scene.
pub async fn refresh(
    scene: &Arc<RwLock<SceneModel>>,
    store: &dyn CanvasStore,
    board_id: &str,
    config: &SyncConfig,
) -> Result<(), StoreError> {
    let doc = load_board(store, board_id, config).await?;
    let mut scene = scene.write().await;
    scene.replace_board(doc.layers, doc.shapes);
    Ok(())
}
