//! Scripted store mock and fixtures shared by sync tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::checksum::Digest;
use crate::net::StoreError;
use crate::net::canvas::{CanvasDocument, CanvasStore};
use crate::scene::{Geometry, Layer, Shape};

/// One recorded `save` invocation.
pub(crate) struct SaveCall {
    pub board_id: String,
    pub owner_id: String,
    pub layers: Vec<Layer>,
    pub shapes: Vec<Shape>,
}

/// Canvas store double driven by scripted result queues.
///
/// `load` falls back to an empty document when its queue runs dry; an
/// unscripted `checksum` call parks forever, which doubles as a "slow remote"
/// for the in-flight guard tests.
#[derive(Default)]
pub(crate) struct MockStore {
    pub load_results: Mutex<VecDeque<Result<CanvasDocument, StoreError>>>,
    pub checksum_results: Mutex<VecDeque<Result<Digest, StoreError>>>,
    pub load_calls: AtomicUsize,
    pub checksum_calls: AtomicUsize,
    pub saves: Mutex<Vec<SaveCall>>,
    pub delete_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_load(&self, result: Result<CanvasDocument, StoreError>) {
        self.load_results.lock().unwrap().push_back(result);
    }

    pub fn push_checksum(&self, result: Result<Digest, StoreError>) {
        self.checksum_results.lock().unwrap().push_back(result);
    }

    pub fn load_count(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn checksum_count(&self) -> usize {
        self.checksum_calls.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl CanvasStore for MockStore {
    async fn load(&self, _board_id: &str) -> Result<CanvasDocument, StoreError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        self.load_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CanvasDocument::default()))
    }

    async fn save(
        &self,
        board_id: &str,
        owner_id: &str,
        layers: &[Layer],
        shapes: &[Shape],
    ) -> Result<(), StoreError> {
        self.saves.lock().unwrap().push(SaveCall {
            board_id: board_id.to_owned(),
            owner_id: owner_id.to_owned(),
            layers: layers.to_vec(),
            shapes: shapes.to_vec(),
        });
        Ok(())
    }

    async fn checksum(&self, _board_id: &str) -> Result<Digest, StoreError> {
        self.checksum_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.checksum_results.lock().unwrap().pop_front();
        match scripted {
            Some(result) => result,
            None => {
                // Park forever: models a checksum fetch that never returns.
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }

    async fn delete(&self, _board_id: &str) -> Result<(), StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn export_svg(&self, _board_id: &str) -> Result<String, StoreError> {
        Ok("<svg xmlns=\"http://www.w3.org/2000/svg\"/>".to_owned())
    }
}

/// A rectangle shape on the given layer.
pub(crate) fn rect_shape(layer_id: &str) -> Shape {
    let mut shape = Shape::new(layer_id, Geometry::Rect { width: 120.0, height: 80.0, corner_radius: None });
    shape.x = Some(10.0);
    shape.y = Some(20.0);
    shape
}
