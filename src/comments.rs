//! Temporary-comment lifecycle over the comments service.
//!
//! DESIGN
//! ======
//! A comment placed on the board starts as a *temporary* record: local-only,
//! `temp-` prefixed id, no backend id. It is never sent to the remote store
//! implicitly — the user either confirms it (save, which replaces the local
//! record with the persisted one) or discards it (cancel, which makes no
//! remote call at all). Persisted comments are edited and deleted through
//! their backend id.
//!
//! Position drags update locally only; comment geometry is not part of the
//! canvas checksum, so no save is triggered.

#[cfg(test)]
#[path = "comments_test.rs"]
mod comments_test;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::net::StoreError;
use crate::net::comments::CommentsApi;
use crate::scene::{Comment, SceneModel, TEMP_ID_PREFIX};
use crate::sync::engine::Session;

/// Errors from the comment lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    /// Comment text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyText,

    /// No comment with this id exists in the scene.
    #[error("unknown comment: {0}")]
    UnknownComment(String),

    /// The comment has no backend id yet; save it before editing remotely.
    #[error("comment not persisted: {0}")]
    NotPersisted(String),

    /// The comments service call failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Manages the comment set of one board's scene.
pub struct CommentsService {
    session: Session,
    api: Arc<dyn CommentsApi>,
    scene: Arc<RwLock<SceneModel>>,
}

impl CommentsService {
    #[must_use]
    pub fn new(session: Session, api: Arc<dyn CommentsApi>, scene: Arc<RwLock<SceneModel>>) -> Self {
        Self { session, api, scene }
    }

    /// Replace the scene's comments with the board's persisted set.
    ///
    /// # Errors
    ///
    /// Propagates the service failure; the scene is untouched in that case.
    pub async fn load(&self) -> Result<(), CommentError> {
        let records = self.api.list(&self.session.board_id).await?;
        let comments: Vec<Comment> = records.into_iter().map(|r| r.into_comment()).collect();
        let mut scene = self.scene.write().await;
        scene.comments = comments;
        Ok(())
    }

    /// Create a local-only temporary comment at the given position.
    ///
    /// Coordinates are rounded to whole pixels. Returns a clone of the new
    /// comment for the caller to start editing.
    pub async fn create_temporary(&self, x: f64, y: f64) -> Comment {
        let comment = Comment {
            id: format!("{TEMP_ID_PREFIX}{}", Uuid::new_v4()),
            backend_id: None,
            user_id: self.session.user_id.clone(),
            dashboard_id: self.session.board_id.clone(),
            text: String::new(),
            x: x.round(),
            y: y.round(),
            created_at: None,
        };
        let mut scene = self.scene.write().await;
        scene.comments.push(comment.clone());
        comment
    }

    /// Confirm a temporary comment: persist it and replace the local record
    /// with the canonical one (now carrying a backend id).
    ///
    /// # Errors
    ///
    /// `EmptyText` when the trimmed text is blank, `UnknownComment` when the
    /// temporary record is gone, or the underlying service failure. The
    /// temporary record stays in the scene on failure so the user can retry.
    pub async fn save_temporary(&self, temp_id: &str, text: &str) -> Result<Comment, CommentError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CommentError::EmptyText);
        }

        let position = {
            let scene = self.scene.read().await;
            let comment = scene
                .comments
                .iter()
                .find(|c| c.id == temp_id)
                .ok_or_else(|| CommentError::UnknownComment(temp_id.to_owned()))?;
            (comment.x, comment.y)
        };

        let record = self
            .api
            .create(&self.session.board_id, &self.session.user_id, trimmed, position)
            .await?;
        let saved = record.into_comment();

        let mut scene = self.scene.write().await;
        match scene.comments.iter_mut().find(|c| c.id == temp_id) {
            Some(slot) => *slot = saved.clone(),
            // EDGE: cancelled while the create was in flight; keep the
            // persisted record rather than dropping it silently.
            None => scene.comments.push(saved.clone()),
        }
        Ok(saved)
    }

    /// Discard a temporary comment. Local-only; no remote call is made.
    ///
    /// Returns `false` when no such comment existed.
    pub async fn cancel_temporary(&self, temp_id: &str) -> bool {
        let mut scene = self.scene.write().await;
        let before = scene.comments.len();
        scene.comments.retain(|c| !(c.id == temp_id && c.is_temporary()));
        scene.comments.len() != before
    }

    /// Update the text of a persisted comment.
    ///
    /// # Errors
    ///
    /// `EmptyText`, `UnknownComment`, `NotPersisted`, or the service failure.
    pub async fn update(&self, comment_id: &str, text: &str) -> Result<Comment, CommentError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CommentError::EmptyText);
        }

        let backend_id = self.backend_id_of(comment_id).await?;
        let record = self.api.update(&backend_id, trimmed).await?;
        let updated = record.into_comment();

        let mut scene = self.scene.write().await;
        if let Some(slot) = scene.comments.iter_mut().find(|c| c.id == comment_id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Delete a persisted comment remotely and locally.
    ///
    /// # Errors
    ///
    /// `UnknownComment`, `NotPersisted`, or the service failure. The local
    /// record is kept on failure.
    pub async fn delete(&self, comment_id: &str) -> Result<(), CommentError> {
        let backend_id = self.backend_id_of(comment_id).await?;
        self.api.delete(&backend_id).await?;
        let mut scene = self.scene.write().await;
        scene.comments.retain(|c| c.id != comment_id);
        Ok(())
    }

    /// Move a comment locally. Rounded coordinates; no remote call (the
    /// backend position update rides along with the next text edit).
    pub async fn move_comment(&self, comment_id: &str, x: f64, y: f64) -> bool {
        let mut scene = self.scene.write().await;
        match scene.comments.iter_mut().find(|c| c.id == comment_id) {
            Some(comment) => {
                comment.x = x.round();
                comment.y = y.round();
                true
            }
            None => {
                warn!(comment_id, "move for unknown comment ignored");
                false
            }
        }
    }

    async fn backend_id_of(&self, comment_id: &str) -> Result<String, CommentError> {
        let scene = self.scene.read().await;
        let comment = scene
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| CommentError::UnknownComment(comment_id.to_owned()))?;
        comment
            .backend_id
            .clone()
            .ok_or_else(|| CommentError::NotPersisted(comment_id.to_owned()))
    }
}
