//! Comments service client.
//!
//! The comments backend is keyed by dashboard (board) and author ids and
//! returns Mongo-style records (`_id`, `coordinates: [x, y]`). The sync
//! engine's only touch point is the temporary-comment lifecycle in
//! `crate::comments`; this module is just the wire facade plus the
//! record-to-scene conversion.

#[cfg(test)]
#[path = "comments_test.rs"]
mod comments_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::scene::Comment;

const DEFAULT_BASE_URL: &str = "http://localhost:8001/comments";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// A comment as the comments service stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub dashboard_id: String,
    pub user_id: String,
    pub content: String,
    /// `[x, y]` pair.
    pub coordinates: Vec<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl CommentRecord {
    /// Convert a persisted record into the scene representation. The local
    /// id and the backend id are the same for persisted comments.
    #[must_use]
    pub fn into_comment(self) -> Comment {
        let x = self.coordinates.first().copied().unwrap_or(0.0);
        let y = self.coordinates.get(1).copied().unwrap_or(0.0);
        Comment {
            id: self.id.clone(),
            backend_id: Some(self.id),
            user_id: self.user_id,
            dashboard_id: self.dashboard_id,
            text: self.content,
            x,
            y,
            created_at: Some(self.created_at),
        }
    }
}

#[derive(Serialize)]
struct CommentBody<'a> {
    content: &'a str,
}

// =============================================================================
// CONTRACT
// =============================================================================

/// Async facade over the remote comments service.
#[async_trait::async_trait]
pub trait CommentsApi: Send + Sync {
    /// Create a comment for a board at the given position.
    async fn create(
        &self,
        dashboard_id: &str,
        user_id: &str,
        content: &str,
        position: (f64, f64),
    ) -> Result<CommentRecord, StoreError>;

    /// List all comments on a board.
    async fn list(&self, dashboard_id: &str) -> Result<Vec<CommentRecord>, StoreError>;

    /// Update the text of a persisted comment.
    async fn update(&self, backend_id: &str, content: &str) -> Result<CommentRecord, StoreError>;

    /// Delete a persisted comment.
    async fn delete(&self, backend_id: &str) -> Result<(), StoreError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// `reqwest`-backed comments service client.
pub struct HttpCommentsApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCommentsApi {
    /// Build a client against the given service base URL.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into() })
    }

    /// Build a client from `COMMENTS_SERVICE_URL`
    /// (default `http://localhost:8001/comments`).
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` if the HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self, StoreError> {
        let base = std::env::var("COMMENTS_SERVICE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(base)
    }
}

fn create_endpoint(base: &str, dashboard_id: &str, user_id: &str, position: (f64, f64)) -> String {
    format!(
        "{base}/dashboards/{dashboard_id}/users/{user_id}/comments?coordinates={},{}",
        position.0, position.1
    )
}

fn list_endpoint(base: &str, dashboard_id: &str) -> String {
    format!("{base}/dashboards/{dashboard_id}")
}

fn comment_endpoint(base: &str, backend_id: &str) -> String {
    format!("{base}/{backend_id}")
}

#[async_trait::async_trait]
impl CommentsApi for HttpCommentsApi {
    async fn create(
        &self,
        dashboard_id: &str,
        user_id: &str,
        content: &str,
        position: (f64, f64),
    ) -> Result<CommentRecord, StoreError> {
        let url = create_endpoint(&self.base_url, dashboard_id, user_id, position);
        let response = self
            .http
            .post(url)
            .json(&CommentBody { content })
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        decode(response).await
    }

    async fn list(&self, dashboard_id: &str) -> Result<Vec<CommentRecord>, StoreError> {
        let response = self
            .http
            .get(list_endpoint(&self.base_url, dashboard_id))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        decode(response).await
    }

    async fn update(&self, backend_id: &str, content: &str) -> Result<CommentRecord, StoreError> {
        let response = self
            .http
            .put(comment_endpoint(&self.base_url, backend_id))
            .json(&CommentBody { content })
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        decode(response).await
    }

    async fn delete(&self, backend_id: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(comment_endpoint(&self.base_url, backend_id))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(classify(status, body))
        }
    }
}

fn classify(status: u16, body: String) -> StoreError {
    match status {
        404 => StoreError::NotFound,
        400 | 422 => StoreError::Rejected { status, body },
        _ => StoreError::Unavailable(format!("status {status}: {body}")),
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(classify(status, body));
    }
    serde_json::from_str(&body).map_err(|e| StoreError::Malformed(e.to_string()))
}
