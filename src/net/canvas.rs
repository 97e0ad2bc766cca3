//! Canvas store client — persistence facade for board state.
//!
//! One method per remote capability: load, save, checksum, delete, and SVG
//! export. All methods are suspend points; the caller keeps handling input
//! while a call is outstanding. Status classification is a pure function so
//! the error mapping is testable without a live service.
//!
//! ERROR HANDLING
//! ==============
//! 404 on load maps to `StoreError::NotFound` (the board is still being
//! provisioned — distinct from a transport failure). Validation statuses map
//! to `Rejected`; everything else non-2xx, and any transport error, maps to
//! `Unavailable`.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::checksum::Digest;
use crate::scene::{Layer, Shape};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// CONTRACT
// =============================================================================

/// Persisted board state as the store returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasDocument {
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl CanvasDocument {
    /// A genuinely new board: nothing persisted yet, but the record exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty() && self.shapes.is_empty()
    }
}

/// Async facade over the remote canvas persistence service.
#[async_trait::async_trait]
pub trait CanvasStore: Send + Sync {
    /// Fetch persisted state for a board. `NotFound` when nothing is stored.
    async fn load(&self, board_id: &str) -> Result<CanvasDocument, StoreError>;

    /// Overwrite the persisted state for a board. Idempotent full-state write.
    async fn save(
        &self,
        board_id: &str,
        owner_id: &str,
        layers: &[Layer],
        shapes: &[Shape],
    ) -> Result<(), StoreError>;

    /// Fetch the digest of the currently persisted state. Safe to call
    /// frequently; no side effects.
    async fn checksum(&self, board_id: &str) -> Result<Digest, StoreError>;

    /// Remove all persisted state for a board.
    async fn delete(&self, board_id: &str) -> Result<(), StoreError>;

    /// Fetch a vector rendering of the persisted state. Consumed by export
    /// features, not by the sync engine.
    async fn export_svg(&self, board_id: &str) -> Result<String, StoreError>;
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest<'a> {
    canvas_id: &'a str,
    user_id: &'a str,
    layers: &'a [Layer],
    shapes: &'a [Shape],
}

#[derive(Deserialize)]
struct ChecksumResponse {
    checksum: String,
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// `reqwest`-backed canvas store client.
pub struct HttpCanvasStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCanvasStore {
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

    /// Build a client from `CANVAS_SERVICE_URL` (default `http://localhost:8080`).
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` if the HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self, StoreError> {
        let base = std::env::var("CANVAS_SERVICE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(base)
    }

    fn canvas_url(&self, board_id: &str) -> String {
        format!("{}/canvas?id={board_id}", self.base_url)
    }

    fn checksum_url(&self, board_id: &str) -> String {
        format!("{}/canvas/checksum?id={board_id}", self.base_url)
    }

    fn svg_url(&self, board_id: &str) -> String {
        format!("{}/canvas/svg?id={board_id}", self.base_url)
    }

    fn save_url(&self) -> String {
        format!("{}/canvas/save", self.base_url)
    }
}

#[async_trait::async_trait]
impl CanvasStore for HttpCanvasStore {
    async fn load(&self, board_id: &str) -> Result<CanvasDocument, StoreError> {
        let response = self
            .http
            .get(self.canvas_url(board_id))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let body = check_status(response).await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Malformed(e.to_string()))
    }

    async fn save(
        &self,
        board_id: &str,
        owner_id: &str,
        layers: &[Layer],
        shapes: &[Shape],
    ) -> Result<(), StoreError> {
        let body = SaveRequest { canvas_id: board_id, user_id: owner_id, layers, shapes };
        let response = self
            .http
            .post(self.save_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }

    async fn checksum(&self, board_id: &str) -> Result<Digest, StoreError> {
        let response = self
            .http
            .get(self.checksum_url(board_id))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let body = check_status(response).await?;
        parse_checksum_response(&body)
    }

    async fn delete(&self, board_id: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(self.canvas_url(board_id))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }

    async fn export_svg(&self, board_id: &str) -> Result<String, StoreError> {
        let response = self
            .http
            .get(self.svg_url(board_id))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        check_status(response).await
    }
}

// =============================================================================
// STATUS MAPPING
// =============================================================================

/// Map a non-success status onto the store error taxonomy.
fn classify_status(status: u16, body: String) -> StoreError {
    match status {
        404 => StoreError::NotFound,
        400 | 422 => StoreError::Rejected { status, body },
        _ => StoreError::Unavailable(format!("status {status}: {body}")),
    }
}

fn parse_checksum_response(body: &str) -> Result<Digest, StoreError> {
    let parsed: ChecksumResponse =
        serde_json::from_str(body).map_err(|e| StoreError::Malformed(e.to_string()))?;
    Ok(Digest::new(parsed.checksum))
}

async fn check_status(response: reqwest::Response) -> Result<String, StoreError> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(classify_status(status, body))
    }
}
