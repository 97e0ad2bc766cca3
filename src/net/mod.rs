//! Remote service clients.
//!
//! ARCHITECTURE
//! ============
//! The canvas store and the comments service are independent backends. Each
//! gets a thin async facade trait so the sync engine and comment lifecycle
//! can be driven against scripted mocks in tests, and a `reqwest`-backed
//! implementation for production.

pub mod canvas;
pub mod comments;

/// Errors produced by remote store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The board has no persisted state yet. Recoverable at bootstrap time.
    #[error("board not found")]
    NotFound,

    /// The store rejected the payload. Retrying the same payload is futile.
    #[error("store rejected request: status {status}")]
    Rejected { status: u16, body: String },

    /// Transport failure or service-side error. The next natural trigger
    /// (next edit, next poll tick) retries implicitly.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with a body we could not decode.
    #[error("malformed store response: {0}")]
    Malformed(String),
}
