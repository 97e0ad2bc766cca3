//! boardsync — collaborative-whiteboard canvas sync engine.
//!
//! Client-side state synchronization for a shared drawing board: an
//! in-memory scene of layers, shapes, and comments; debounced persistence to
//! a remote canvas store; and a polling checksum protocol that detects
//! remote writers and reconciles by reloading (last-writer-wins).
//!
//! The rendering surface, page routing, auth, and chat are external to this
//! crate; it speaks only to the canvas store and the comments service.

pub mod checksum;
pub mod comments;
pub mod config;
pub mod net;
pub mod scene;
pub mod sync;
