//! Canvas state synchronization.
//!
//! ARCHITECTURE
//! ============
//! Four pieces, composed by [`engine::SyncEngine`]:
//!
//! - [`scheduler`]: coalesces edit bursts into one debounced save.
//! - [`bootstrap`]: initial load with retry while the board record is still
//!   being provisioned.
//! - [`reconciler`]: checksum polling and last-writer-wins drift resolution.
//! - [`engine`]: per-board session wiring and lifecycle (open/close).

pub mod bootstrap;
pub mod engine;
pub mod reconciler;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testutil;
