//! Gallery domain model.
//!
//! # Responsibility
//! - Define photo, video, and journal records plus their shared accessors.
//! - Define the snapshot state persisted as one document.
//!
//! # Invariants
//! - Ids come from one monotonic counter stored in the snapshot.
//! - Collections are plain vectors; order is insertion order.

pub mod memory;
pub mod state;
