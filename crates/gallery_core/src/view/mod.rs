//! Pure projections from store state into display models.
//!
//! # Responsibility
//! - Turn records into gallery cards, timeline items, and counts.
//! - Keep search/filter/sort UI state as an explicit value.
//!
//! # Invariants
//! - Projections never mutate state and never touch storage.

pub mod format;
pub mod gallery;

pub use gallery::{
    GalleryFilter, GalleryView, JournalCard, Lightbox, PhotoCard, TimelineItem, VideoCard,
};
