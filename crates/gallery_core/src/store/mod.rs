//! Memory store: the single owner of gallery state.
//!
//! # Responsibility
//! - Own the three collections and persist them through a key-value backend.
//! - Answer lookups, filtered queries, and the date-ordered timeline.
//! - Encode and decode snapshots for persistence and backup files.
//!
//! # Invariants
//! - Every successful mutation ends with a full snapshot write.
//! - A failed write leaves in-memory state as it was before the call.
//! - Not-found is a normal outcome (`Option`/`bool`), never an error.

use crate::model::state::IdSpaceExhausted;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory_store;
pub mod query;
pub mod snapshot;

pub use memory_store::MemoryStore;
pub use query::{MemoryQuery, SortOrder, Timeline, ALL_CATEGORIES};
pub use snapshot::ParseError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure for one user action.
#[derive(Debug)]
pub enum StoreError {
    /// Backend rejected a read or write.
    Storage(StorageError),
    /// Snapshot bytes are not a well-formed gallery document.
    Parse(ParseError),
    /// State could not be serialized.
    Encode(serde_json::Error),
    /// No id is left to allocate.
    IdSpaceExhausted(IdSpaceExhausted),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode gallery snapshot: {err}"),
            Self::IdSpaceExhausted(err) => write!(f, "cannot create memory: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::IdSpaceExhausted(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<IdSpaceExhausted> for StoreError {
    fn from(value: IdSpaceExhausted) -> Self {
        Self::IdSpaceExhausted(value)
    }
}

impl From<ParseError> for StoreError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}
