//! Core of the memory gallery: photos, videos, and journal entries.
//! This crate owns the data model, persistence, and the projections the
//! public gallery and the admin panel render from.

pub mod admin;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod storage;
pub mod store;
pub mod view;

pub use admin::{parse_tags, AdminController, ExportFile, ManageItem, MemoryForm};
pub use config::{GalleryConfig, DEFAULT_EXPORT_FILE_NAME, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::memory::{
    parse_memory_date, JournalEntry, Memory, MemoryId, MemoryKind, MemoryRecord, MemoryRef, Photo,
    Video,
};
pub use model::state::{IdSpaceExhausted, MemoryCounts, MemoryState};
pub use notify::{
    LogNotificationSink, Notification, NotificationLevel, NotificationLog, NotificationSink,
};
pub use storage::{InMemoryKvStore, KeyValueStore, SqliteKvStore, StorageError, StorageResult};
pub use store::{
    MemoryQuery, MemoryStore, ParseError, SortOrder, StoreError, StoreResult, Timeline,
    ALL_CATEGORIES,
};
pub use view::{GalleryFilter, GalleryView, JournalCard, Lightbox, PhotoCard, TimelineItem, VideoCard};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
