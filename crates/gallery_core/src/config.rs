//! Runtime configuration for gallery hosts.
//!
//! Defaults match the browser gallery: one storage key, one backup file name.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Storage key holding the serialized snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "memoryGalleryData";
/// Suggested file name for exported backups.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "memory-gallery-backup.json";
/// SQLite file used when no database path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "memory_gallery.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    pub storage_key: String,
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
    pub export_file_name: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GalleryConfig, DEFAULT_STORAGE_KEY};

    #[test]
    fn defaults_match_browser_gallery() {
        let config = GalleryConfig::default();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.export_file_name, "memory-gallery-backup.json");
        assert!(config.log_dir.is_none());
    }
}
