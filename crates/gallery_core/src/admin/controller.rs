//! Admin panel use-cases over a borrowed [`MemoryStore`].
//!
//! # Responsibility
//! - Build records from form input and hand them to the store.
//! - Project management lists and dashboard counts.
//! - Run backup export and restore with user notifications.
//!
//! # Invariants
//! - Every action notifies through the store's sink; not-found deletes stay
//!   silent.
//! - A rejected restore never changes state.

use crate::config::GalleryConfig;
use crate::model::memory::{
    JournalEntry, MemoryId, MemoryKind, MemoryRecord, MemoryRef, Photo, Video,
};
use crate::model::state::MemoryCounts;
use crate::notify::Notification;
use crate::storage::KeyValueStore;
use crate::store::{MemoryStore, StoreError, StoreResult};
use crate::view::format::{format_short_date, summarize, SUMMARY_MAX_CHARS};
use serde::Serialize;

const RESTORE_PARSE_ERROR_MESSAGE: &str = "Error restoring data. Invalid file format.";

/// Raw form fields as typed by the user.
///
/// `media` is the image URL for photos and the embed URL for videos; it is
/// ignored for journals. `text` is caption, description, or content. `tags`
/// is one comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryForm {
    pub title: String,
    pub date: String,
    pub media: String,
    pub text: String,
    pub tags: String,
    pub category: String,
}

impl MemoryForm {
    /// Builds an unsaved record of `kind`; the store assigns the id.
    pub fn into_record(self, kind: MemoryKind) -> MemoryRecord {
        let tags = parse_tags(&self.tags);
        match kind {
            MemoryKind::Photo => MemoryRecord::Photo(Photo {
                id: 0,
                title: self.title,
                date: self.date,
                image: self.media,
                caption: self.text,
                tags,
                category: self.category,
            }),
            MemoryKind::Video => MemoryRecord::Video(Video {
                id: 0,
                title: self.title,
                date: self.date,
                url: self.media,
                description: self.text,
                tags,
                category: self.category,
            }),
            MemoryKind::Journal => MemoryRecord::Journal(JournalEntry {
                id: 0,
                title: self.title,
                date: self.date,
                content: self.text,
                tags,
                category: self.category,
            }),
        }
    }
}

/// Splits comma-separated tag input, trimming and dropping empty entries.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Row in an admin management list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManageItem {
    pub kind: MemoryKind,
    pub id: MemoryId,
    pub title: String,
    pub summary: String,
    pub date_label: String,
    pub tags_label: String,
    /// Photo image URI; `None` for videos and journals.
    pub thumbnail: Option<String>,
}

/// Downloadable backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Admin use-cases bound to one store.
pub struct AdminController<'s, S: KeyValueStore> {
    store: &'s mut MemoryStore<S>,
    export_file_name: String,
}

impl<'s, S: KeyValueStore> AdminController<'s, S> {
    pub fn new(store: &'s mut MemoryStore<S>, config: &GalleryConfig) -> Self {
        Self {
            store,
            export_file_name: config.export_file_name.clone(),
        }
    }

    pub fn store(&self) -> &MemoryStore<S> {
        &*self.store
    }

    pub fn dashboard(&self) -> MemoryCounts {
        self.store.counts()
    }

    /// Management rows for one kind, in insertion order.
    pub fn manage_list(&self, kind: MemoryKind) -> Vec<ManageItem> {
        self.store
            .state()
            .iter_kind(kind)
            .map(manage_item)
            .collect()
    }

    /// Creates a record from form input.
    pub fn add_from_form(
        &mut self,
        kind: MemoryKind,
        form: MemoryForm,
    ) -> StoreResult<MemoryRecord> {
        self.store.create(form.into_record(kind))
    }

    /// Looks up a record to prefill an edit form.
    pub fn edit_target(&self, kind: MemoryKind, id: MemoryId) -> Option<MemoryRecord> {
        self.store.find(kind, id).map(|memory| memory.to_record())
    }

    /// Replaces a record with its edited version.
    ///
    /// Returns `false` when the record no longer exists.
    pub fn edit(&mut self, record: MemoryRecord) -> StoreResult<bool> {
        let kind = record.kind();
        let updated = self.store.update(record)?;
        let notification = if updated {
            Notification::success(format!("{} updated successfully!", kind.display_name()))
        } else {
            Notification::error(format!("{} no longer exists.", kind.display_name()))
        };
        self.store.notify(notification);
        Ok(updated)
    }

    /// Deletes a record after the UI has confirmed the action.
    pub fn delete(&mut self, kind: MemoryKind, id: MemoryId) -> StoreResult<bool> {
        let removed = self.store.delete(kind, id)?;
        if removed {
            self.store.notify(Notification::success(format!(
                "{} deleted successfully!",
                kind.display_name()
            )));
        }
        Ok(removed)
    }

    /// Explicit "save all" action.
    pub fn save_all(&mut self) -> StoreResult<()> {
        self.store.save()
    }

    pub fn export_backup(&self) -> StoreResult<ExportFile> {
        let bytes = self.store.export_snapshot()?;
        self.store
            .notify(Notification::success("Data exported successfully!"));
        Ok(ExportFile {
            file_name: self.export_file_name.clone(),
            bytes,
        })
    }

    /// Restores a backup file, replacing all records.
    pub fn restore_backup(&mut self, bytes: &[u8]) -> StoreResult<MemoryCounts> {
        match self.store.import_snapshot(bytes) {
            Ok(state) => {
                let counts = state.counts();
                self.store
                    .notify(Notification::success("Data restored successfully!"));
                Ok(counts)
            }
            Err(StoreError::Parse(err)) => {
                self.store
                    .notify(Notification::error(RESTORE_PARSE_ERROR_MESSAGE));
                Err(StoreError::Parse(err))
            }
            Err(other) => Err(other),
        }
    }
}

fn manage_item(memory: MemoryRef<'_>) -> ManageItem {
    let summary = match memory {
        MemoryRef::Journal(journal) => summarize(&journal.content, SUMMARY_MAX_CHARS),
        other => other.body().to_string(),
    };
    let thumbnail = match memory {
        MemoryRef::Photo(photo) => Some(photo.image.clone()),
        _ => None,
    };
    ManageItem {
        kind: memory.kind(),
        id: memory.id(),
        title: memory.title().to_string(),
        summary,
        date_label: format_short_date(memory.date()),
        tags_label: memory.tags().join(", "),
        thumbnail,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_tags, MemoryForm};
    use crate::model::memory::{MemoryKind, MemoryRecord};

    #[test]
    fn parse_tags_trims_and_drops_empty() {
        assert_eq!(
            parse_tags(" family , travel,,summer "),
            vec!["family", "travel", "summer"]
        );
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn form_maps_fields_per_kind() {
        let form = MemoryForm {
            title: "Trip".to_string(),
            date: "2024-05-01".to_string(),
            media: "https://example.com/v".to_string(),
            text: "Road trip".to_string(),
            tags: "travel".to_string(),
            category: "travel".to_string(),
        };
        match form.clone().into_record(MemoryKind::Video) {
            MemoryRecord::Video(video) => {
                assert_eq!(video.url, "https://example.com/v");
                assert_eq!(video.description, "Road trip");
            }
            other => panic!("unexpected record {other:?}"),
        }
        match form.into_record(MemoryKind::Journal) {
            MemoryRecord::Journal(journal) => assert_eq!(journal.content, "Road trip"),
            other => panic!("unexpected record {other:?}"),
        }
    }
}
