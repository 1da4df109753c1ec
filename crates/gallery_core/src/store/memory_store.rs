//! `MemoryStore`: state owner with write-through persistence.
//!
//! # Responsibility
//! - Load the snapshot once at construction, falling back to seed data.
//! - Apply create/update/delete/import and persist the full snapshot.
//! - Notify the attached UI collaborator about save outcomes.
//!
//! # Invariants
//! - Mutations are staged on a copy of the state; the copy replaces the live
//!   state only after the storage write succeeds.
//! - Ids come from the persisted counter, never from the clock.
//! - Logs carry ids, kinds, and sizes only, never record text.

use crate::config::GalleryConfig;
use crate::model::memory::{MemoryId, MemoryKind, MemoryRecord, MemoryRef};
use crate::model::state::{MemoryCounts, MemoryState};
use crate::notify::{LogNotificationSink, Notification, NotificationSink};
use crate::storage::KeyValueStore;
use crate::store::query::{MemoryQuery, Timeline};
use crate::store::snapshot;
use crate::store::{StoreError, StoreResult};
use log::{debug, error, info, warn};

const SAVE_OK_MESSAGE: &str = "Changes saved successfully!";

/// Single source of truth for photos, videos, and journals.
pub struct MemoryStore<S: KeyValueStore> {
    storage: S,
    storage_key: String,
    state: MemoryState,
    sink: Box<dyn NotificationSink>,
}

impl<S: KeyValueStore> MemoryStore<S> {
    /// Creates a store over `storage` and loads the snapshot under
    /// `storage_key`.
    pub fn open(storage: S, storage_key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            storage_key: storage_key.into(),
            state: MemoryState::default(),
            sink: Box::new(LogNotificationSink),
        };
        store.state = store.load();
        store
    }

    /// Creates a store using the configured storage key.
    pub fn open_with_config(storage: S, config: &GalleryConfig) -> Self {
        Self::open(storage, config.storage_key.as_str())
    }

    /// Replaces the notification sink.
    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Reads the persisted snapshot.
    ///
    /// Absent, unreadable, or malformed data yields [`MemoryState::seed`].
    /// Failures are logged and never surfaced.
    pub fn load(&self) -> MemoryState {
        let raw = match self.storage.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=snapshot_load module=store status=seed reason=absent");
                return MemoryState::seed();
            }
            Err(err) => {
                error!(
                    "event=snapshot_load module=store status=seed reason=storage_error error={err}"
                );
                return MemoryState::seed();
            }
        };

        match snapshot::decode(raw.as_bytes(), "persisted snapshot") {
            Ok(state) => {
                let counts = state.counts();
                info!(
                    "event=snapshot_load module=store status=ok photos={} videos={} journals={}",
                    counts.photos, counts.videos, counts.journals
                );
                state
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=store status=seed reason=malformed line={}",
                    err.line()
                );
                MemoryState::seed()
            }
        }
    }

    /// Re-reads the persisted snapshot into memory.
    pub fn reload(&mut self) {
        self.state = self.load();
    }

    /// Writes the current state to storage.
    pub fn save(&mut self) -> StoreResult<()> {
        let state = self.state.clone();
        self.persist(&state)
    }

    pub fn state(&self) -> &MemoryState {
        &self.state
    }

    pub fn counts(&self) -> MemoryCounts {
        self.state.counts()
    }

    /// Stores a new record and returns it with its allocated id.
    ///
    /// Any id already on `record` is overwritten. Fails with
    /// [`StoreError::IdSpaceExhausted`] once the counter has run out.
    pub fn create(&mut self, mut record: MemoryRecord) -> StoreResult<MemoryRecord> {
        let mut next = self.state.clone();
        let id = next.allocate_id().map_err(|err| {
            error!(
                "event=memory_create module=store status=error error_code=id_space_exhausted kind={}",
                record.kind()
            );
            StoreError::from(err)
        })?;
        record.set_id(id);
        next.push(record.clone());
        self.commit(next)?;

        info!(
            "event=memory_create module=store status=ok kind={} id={id}",
            record.kind()
        );
        Ok(record)
    }

    /// Replaces the stored record with the same kind and id.
    ///
    /// Returns `false` without writing when no such record exists.
    pub fn update(&mut self, record: MemoryRecord) -> StoreResult<bool> {
        let kind = record.kind();
        let id = record.id();
        let mut next = self.state.clone();
        if !next.replace(record) {
            debug!("event=memory_update module=store status=not_found kind={kind} id={id}");
            return Ok(false);
        }
        self.commit(next)?;

        info!("event=memory_update module=store status=ok kind={kind} id={id}");
        Ok(true)
    }

    /// Removes the first record of `kind` with `id`.
    ///
    /// Returns `false` without writing when no such record exists.
    pub fn delete(&mut self, kind: MemoryKind, id: MemoryId) -> StoreResult<bool> {
        let mut next = self.state.clone();
        if next.remove(kind, id).is_none() {
            debug!("event=memory_delete module=store status=not_found kind={kind} id={id}");
            return Ok(false);
        }
        self.commit(next)?;

        info!("event=memory_delete module=store status=ok kind={kind} id={id}");
        Ok(true)
    }

    pub fn find(&self, kind: MemoryKind, id: MemoryId) -> Option<MemoryRef<'_>> {
        self.state.find(kind, id)
    }

    pub fn query(&self, query: &MemoryQuery) -> Vec<MemoryRef<'_>> {
        query.run(&self.state)
    }

    /// All records across kinds, newest first; ties keep insertion order.
    pub fn timeline(&self) -> Timeline<'_> {
        Timeline::new(&self.state)
    }

    /// Distinct non-empty categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.state.iter().map(|memory| memory.category()))
    }

    /// Distinct non-empty tags in first-seen order.
    pub fn tags(&self) -> Vec<&str> {
        distinct(
            self.state
                .iter()
                .flat_map(|memory| memory.tags().iter().map(String::as_str)),
        )
    }

    /// Full state as pretty-printed JSON, ready to be saved as a backup file.
    pub fn export_snapshot(&self) -> StoreResult<Vec<u8>> {
        let bytes = snapshot::encode_pretty(&self.state).map_err(StoreError::Encode)?;
        info!(
            "event=snapshot_export module=store status=ok bytes={}",
            bytes.len()
        );
        Ok(bytes)
    }

    /// Replaces the whole state with a decoded backup.
    ///
    /// Malformed input returns [`StoreError::Parse`] and changes nothing. A
    /// failed storage write also leaves the current state in place.
    pub fn import_snapshot(&mut self, bytes: &[u8]) -> StoreResult<&MemoryState> {
        let next = match snapshot::decode(bytes, "backup file") {
            Ok(next) => next,
            Err(err) => {
                warn!(
                    "event=snapshot_import module=store status=error error_code=parse_failed line={}",
                    err.line()
                );
                return Err(err.into());
            }
        };
        self.commit(next)?;

        let counts = self.state.counts();
        info!(
            "event=snapshot_import module=store status=ok photos={} videos={} journals={}",
            counts.photos, counts.videos, counts.journals
        );
        Ok(&self.state)
    }

    /// Forwards a notification to the attached sink.
    pub fn notify(&self, notification: Notification) {
        self.sink.notify(notification);
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store and returns its backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn commit(&mut self, next: MemoryState) -> StoreResult<()> {
        self.persist(&next)?;
        self.state = next;
        Ok(())
    }

    fn persist(&mut self, state: &MemoryState) -> StoreResult<()> {
        let encoded = snapshot::encode_compact(state).map_err(StoreError::Encode)?;
        if let Err(err) = self.storage.set(&self.storage_key, &encoded) {
            error!(
                "event=snapshot_save module=store status=error bytes={} error={err}",
                encoded.len()
            );
            self.sink
                .notify(Notification::error(format!("Failed to save changes: {err}")));
            return Err(err.into());
        }

        debug!(
            "event=snapshot_save module=store status=ok bytes={}",
            encoded.len()
        );
        self.sink.notify(Notification::success(SAVE_OK_MESSAGE));
        Ok(())
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = std::collections::HashSet::new();
    values
        .filter(|value| !value.is_empty() && seen.insert(*value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::model::memory::{MemoryKind, MemoryRecord, Photo};
    use crate::notify::{NotificationLevel, NotificationLog};
    use crate::storage::{InMemoryKvStore, KeyValueStore};

    const KEY: &str = "memoryGalleryData";

    #[test]
    fn open_on_empty_storage_uses_seed_without_writing() {
        let store = MemoryStore::open(InMemoryKvStore::new(), KEY);
        assert_eq!(store.counts().total, 3);
        assert!(store.storage().is_empty());
    }

    #[test]
    fn malformed_persisted_snapshot_falls_back_to_seed() {
        let mut storage = InMemoryKvStore::new();
        storage.set(KEY, "{\"photos\": [").unwrap();
        let store = MemoryStore::open(storage, KEY);
        assert_eq!(store.state().photos[0].title, "Beach Sunset");
    }

    #[test]
    fn save_notifies_success() {
        let log = NotificationLog::new();
        let mut store = MemoryStore::open(InMemoryKvStore::new(), KEY).with_sink(log.clone());
        store.save().unwrap();
        let last = log.last().unwrap();
        assert_eq!(last.level, NotificationLevel::Success);
        assert_eq!(last.message, "Changes saved successfully!");
        assert!(store.storage().get(KEY).unwrap().is_some());
    }

    #[test]
    fn categories_and_tags_are_distinct_in_first_seen_order() {
        let store = MemoryStore::open(InMemoryKvStore::new(), KEY);
        assert_eq!(store.categories(), vec!["family", "everyday"]);
        assert_eq!(
            store.tags(),
            vec!["family", "travel", "summer", "celebration", "everyday"]
        );
    }

    #[test]
    fn create_overwrites_caller_id() {
        let mut store = MemoryStore::open(InMemoryKvStore::new(), KEY);
        let created = store
            .create(MemoryRecord::Photo(Photo {
                id: 1,
                title: "X".to_string(),
                ..Photo::default()
            }))
            .unwrap();
        assert_eq!(created.id(), 2);
        assert_eq!(store.state().len(MemoryKind::Photo), 2);
    }
}
