//! Snapshot state shared by store, projections, and persistence.
//!
//! # Responsibility
//! - Hold the three collections and the id counter as one serializable value.
//! - Provide the built-in seed data set.
//! - Repair snapshots decoded from older or hand-edited documents.
//!
//! # Invariants
//! - After [`MemoryState::normalize`], ids are non-zero and unique per
//!   collection, and `next_id` is greater than every stored id.
//! - Collections keep insertion order.

use crate::model::memory::{
    JournalEntry, Memory, MemoryId, MemoryKind, MemoryRecord, MemoryRef, Photo, Video,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The id counter cannot advance past `MemoryId::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSpaceExhausted;

impl Display for IdSpaceExhausted {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("memory id space exhausted")
    }
}

impl Error for IdSpaceExhausted {}

/// Full state of all three collections.
///
/// Serialized as `{ photos, videos, journals, next_id }`. Every field defaults
/// when missing, so documents written without `next_id` still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryState {
    pub photos: Vec<Photo>,
    pub videos: Vec<Video>,
    pub journals: Vec<JournalEntry>,
    /// Next id handed out by [`MemoryState::allocate_id`].
    pub next_id: MemoryId,
}

/// Per-kind record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemoryCounts {
    pub photos: usize,
    pub videos: usize,
    pub journals: usize,
    pub total: usize,
}

impl MemoryState {
    /// Built-in sample data used when storage holds no usable snapshot.
    pub fn seed() -> Self {
        Self {
            photos: vec![Photo {
                id: 1,
                title: "Beach Sunset".to_string(),
                date: "2023-07-15".to_string(),
                image: "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?ixlib=rb-1.2.1&auto=format&fit=crop&w=600&q=80".to_string(),
                caption: "Beautiful sunset at the beach with family".to_string(),
                tags: owned(&["family", "travel", "summer"]),
                category: "family".to_string(),
            }],
            videos: vec![Video {
                id: 1,
                title: "Christmas Morning".to_string(),
                date: "2022-12-25".to_string(),
                url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
                description: "Kids opening presents on Christmas morning".to_string(),
                tags: owned(&["family", "celebration"]),
                category: "family".to_string(),
            }],
            journals: vec![JournalEntry {
                id: 1,
                title: "First Day of Summer".to_string(),
                date: "2023-06-21".to_string(),
                content: "What a wonderful day! The weather was perfect and we spent the entire day at the park. The kids had so much fun playing on the swings...".to_string(),
                tags: owned(&["everyday", "family"]),
                category: "everyday".to_string(),
            }],
            next_id: 2,
        }
    }

    pub fn counts(&self) -> MemoryCounts {
        MemoryCounts {
            photos: self.photos.len(),
            videos: self.videos.len(),
            journals: self.journals.len(),
            total: self.photos.len() + self.videos.len() + self.journals.len(),
        }
    }

    pub fn len(&self, kind: MemoryKind) -> usize {
        match kind {
            MemoryKind::Photo => self.photos.len(),
            MemoryKind::Video => self.videos.len(),
            MemoryKind::Journal => self.journals.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty() && self.videos.is_empty() && self.journals.is_empty()
    }

    /// All records in collection order: photos, videos, journals.
    pub fn iter(&self) -> impl Iterator<Item = MemoryRef<'_>> + '_ {
        self.photos
            .iter()
            .map(MemoryRef::Photo)
            .chain(self.videos.iter().map(MemoryRef::Video))
            .chain(self.journals.iter().map(MemoryRef::Journal))
    }

    /// Records of one kind in insertion order.
    pub fn iter_kind(&self, kind: MemoryKind) -> Box<dyn Iterator<Item = MemoryRef<'_>> + '_> {
        match kind {
            MemoryKind::Photo => Box::new(self.photos.iter().map(MemoryRef::Photo)),
            MemoryKind::Video => Box::new(self.videos.iter().map(MemoryRef::Video)),
            MemoryKind::Journal => Box::new(self.journals.iter().map(MemoryRef::Journal)),
        }
    }

    /// Returns the first record of `kind` with `id`.
    pub fn find(&self, kind: MemoryKind, id: MemoryId) -> Option<MemoryRef<'_>> {
        self.iter_kind(kind).find(|memory| memory.id() == id)
    }

    /// Hands out the current counter value and advances it.
    ///
    /// Fails once the counter can no longer move past the id it would return.
    pub fn allocate_id(&mut self) -> Result<MemoryId, IdSpaceExhausted> {
        let id = if self.next_id == 0 {
            self.max_id().checked_add(1).ok_or(IdSpaceExhausted)?
        } else {
            self.next_id
        };
        self.next_id = id.checked_add(1).ok_or(IdSpaceExhausted)?;
        Ok(id)
    }

    /// Appends a record to the collection matching its kind.
    pub fn push(&mut self, record: MemoryRecord) {
        match record {
            MemoryRecord::Photo(photo) => self.photos.push(photo),
            MemoryRecord::Video(video) => self.videos.push(video),
            MemoryRecord::Journal(journal) => self.journals.push(journal),
        }
    }

    /// Removes the first record of `kind` with `id`.
    pub fn remove(&mut self, kind: MemoryKind, id: MemoryId) -> Option<MemoryRecord> {
        match kind {
            MemoryKind::Photo => remove_first(&mut self.photos, id).map(MemoryRecord::Photo),
            MemoryKind::Video => remove_first(&mut self.videos, id).map(MemoryRecord::Video),
            MemoryKind::Journal => {
                remove_first(&mut self.journals, id).map(MemoryRecord::Journal)
            }
        }
    }

    /// Replaces the stored record with the same kind and id, keeping its
    /// position. Returns `false` when no such record exists.
    pub fn replace(&mut self, record: MemoryRecord) -> bool {
        match record {
            MemoryRecord::Photo(photo) => replace_first(&mut self.photos, photo),
            MemoryRecord::Video(video) => replace_first(&mut self.videos, video),
            MemoryRecord::Journal(journal) => replace_first(&mut self.journals, journal),
        }
    }

    /// Repairs ids and the counter after decoding.
    ///
    /// Records with id `0`, or repeating an id already seen earlier in the same
    /// collection, receive fresh ids. Returns how many records were re-keyed.
    ///
    /// Fails when a stored id or a fresh id would leave no room for the
    /// counter; `self` may be partially re-keyed in that case.
    pub fn normalize(&mut self) -> Result<usize, IdSpaceExhausted> {
        let floor = self.max_id().checked_add(1).ok_or(IdSpaceExhausted)?;
        if self.next_id < floor {
            self.next_id = floor;
        }

        let mut next_id = self.next_id;
        let mut rekeyed = rekey_collection(&mut self.photos, &mut next_id)?;
        rekeyed += rekey_collection(&mut self.videos, &mut next_id)?;
        rekeyed += rekey_collection(&mut self.journals, &mut next_id)?;
        self.next_id = next_id;
        Ok(rekeyed)
    }

    fn max_id(&self) -> MemoryId {
        self.iter().map(|memory| memory.id()).max().unwrap_or(0)
    }
}

fn remove_first<T: Memory>(items: &mut Vec<T>, id: MemoryId) -> Option<T> {
    let index = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(index))
}

fn replace_first<T: Memory>(items: &mut [T], replacement: T) -> bool {
    match items.iter_mut().find(|item| item.id() == replacement.id()) {
        Some(slot) => {
            *slot = replacement;
            true
        }
        None => false,
    }
}

fn rekey_collection<T: Memory>(
    items: &mut [T],
    next_id: &mut MemoryId,
) -> Result<usize, IdSpaceExhausted> {
    let mut seen = HashSet::new();
    let mut rekeyed = 0;
    for item in items.iter_mut() {
        if item.id() == 0 || !seen.insert(item.id()) {
            let id = *next_id;
            *next_id = id.checked_add(1).ok_or(IdSpaceExhausted)?;
            item.set_id(id);
            seen.insert(id);
            rekeyed += 1;
        }
    }
    Ok(rekeyed)
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{IdSpaceExhausted, MemoryState};
    use crate::model::memory::{MemoryId, MemoryKind, MemoryRecord, Photo, Video};

    #[test]
    fn seed_has_one_record_per_kind_and_counter_past_ids() {
        let seed = MemoryState::seed();
        assert_eq!(seed.counts().total, 3);
        assert_eq!(seed.photos[0].id, 1);
        assert_eq!(seed.videos[0].date, "2022-12-25");
        assert_eq!(seed.next_id, 2);
    }

    #[test]
    fn allocate_id_is_strictly_increasing_across_kinds() {
        let mut state = MemoryState::seed();
        let first = state.allocate_id().unwrap();
        let second = state.allocate_id().unwrap();
        assert!(second > first);
        assert!(first > 1);
    }

    #[test]
    fn normalize_rekeys_missing_and_duplicate_ids() {
        let mut state = MemoryState {
            photos: vec![
                Photo { id: 7, ..Photo::default() },
                Photo { id: 7, ..Photo::default() },
                Photo { id: 0, ..Photo::default() },
            ],
            ..MemoryState::default()
        };

        let rekeyed = state.normalize().unwrap();

        assert_eq!(rekeyed, 2);
        let ids: Vec<_> = state.photos.iter().map(|photo| photo.id).collect();
        assert_eq!(ids, vec![7, 8, 9]);
        assert_eq!(state.next_id, 10);
    }

    #[test]
    fn normalize_keeps_larger_persisted_counter() {
        let mut state = MemoryState {
            photos: vec![Photo { id: 3, ..Photo::default() }],
            next_id: 40,
            ..MemoryState::default()
        };
        assert_eq!(state.normalize(), Ok(0));
        assert_eq!(state.next_id, 40);
    }

    #[test]
    fn normalize_rejects_id_at_top_of_range() {
        let mut state = MemoryState {
            photos: vec![Photo { id: MemoryId::MAX, ..Photo::default() }],
            ..MemoryState::default()
        };
        assert_eq!(state.normalize(), Err(IdSpaceExhausted));
    }

    #[test]
    fn normalize_rejects_rekey_past_top_of_range() {
        let mut state = MemoryState {
            photos: vec![Photo { id: MemoryId::MAX - 1, ..Photo::default() }],
            videos: vec![Video { id: 0, ..Video::default() }],
            ..MemoryState::default()
        };
        assert_eq!(state.normalize(), Err(IdSpaceExhausted));
    }

    #[test]
    fn allocate_id_fails_instead_of_wrapping() {
        let mut state = MemoryState {
            photos: vec![Photo { id: MemoryId::MAX - 1, ..Photo::default() }],
            ..MemoryState::default()
        };
        state.normalize().unwrap();
        assert_eq!(state.next_id, MemoryId::MAX);

        assert_eq!(state.allocate_id(), Err(IdSpaceExhausted));
        assert_eq!(state.next_id, MemoryId::MAX);
    }

    #[test]
    fn replace_keeps_position_and_reports_missing() {
        let mut state = MemoryState::seed();
        let mut photo = state.photos[0].clone();
        photo.title = "Renamed".to_string();

        assert!(state.replace(MemoryRecord::Photo(photo)));
        assert_eq!(state.photos[0].title, "Renamed");

        let missing = Photo { id: 999, ..Photo::default() };
        assert!(!state.replace(MemoryRecord::Photo(missing)));
        assert_eq!(state.len(MemoryKind::Photo), 1);
    }
}
