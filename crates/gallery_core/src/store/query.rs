//! Filtering, ordering, and the merged timeline.
//!
//! # Invariants
//! - All orderings are stable: equal keys keep collection order (photos,
//!   videos, journals) and insertion order within a collection.
//! - Records whose date does not parse sort after every dated record.

use crate::model::memory::{MemoryKind, MemoryRef};
use crate::model::state::MemoryState;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Category value that matches every record.
pub const ALL_CATEGORIES: &str = "all";

/// Composable record filter.
///
/// Unset fields match everything. Category matching is exact; text matching
/// is a case-insensitive substring search over title and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryQuery {
    pub kind: Option<MemoryKind>,
    pub category: Option<String>,
    pub text: Option<String>,
}

impl MemoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: MemoryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Runs this query over `state`, in collection order.
    pub fn run<'a>(&self, state: &'a MemoryState) -> Vec<MemoryRef<'a>> {
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty() && *category != ALL_CATEGORIES);
        let needle = self
            .text
            .as_deref()
            .map(|text| text.trim().to_lowercase())
            .filter(|text| !text.is_empty());

        let candidates: Box<dyn Iterator<Item = MemoryRef<'a>> + 'a> = match self.kind {
            Some(kind) => state.iter_kind(kind),
            None => Box::new(state.iter()),
        };

        candidates
            .filter(|memory| category.map_or(true, |category| memory.category() == category))
            .filter(|memory| {
                needle
                    .as_deref()
                    .map_or(true, |needle| memory.matches_text(needle))
            })
            .collect()
    }
}

/// Display ordering for record lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Date descending.
    #[default]
    Newest,
    /// Date ascending.
    Oldest,
    /// Title, case-insensitive ascending.
    Title,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" | "date-desc" => Some(Self::Newest),
            "oldest" | "date-asc" => Some(Self::Oldest),
            "title" | "name" => Some(Self::Title),
            _ => None,
        }
    }
}

/// Stable sort of `memories` by `order`.
pub fn sort_memories(memories: Vec<MemoryRef<'_>>, order: SortOrder) -> Vec<MemoryRef<'_>> {
    match order {
        SortOrder::Newest | SortOrder::Oldest => {
            let newest_first = order == SortOrder::Newest;
            let mut keyed: Vec<_> = memories
                .into_iter()
                .map(|memory| (memory.parsed_date(), memory))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| compare_dates(*a, *b, newest_first));
            keyed.into_iter().map(|(_, memory)| memory).collect()
        }
        SortOrder::Title => {
            let mut keyed: Vec<_> = memories
                .into_iter()
                .map(|memory| (memory.title().to_lowercase(), memory))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
            keyed.into_iter().map(|(_, memory)| memory).collect()
        }
    }
}

fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>, newest_first: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if newest_first => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// All records across kinds, newest first.
///
/// Holds borrowed references only; iterate it as many times as needed.
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    entries: Vec<MemoryRef<'a>>,
}

impl<'a> Timeline<'a> {
    pub fn new(state: &'a MemoryState) -> Self {
        Self {
            entries: sort_memories(state.iter().collect(), SortOrder::Newest),
        }
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, MemoryRef<'a>>> {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'t, 'a> IntoIterator for &'t Timeline<'a> {
    type Item = MemoryRef<'a>;
    type IntoIter = std::iter::Copied<std::slice::Iter<'t, MemoryRef<'a>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
