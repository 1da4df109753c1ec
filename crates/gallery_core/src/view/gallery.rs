//! Public gallery projections: cards, timeline, lightbox, counts.

use crate::model::memory::{MemoryId, MemoryKind, MemoryRef};
use crate::model::state::{MemoryCounts, MemoryState};
use crate::store::query::{sort_memories, MemoryQuery, SortOrder, Timeline};
use crate::view::format::{format_long_date, summarize, SUMMARY_MAX_CHARS};
use serde::Serialize;

const JOURNAL_READ_TIME_LABEL: &str = "5 min read";

/// Search, category filter, and sort selection of the gallery page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryFilter {
    /// `None` or `"all"` shows every category.
    pub category: Option<String>,
    pub search: String,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoCard {
    pub id: MemoryId,
    pub title: String,
    pub caption: String,
    pub image: String,
    pub date_label: String,
    pub tags: Vec<String>,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoCard {
    pub id: MemoryId,
    pub title: String,
    pub description: String,
    pub url: String,
    pub date_label: String,
    pub tags: Vec<String>,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalCard {
    pub id: MemoryId,
    pub title: String,
    pub content: String,
    pub date_label: String,
    pub tags: Vec<String>,
    pub category: String,
    pub read_time_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    pub kind: MemoryKind,
    pub id: MemoryId,
    /// `📷 Photo`, `🎥 Video`, or `📖 Journal`.
    pub kind_label: &'static str,
    pub title: String,
    pub date_label: String,
    pub summary: String,
    pub tags: Vec<String>,
}

/// Enlarged photo shown when a card is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lightbox {
    pub image: String,
    pub caption: String,
}

/// Read-only projection of one state snapshot under one filter.
#[derive(Debug, Clone)]
pub struct GalleryView<'a> {
    state: &'a MemoryState,
    filter: GalleryFilter,
}

impl<'a> GalleryView<'a> {
    pub fn new(state: &'a MemoryState) -> Self {
        Self::with_filter(state, GalleryFilter::default())
    }

    pub fn with_filter(state: &'a MemoryState, filter: GalleryFilter) -> Self {
        Self { state, filter }
    }

    pub fn filter(&self) -> &GalleryFilter {
        &self.filter
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.filter.category = category;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.filter.sort = sort;
    }

    pub fn photo_cards(&self) -> Vec<PhotoCard> {
        self.visible(MemoryKind::Photo)
            .into_iter()
            .filter_map(|memory| match memory {
                MemoryRef::Photo(photo) => Some(PhotoCard {
                    id: photo.id,
                    title: photo.title.clone(),
                    caption: photo.caption.clone(),
                    image: photo.image.clone(),
                    date_label: format_long_date(&photo.date),
                    tags: photo.tags.clone(),
                    category: photo.category.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn video_cards(&self) -> Vec<VideoCard> {
        self.visible(MemoryKind::Video)
            .into_iter()
            .filter_map(|memory| match memory {
                MemoryRef::Video(video) => Some(VideoCard {
                    id: video.id,
                    title: video.title.clone(),
                    description: video.description.clone(),
                    url: video.url.clone(),
                    date_label: format_long_date(&video.date),
                    tags: video.tags.clone(),
                    category: video.category.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn journal_cards(&self) -> Vec<JournalCard> {
        self.visible(MemoryKind::Journal)
            .into_iter()
            .filter_map(|memory| match memory {
                MemoryRef::Journal(journal) => Some(JournalCard {
                    id: journal.id,
                    title: journal.title.clone(),
                    content: journal.content.clone(),
                    date_label: format_long_date(&journal.date),
                    tags: journal.tags.clone(),
                    category: journal.category.clone(),
                    read_time_label: JOURNAL_READ_TIME_LABEL,
                }),
                _ => None,
            })
            .collect()
    }

    /// Unfiltered timeline, newest first.
    pub fn timeline_items(&self) -> Vec<TimelineItem> {
        Timeline::new(self.state)
            .iter()
            .map(|memory| TimelineItem {
                kind: memory.kind(),
                id: memory.id(),
                kind_label: kind_label(memory.kind()),
                title: memory.title().to_string(),
                date_label: format_long_date(memory.date()),
                summary: timeline_summary(memory),
                tags: memory.tags().to_vec(),
            })
            .collect()
    }

    pub fn counts(&self) -> MemoryCounts {
        self.state.counts()
    }

    /// Lightbox content for a photo, `None` when the id is unknown.
    pub fn lightbox(&self, id: MemoryId) -> Option<Lightbox> {
        match self.state.find(MemoryKind::Photo, id)? {
            MemoryRef::Photo(photo) => Some(Lightbox {
                image: photo.image.clone(),
                caption: photo.caption.clone(),
            }),
            _ => None,
        }
    }

    fn visible(&self, kind: MemoryKind) -> Vec<MemoryRef<'a>> {
        let mut query = MemoryQuery::new().kind(kind).text(self.filter.search.as_str());
        if let Some(category) = &self.filter.category {
            query = query.category(category.as_str());
        }
        sort_memories(query.run(self.state), self.filter.sort)
    }
}

fn kind_label(kind: MemoryKind) -> &'static str {
    match kind {
        MemoryKind::Photo => "📷 Photo",
        MemoryKind::Video => "🎥 Video",
        MemoryKind::Journal => "📖 Journal",
    }
}

fn timeline_summary(memory: MemoryRef<'_>) -> String {
    match memory {
        MemoryRef::Journal(journal) => summarize(&journal.content, SUMMARY_MAX_CHARS),
        other => format!("{}...", other.body()),
    }
}
