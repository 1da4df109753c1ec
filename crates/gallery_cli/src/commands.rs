use std::path::Path;

use anyhow::{bail, Context, Result};
use gallery_core::{
    parse_tags, AdminController, GalleryConfig, GalleryFilter, GalleryView, KeyValueStore,
    MemoryCounts, MemoryForm, MemoryId, MemoryKind, MemoryRecord, MemoryStore, SortOrder,
};
use serde::Serialize;
use serde_json::json;

use crate::cli::{AddFields, Commands, EditFields, KindArg};

pub fn run<S: KeyValueStore>(
    command: Commands,
    store: &mut MemoryStore<S>,
    config: &GalleryConfig,
    json: bool,
) -> Result<()> {
    match command {
        Commands::List {
            kind,
            category,
            sort,
        } => list(store, kind, category, String::new(), sort, json),
        Commands::Search {
            text,
            kind,
            category,
            sort,
        } => list(store, kind, category, text, sort, json),
        Commands::Show { kind, id } => {
            let kind = MemoryKind::from(kind);
            let Some(memory) = store.find(kind, id) else {
                bail!("no {kind} with id {id}");
            };
            let record = memory.to_record();
            if json {
                print_json(&record)?;
            } else {
                print_record(&record);
            }
            Ok(())
        }
        Commands::Timeline { limit } => {
            let view = GalleryView::new(store.state());
            let mut items = view.timeline_items();
            if let Some(limit) = limit {
                items.truncate(limit);
            }
            if json {
                return print_json(&items);
            }
            for item in &items {
                println!(
                    "{}  {}  #{} {}",
                    item.date_label, item.kind_label, item.id, item.title
                );
                println!("    {}", item.summary);
            }
            Ok(())
        }
        Commands::Stats => {
            let admin = AdminController::new(store, config);
            let counts = admin.dashboard();
            if json {
                return print_json(&counts);
            }
            print_counts(&counts);
            Ok(())
        }
        Commands::Categories => {
            let categories = store.categories();
            let tags = store.tags();
            if json {
                return print_json(&json!({ "categories": categories, "tags": tags }));
            }
            println!("categories: {}", categories.join(", "));
            println!("tags: {}", tags.join(", "));
            Ok(())
        }
        Commands::Add { kind, fields } => add(store, config, kind, fields, json),
        Commands::Edit { kind, id, fields } => {
            let kind = MemoryKind::from(kind);
            let mut admin = AdminController::new(store, config);
            let Some(mut record) = admin.edit_target(kind, id) else {
                bail!("no {kind} with id {id}");
            };
            apply_edits(&mut record, fields);
            if !admin.edit(record)? {
                bail!("no {kind} with id {id}");
            }
            Ok(())
        }
        Commands::Delete { kind, id, yes } => {
            let kind = MemoryKind::from(kind);
            if !yes {
                bail!("refusing to delete {kind} #{id} without --yes");
            }
            let mut admin = AdminController::new(store, config);
            if !admin.delete(kind, id)? {
                eprintln!("nothing to delete: no {kind} with id {id}");
            }
            Ok(())
        }
        Commands::Export { out } => {
            let admin = AdminController::new(store, config);
            let backup = admin.export_backup()?;
            let out = out.unwrap_or_else(|| backup.file_name.clone().into());
            write_file(&out, &backup.bytes)?;
            eprintln!("wrote {}", out.display());
            Ok(())
        }
        Commands::Import { input } => {
            let bytes = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let mut admin = AdminController::new(store, config);
            let counts = admin
                .restore_backup(&bytes)
                .with_context(|| format!("failed to restore {}", input.display()))?;
            if json {
                return print_json(&counts);
            }
            print_counts(&counts);
            Ok(())
        }
    }
}

fn list<S: KeyValueStore>(
    store: &MemoryStore<S>,
    kind: Option<KindArg>,
    category: Option<String>,
    search: String,
    sort: SortOrder,
    json: bool,
) -> Result<()> {
    let view = GalleryView::with_filter(
        store.state(),
        GalleryFilter {
            category,
            search,
            sort,
        },
    );
    let kinds = match kind {
        Some(kind) => vec![MemoryKind::from(kind)],
        None => MemoryKind::ALL.to_vec(),
    };

    if json {
        let mut sections = serde_json::Map::new();
        for kind in kinds {
            let cards = match kind {
                MemoryKind::Photo => serde_json::to_value(view.photo_cards())?,
                MemoryKind::Video => serde_json::to_value(view.video_cards())?,
                MemoryKind::Journal => serde_json::to_value(view.journal_cards())?,
            };
            sections.insert(format!("{}s", kind.as_str()), cards);
        }
        return print_json(&sections);
    }

    for kind in kinds {
        println!("{}s", kind.display_name());
        let rows: Vec<String> = match kind {
            MemoryKind::Photo => view
                .photo_cards()
                .into_iter()
                .map(|c| card_line(c.id, &c.date_label, &c.title, &c.tags))
                .collect(),
            MemoryKind::Video => view
                .video_cards()
                .into_iter()
                .map(|c| card_line(c.id, &c.date_label, &c.title, &c.tags))
                .collect(),
            MemoryKind::Journal => view
                .journal_cards()
                .into_iter()
                .map(|c| {
                    let line = card_line(c.id, &c.date_label, &c.title, &c.tags);
                    format!("{line}  ({})", c.read_time_label)
                })
                .collect(),
        };
        if rows.is_empty() {
            println!("  (none)");
        }
        for row in rows {
            println!("{row}");
        }
    }
    Ok(())
}

fn card_line(id: MemoryId, date_label: &str, title: &str, tags: &[String]) -> String {
    format!("  #{id}  {date_label}  {title} [{}]", tags.join(", "))
}

fn add<S: KeyValueStore>(
    store: &mut MemoryStore<S>,
    config: &GalleryConfig,
    kind: KindArg,
    fields: AddFields,
    json: bool,
) -> Result<()> {
    let kind = MemoryKind::from(kind);
    let form = MemoryForm {
        title: fields.title,
        date: fields.date,
        media: fields.media,
        text: fields.text,
        tags: fields.tags,
        category: fields.category,
    };
    let mut admin = AdminController::new(store, config);
    let created = admin.add_from_form(kind, form)?;
    if json {
        return print_json(&created);
    }
    println!("added {kind} #{}", created.id());
    Ok(())
}

fn apply_edits(record: &mut MemoryRecord, fields: EditFields) {
    let tags = fields.tags.as_deref().map(parse_tags);
    let (title, date, record_tags, category, media, text) = match record {
        MemoryRecord::Photo(photo) => (
            &mut photo.title,
            &mut photo.date,
            &mut photo.tags,
            &mut photo.category,
            Some(&mut photo.image),
            &mut photo.caption,
        ),
        MemoryRecord::Video(video) => (
            &mut video.title,
            &mut video.date,
            &mut video.tags,
            &mut video.category,
            Some(&mut video.url),
            &mut video.description,
        ),
        MemoryRecord::Journal(journal) => (
            &mut journal.title,
            &mut journal.date,
            &mut journal.tags,
            &mut journal.category,
            None,
            &mut journal.content,
        ),
    };

    if let Some(value) = fields.title {
        *title = value;
    }
    if let Some(value) = fields.date {
        *date = value;
    }
    if let Some(value) = tags {
        *record_tags = value;
    }
    if let Some(value) = fields.category {
        *category = value;
    }
    if let (Some(slot), Some(value)) = (media, fields.media) {
        *slot = value;
    }
    if let Some(value) = fields.text {
        *text = value;
    }
}

fn print_record(record: &MemoryRecord) {
    let memory = record.as_memory_ref();
    println!("{} #{}", memory.kind().display_name(), memory.id());
    println!("title:    {}", memory.title());
    println!("date:     {}", memory.date());
    println!("category: {}", memory.category());
    println!("tags:     {}", memory.tags().join(", "));
    match record {
        MemoryRecord::Photo(photo) => println!("image:    {}", photo.image),
        MemoryRecord::Video(video) => println!("url:      {}", video.url),
        MemoryRecord::Journal(_) => {}
    }
    println!();
    println!("{}", memory.body());
}

fn print_counts(counts: &MemoryCounts) {
    println!("photos:   {}", counts.photos);
    println!("videos:   {}", counts.videos);
    println!("journals: {}", counts.journals);
    println!("total:    {}", counts.total);
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::apply_edits;
    use crate::cli::EditFields;
    use gallery_core::{JournalEntry, MemoryRecord, Photo};

    fn no_edits() -> EditFields {
        EditFields {
            title: None,
            date: None,
            media: None,
            text: None,
            tags: None,
            category: None,
        }
    }

    #[test]
    fn apply_edits_only_touches_given_fields() {
        let mut record = MemoryRecord::Photo(Photo {
            id: 4,
            title: "Old".to_string(),
            caption: "kept".to_string(),
            tags: vec!["a".to_string()],
            ..Photo::default()
        });
        apply_edits(
            &mut record,
            EditFields {
                title: Some("New".to_string()),
                tags: Some("x, y".to_string()),
                media: Some("https://example.com/new.jpg".to_string()),
                ..no_edits()
            },
        );

        match record {
            MemoryRecord::Photo(photo) => {
                assert_eq!(photo.id, 4);
                assert_eq!(photo.title, "New");
                assert_eq!(photo.caption, "kept");
                assert_eq!(photo.tags, vec!["x".to_string(), "y".to_string()]);
                assert_eq!(photo.image, "https://example.com/new.jpg");
            }
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn apply_edits_ignores_media_for_journals() {
        let mut record = MemoryRecord::Journal(JournalEntry {
            content: "before".to_string(),
            ..JournalEntry::default()
        });
        apply_edits(
            &mut record,
            EditFields {
                media: Some("ignored".to_string()),
                text: Some("after".to_string()),
                ..no_edits()
            },
        );
        match record {
            MemoryRecord::Journal(journal) => assert_eq!(journal.content, "after"),
            other => panic!("unexpected record {other:?}"),
        }
    }
}
