use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gallery_core::{MemoryId, MemoryKind, SortOrder};

/// Memory gallery: photos, videos and journal entries in one local store.
#[derive(Parser)]
#[command(name = "memory-gallery", version, about)]
pub struct Cli {
    /// SQLite database holding the gallery snapshot.
    #[arg(
        long,
        env = "MEMORY_GALLERY_DB",
        default_value = gallery_core::config::DEFAULT_DB_FILE_NAME,
        global = true
    )]
    pub db: PathBuf,

    /// Directory for rolling log files. Logging is off when omitted.
    #[arg(long, env = "MEMORY_GALLERY_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long, env = "MEMORY_GALLERY_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Photo,
    Video,
    Journal,
}

impl From<KindArg> for MemoryKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Photo => MemoryKind::Photo,
            KindArg::Video => MemoryKind::Video,
            KindArg::Journal => MemoryKind::Journal,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List gallery cards, optionally filtered by kind and category.
    List {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        #[arg(long)]
        category: Option<String>,

        /// newest, oldest or title.
        #[arg(long, default_value = "newest", value_parser = parse_sort)]
        sort: SortOrder,
    },

    /// Case-insensitive search over titles and text.
    Search {
        text: String,

        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long, default_value = "newest", value_parser = parse_sort)]
        sort: SortOrder,
    },

    /// Show one record in full.
    Show {
        #[arg(value_enum)]
        kind: KindArg,
        id: MemoryId,
    },

    /// All records, newest first.
    Timeline {
        /// Show at most this many entries.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Record counts per kind.
    Stats,

    /// Categories and tags currently in use.
    Categories,

    /// Add a new record.
    Add {
        #[arg(value_enum)]
        kind: KindArg,

        #[command(flatten)]
        fields: AddFields,
    },

    /// Replace fields of an existing record.
    Edit {
        #[arg(value_enum)]
        kind: KindArg,
        id: MemoryId,

        #[command(flatten)]
        fields: EditFields,
    },

    /// Delete a record.
    Delete {
        #[arg(value_enum)]
        kind: KindArg,
        id: MemoryId,

        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },

    /// Write a JSON backup of the whole gallery.
    Export {
        /// Output path; defaults to `memory-gallery-backup.json`.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Replace the gallery with a JSON backup.
    Import { input: PathBuf },
}

#[derive(Args)]
pub struct AddFields {
    #[arg(long)]
    pub title: String,

    /// YYYY-MM-DD.
    #[arg(long)]
    pub date: String,

    /// Image URL for photos, embed URL for videos.
    #[arg(long, default_value = "")]
    pub media: String,

    /// Caption, description or journal content.
    #[arg(long, default_value = "")]
    pub text: String,

    /// Comma-separated tags.
    #[arg(long, default_value = "")]
    pub tags: String,

    #[arg(long, default_value = "family")]
    pub category: String,
}

#[derive(Args)]
pub struct EditFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub media: Option<String>,

    #[arg(long)]
    pub text: Option<String>,

    /// Comma-separated tags; replaces the current list.
    #[arg(long)]
    pub tags: Option<String>,

    #[arg(long)]
    pub category: Option<String>,
}

fn parse_sort(value: &str) -> Result<SortOrder, String> {
    SortOrder::parse(value)
        .ok_or_else(|| format!("unknown sort `{value}`; expected newest|oldest|title"))
}
