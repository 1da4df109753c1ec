//! `memory-gallery` command-line host.
//!
//! Opens the SQLite-backed store, runs one command, prints the result and
//! any notifications the store raised.

mod cli;
mod commands;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use gallery_core::{
    init_logging, GalleryConfig, MemoryStore, NotificationLevel, NotificationLog, SqliteKvStore,
};
use log::info;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| anyhow!("log directory is not valid UTF-8: {}", log_dir.display()))?;
        init_logging(&config.log_level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let storage = SqliteKvStore::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let notifications = NotificationLog::new();
    let mut store = MemoryStore::open_with_config(storage, &config).with_sink(notifications.clone());
    info!(
        "event=cli_start module=cli status=ok db={}",
        config.db_path.display()
    );

    let outcome = commands::run(cli.command, &mut store, &config, cli.json);
    print_notifications(&notifications);
    outcome
}

fn build_config(cli: &Cli) -> Result<GalleryConfig> {
    let mut config = GalleryConfig {
        db_path: cli.db.clone(),
        ..GalleryConfig::default()
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        let dir = if dir.is_absolute() {
            dir.clone()
        } else {
            std::env::current_dir()
                .context("cannot determine CWD")?
                .join(dir)
        };
        config.log_dir = Some(dir);
    }
    Ok(config)
}

fn print_notifications(notifications: &NotificationLog) {
    for notification in notifications.drain() {
        let prefix = match notification.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
        };
        eprintln!("{prefix}: {}", notification.message);
    }
}
