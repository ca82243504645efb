//! Chapterboard bulk import
//!
//! Replaces every stored chapter with the records of a JSON file.

use anyhow::{Context, Result};
use chapterboard_server::{bootstrap, config::ServerConfig, import, logging};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "chapterboard-import")]
#[command(version, about = "Replace all chapters with the records of a JSON file", long_about = None)]
struct Cli {
    /// JSON file holding an array of chapter records
    #[arg(short, long, default_value = "./all_subjects_chapter_data.json")]
    file: PathBuf,

    /// Leave cached list responses in place
    #[arg(long)]
    keep_cache: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ServerConfig::load()?;
    logging::init_tracing(&config)?;

    info!("Reading {}", cli.file.display());
    let raw = tokio::fs::read_to_string(&cli.file)
        .await
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let chapters = import::parse_import(&raw)?;
    info!("Found {} records to import", chapters.len());

    if config.database_url.is_none() {
        warn!("DATABASE_URL is not set; the import goes to an in-memory store and is lost on exit");
    }
    let repository = bootstrap::init_repository(&config).await?;

    let cache = if cli.keep_cache {
        None
    } else {
        Some(bootstrap::init_cache(&config).await)
    };

    let summary = import::replace_all(repository.as_ref(), cache.as_deref(), chapters).await?;
    info!(
        "Removed {} chapters, imported {}",
        summary.removed, summary.inserted
    );
    if let Some(count) = summary.invalidated {
        info!("Cleared {} cached list responses", count);
    }

    Ok(())
}
