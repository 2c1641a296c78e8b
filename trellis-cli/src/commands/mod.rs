pub mod classify;
pub mod ingest;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;

use trellis_core::config::TrellisConfig;
use trellis_core::types::{Document, FormatType, SourceInformation};

pub use ingest::PartialFailure;

/// Collector name recorded on documents read from the local filesystem.
const FILE_COLLECTOR: &str = "file";

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the detected document type of each file
    Classify(classify::ClassifyArgs),
    /// Parse files and print the graph fragments they produce as JSON
    Ingest(ingest::IngestArgs),
}

pub async fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Classify(args) => classify::run(args).await,
        Command::Ingest(args) => ingest::run(args).await,
    }
}

/// Read a file into an unclassified document.
pub(crate) fn read_document(path: &Path, format: FormatType) -> anyhow::Result<Document> {
    let blob = std::fs::read(path)
        .with_context(|| format!("Cannot read input: {}", path.display()))?;
    Ok(Document::unclassified(
        blob,
        format,
        SourceInformation {
            collector: FILE_COLLECTOR.to_string(),
            source: path.display().to_string(),
        },
    ))
}

/// Load the config at `path`, or defaults when none was given.
pub(crate) fn load_config(path: Option<&PathBuf>) -> anyhow::Result<TrellisConfig> {
    match path {
        Some(p) => TrellisConfig::load(p)
            .with_context(|| format!("Cannot load config: {}", p.display())),
        None => Ok(TrellisConfig::default()),
    }
}
