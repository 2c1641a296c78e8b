use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::info;

use trellis_core::pipeline::IngestPipeline;
use trellis_core::types::{DocumentType, FormatType};

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Document files to ingest
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Serialization format of the files: json, json_lines, xml
    #[arg(long, default_value = "json")]
    pub format: FormatType,

    /// Declare the document type instead of guessing it (e.g. criticality_score)
    #[arg(long = "type")]
    pub doc_type: Option<DocumentType>,

    /// Path to a trellis.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Some documents in the batch were skipped.
#[derive(thiserror::Error, Debug)]
#[error("{failed} of {total} documents failed")]
pub struct PartialFailure {
    pub failed: usize,
    pub total: usize,
}

pub async fn run(args: IngestArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.config.as_ref())?;
    let pipeline = IngestPipeline::from_config(config)?;

    let mut docs = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let mut doc = super::read_document(path, args.format)?;
        if let Some(doc_type) = args.doc_type {
            doc.doc_type = doc_type;
        }
        docs.push(doc);
    }
    let total = docs.len();

    let ctx = CancellationToken::new();
    let interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling ingestion");
            interrupt.cancel();
        }
    });

    let mut result = pipeline.ingest(&ctx, docs).await?;

    // Nothing succeeded: surface the first failure itself.
    if result.bundles.is_empty() && result.has_failures() {
        let (source, err) = result.failures.swap_remove(0);
        return Err(anyhow::Error::from(err).context(format!("Cannot ingest {source}")));
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&result.bundles)
    } else {
        serde_json::to_string(&result.bundles)
    }
    .context("Failed to serialize graph bundles")?;
    println!("{json}");

    if result.has_failures() {
        for (source, err) in &result.failures {
            eprintln!("  {source}: {err}");
        }
        return Err(PartialFailure {
            failed: result.failures.len(),
            total,
        }
        .into());
    }

    Ok(())
}
