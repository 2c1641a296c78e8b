// Integration test utilities and fixture management for Trellis.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use trellis_core::config::TrellisConfig;
use trellis_core::pipeline::{IngestPipeline, IngestResult};
use trellis_core::types::{Document, DocumentType, FormatType, SourceInformation};

/// The reference criticality score result.
pub const CRITICALITY_SCORE: &str = include_str!("../fixtures/criticality_score.json");
/// A second, unrelated repository with a numeric score.
pub const CRITICALITY_SCORE_BUSY: &str = include_str!("../fixtures/criticality_score_busy.json");
/// Decodes as a criticality score but has no repository url or license.
pub const CRITICALITY_SCORE_NO_REPO: &str =
    include_str!("../fixtures/criticality_score_no_repo.json");
/// An SPDX document: valid JSON, different schema.
pub const SPDX: &str = include_str!("../fixtures/spdx.json");
/// Truncated JSON.
pub const MALFORMED: &str = include_str!("../fixtures/malformed.json");

/// Absolute path of a file under `fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// A JSON document from `source`, with its type left for the registry to guess.
pub fn unclassified(blob: &str, source: &str) -> Document {
    Document::unclassified(
        blob.as_bytes().to_vec(),
        FormatType::Json,
        SourceInformation {
            collector: "fixture".into(),
            source: source.into(),
        },
    )
}

/// A JSON document declared as `doc_type`.
pub fn declared(blob: &str, doc_type: DocumentType, source: &str) -> Document {
    Document {
        doc_type,
        ..unclassified(blob, source)
    }
}

/// A temporary directory of document files for CLI tests.
#[derive(Debug)]
pub struct TestInputs {
    pub dir: tempfile::TempDir,
}

impl TestInputs {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write each `(file name, contents)` pair into a fresh temp dir.
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        for (name, contents) in files {
            std::fs::write(dir.path().join(name), contents).expect("write input file");
        }
        Self { dir }
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Run the default pipeline over `docs`.
pub async fn run_ingest(docs: Vec<Document>) -> anyhow::Result<IngestResult> {
    let pipeline = IngestPipeline::from_config(TrellisConfig::default())?;
    let ctx = CancellationToken::new();
    Ok(pipeline.ingest(&ctx, docs).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_exist_on_disk() {
        for name in [
            "criticality_score.json",
            "criticality_score_busy.json",
            "criticality_score_no_repo.json",
            "spdx.json",
            "malformed.json",
        ] {
            assert!(fixture_path(name).is_file(), "missing fixture {name}");
        }
    }

    #[test]
    fn inputs_are_written() {
        let inputs = TestInputs::with_files(&[("a.json", CRITICALITY_SCORE)]);
        let text = std::fs::read_to_string(inputs.file("a.json")).unwrap();
        assert_eq!(text, CRITICALITY_SCORE);
    }
}
