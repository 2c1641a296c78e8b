// Ingestion pipeline: classify → parse → nodes → identities → edges, one
// fresh parser per document. Failing documents are logged and skipped.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::TrellisConfig;
use crate::error::{ParseError, RegistryError, TrellisError};
use crate::graph::GraphBundle;
use crate::registry::Registry;
use crate::types::{Document, DocumentType};

/// Outcome of one batch. Individual failures don't abort the batch.
#[derive(Debug, Default)]
pub struct IngestResult {
    pub bundles: Vec<GraphBundle>,
    /// `(source, error)` for every skipped document.
    pub failures: Vec<(String, TrellisError)>,
    pub duration: Duration,
}

impl IngestResult {
    pub fn node_count(&self) -> usize {
        self.bundles.iter().map(|b| b.nodes.len()).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.bundles.iter().map(|b| b.edges.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct IngestPipeline {
    registry: Registry,
    config: TrellisConfig,
}

impl IngestPipeline {
    pub fn new(registry: Registry, config: TrellisConfig) -> Self {
        Self { registry, config }
    }

    /// Pipeline over the registry enabled by `config`.
    pub fn from_config(config: TrellisConfig) -> crate::error::Result<Self> {
        let registry = Registry::from_config(&config)?;
        Ok(Self::new(registry, config))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Ingest a batch of documents.
    ///
    /// Returns `Err` only when the batch as a whole stops: the context was
    /// cancelled, or `ingest.fail_fast` is set and a document failed.
    #[instrument(skip_all, name = "ingest", fields(documents = docs.len()))]
    pub async fn ingest(
        &self,
        ctx: &CancellationToken,
        docs: Vec<Document>,
    ) -> crate::error::Result<IngestResult> {
        let start = Instant::now();
        let mut result = IngestResult::default();

        for doc in docs {
            if ctx.is_cancelled() {
                return Err(ParseError::Cancelled.into());
            }
            let source = source_label(&doc);
            match self.ingest_document(ctx, doc).await {
                Ok(bundle) => result.bundles.push(bundle),
                Err(e @ TrellisError::Parse(ParseError::Cancelled)) => return Err(e),
                Err(e) if self.config.ingest.fail_fast => return Err(e),
                Err(e) => {
                    warn!(source = %source, error = %e, "Skipping document");
                    result.failures.push((source, e));
                }
            }
        }

        result.duration = start.elapsed();
        info!(
            bundles = result.bundles.len(),
            nodes = result.node_count(),
            edges = result.edge_count(),
            errors = result.failures.len(),
            duration = ?result.duration,
            "Ingestion complete"
        );
        Ok(result)
    }

    /// Assemble the graph fragment for a single document.
    ///
    /// A document of type [`DocumentType::Unknown`] is classified first.
    pub async fn ingest_document(
        &self,
        ctx: &CancellationToken,
        mut doc: Document,
    ) -> crate::error::Result<GraphBundle> {
        let limit = self.config.ingest.max_blob_bytes;
        if doc.blob.len() > limit {
            return Err(RegistryError::BlobTooLarge {
                size: doc.blob.len(),
                limit,
            }
            .into());
        }

        let source = source_label(&doc);
        if doc.doc_type == DocumentType::Unknown {
            doc.doc_type = self.registry.guess(&doc.blob, doc.format);
            if doc.doc_type == DocumentType::Unknown {
                return Err(RegistryError::Unclassified {
                    source_name: source,
                }
                .into());
            }
            debug!(source = %source, doc_type = %doc.doc_type, "Classified document");
        }

        let mut parser = self.registry.parser_for(doc.doc_type)?;
        parser.parse(ctx, &doc).await?;

        let nodes = parser.create_nodes(ctx);
        let identities = parser.get_identities(ctx);
        let edges = parser.create_edges(ctx, &identities);
        let identifiers = match parser.get_identifiers(ctx) {
            Ok(ids) => Some(ids),
            Err(ParseError::NotImplemented { .. }) => None,
            Err(e) => return Err(e.into()),
        };

        debug!(
            source = %source,
            nodes = nodes.len(),
            edges = edges.len(),
            "Assembled graph fragment"
        );
        Ok(GraphBundle {
            source,
            nodes,
            edges,
            identifiers,
        })
    }
}

fn source_label(doc: &Document) -> String {
    let info = &doc.source_information;
    match (info.collector.is_empty(), info.source.is_empty()) {
        (_, true) => "<unknown>".to_string(),
        (true, false) => info.source.clone(),
        (false, false) => format!("{}:{}", info.collector, info.source),
    }
}
