use tokio_util::sync::CancellationToken;

use crate::error::ParseError;
use crate::graph::{GraphEdge, GraphNode, IdentityNode};
use crate::types::{Document, DocumentType, IdentifierStrings};

/// Turns classified documents into graph nodes and edges.
///
/// A parser instance is single-use: the caller feeds it one unit of work
/// through [`parse`](Self::parse), reads [`create_nodes`](Self::create_nodes)
/// and then [`create_edges`](Self::create_edges), and drops it.
#[async_trait::async_trait]
pub trait DocumentParser: Send + std::fmt::Debug {
    /// The document type this parser was built for.
    fn document_type(&self) -> DocumentType;

    /// Decode `doc` and accumulate its nodes. May be called repeatedly.
    async fn parse(&mut self, ctx: &CancellationToken, doc: &Document) -> Result<(), ParseError>;

    /// Every accumulated node, in accumulation order. Idempotent.
    fn create_nodes(&self, ctx: &CancellationToken) -> Vec<GraphNode>;

    /// Edges between the accumulated nodes.
    fn create_edges(
        &self,
        ctx: &CancellationToken,
        found_identities: &[IdentityNode],
    ) -> Vec<GraphEdge>;

    /// Identity claims carried inside the accumulated documents.
    fn get_identities(&self, _ctx: &CancellationToken) -> Vec<IdentityNode> {
        Vec::new()
    }

    /// Identifier strings for cross-document correlation.
    fn get_identifiers(&self, _ctx: &CancellationToken) -> Result<IdentifierStrings, ParseError> {
        Err(ParseError::NotImplemented {
            operation: "get_identifiers",
            doc_type: self.document_type(),
        })
    }
}

/// Builds a fresh parser for one unit of work.
pub type ParserFactory = fn() -> Box<dyn DocumentParser>;

/// Reject documents routed to the wrong parser.
pub fn ensure_document_type(expected: DocumentType, doc: &Document) -> Result<(), ParseError> {
    if doc.doc_type == expected {
        Ok(())
    } else {
        Err(ParseError::TypeMismatch {
            expected,
            actual: doc.doc_type,
        })
    }
}

/// Fail fast once the caller has cancelled.
pub fn ensure_live(ctx: &CancellationToken) -> Result<(), ParseError> {
    if ctx.is_cancelled() {
        Err(ParseError::Cancelled)
    } else {
        Ok(())
    }
}
