// Criticality score parser: one metadata node per result, describing the
// repository's artifact node.

use std::collections::HashSet;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::graph::{
    ArtifactNode, DetailValue, Details, GraphEdge, GraphNode, IdentityNode, MetadataForEdge,
    MetadataNode,
};
use crate::schema::CriticalityScoreResult;
use crate::types::{Document, DocumentType, FormatType, IdentifierStrings};

use super::traits::{DocumentParser, ensure_document_type, ensure_live};

/// `metadata_type` tag on every node this parser emits.
pub const METADATA_TYPE: &str = "criticalityscore";

#[derive(Debug, Default)]
pub struct CriticalityScoreParser {
    /// Each metadata node alongside the artifact it describes.
    entries: Vec<(MetadataNode, ArtifactNode)>,
}

impl CriticalityScoreParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory for registry use.
    pub fn boxed() -> Box<dyn DocumentParser> {
        Box::new(Self::new())
    }
}

#[async_trait::async_trait]
impl DocumentParser for CriticalityScoreParser {
    fn document_type(&self) -> DocumentType {
        DocumentType::CriticalityScore
    }

    async fn parse(&mut self, ctx: &CancellationToken, doc: &Document) -> Result<(), ParseError> {
        ensure_live(ctx)?;
        ensure_document_type(DocumentType::CriticalityScore, doc)?;

        match doc.format {
            FormatType::Json => {
                let result = CriticalityScoreResult::from_slice(&doc.blob)?;
                if result.repo.url.is_empty() {
                    warn!(
                        source = %doc.source_information.source,
                        "criticality score has no repository url"
                    );
                }
                let (metadata, artifact) = assemble(&result);
                debug!(
                    id = %metadata.id,
                    artifact = %artifact.name,
                    source = %doc.source_information.source,
                    "Assembled criticality score"
                );
                self.entries.push((metadata, artifact));
                Ok(())
            }
            format => Err(ParseError::UnsupportedFormat {
                doc_type: DocumentType::CriticalityScore,
                format,
            }),
        }
    }

    fn create_nodes(&self, _ctx: &CancellationToken) -> Vec<GraphNode> {
        let metadata = self.entries.iter().map(|(m, _)| GraphNode::Metadata(m.clone()));
        let artifacts = self.entries.iter().map(|(_, a)| GraphNode::Artifact(a.clone()));
        metadata.chain(artifacts).collect()
    }

    // TODO: attach found identities once identity-aware edge kinds exist.
    fn create_edges(
        &self,
        _ctx: &CancellationToken,
        _found_identities: &[IdentityNode],
    ) -> Vec<GraphEdge> {
        self.entries
            .iter()
            .map(|(metadata, artifact)| {
                GraphEdge::MetadataFor(MetadataForEdge {
                    metadata_node: metadata.clone(),
                    for_artifact: artifact.clone(),
                })
            })
            .collect()
    }

    fn get_identifiers(&self, _ctx: &CancellationToken) -> Result<IdentifierStrings, ParseError> {
        let mut seen = HashSet::new();
        let mut ids = IdentifierStrings::default();
        for (_, artifact) in &self.entries {
            if seen.insert(artifact.name.as_str()) {
                ids.vcs_strings.push(artifact.name.clone());
            }
        }
        Ok(ids)
    }
}

fn assemble(result: &CriticalityScoreResult) -> (MetadataNode, ArtifactNode) {
    let artifact = ArtifactNode {
        name: source_uri(&result.repo.url),
    };
    let metadata = metadata_node(result, &artifact);
    (metadata, artifact)
}

fn metadata_node(result: &CriticalityScoreResult, artifact: &ArtifactNode) -> MetadataNode {
    let legacy = &result.legacy;
    let mut details = Details::new();
    let mut put = |key: &str, value: DetailValue| {
        details.insert(key.to_string(), value);
    };

    put("repo", artifact.name.as_str().into());
    put("language", result.repo.language.as_str().into());
    put("star_count", result.repo.star_count.into());
    put("closed_issues_count", legacy.closed_issues_count.into());
    put("commit_frequency", legacy.commit_frequency.into());
    put("contributor_count", legacy.contributor_count.into());
    put("created_since", legacy.created_since.into());
    put("github_mention_count", legacy.github_mention_count.into());
    put("issue_comment_frequency", legacy.issue_comment_frequency.into());
    put("org_count", legacy.org_count.into());
    put("recent_release_count", legacy.recent_release_count.into());
    put("updated_issues_count", legacy.updated_issues_count.into());
    put("updated_since", legacy.updated_since.into());
    put("score", result.default_score.into());

    MetadataNode {
        metadata_type: METADATA_TYPE.to_string(),
        id: metadata_id(result),
        details,
    }
}

/// `{url without scheme}:{license}`. Stable: previously ingested nodes merge on it.
pub fn metadata_id(result: &CriticalityScoreResult) -> String {
    format!(
        "{}:{}",
        strip_scheme(&result.repo.url),
        result.repo.license
    )
}

/// Artifact locator for a repository URL. Stable: artifact nodes merge on it.
pub fn source_uri(url: &str) -> String {
    format!("git+{url}")
}

fn strip_scheme(url: &str) -> &str {
    url.split_once("://").map_or(url, |(_, rest)| rest)
}
