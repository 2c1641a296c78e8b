//! Graph primitives every document parser emits into.
//!
//! The set is closed: parsers produce [`GraphNode`]s and [`GraphEdge`]s and
//! nothing else. All shapes compare by value so a downstream store (and the
//! tests) can match nodes without knowing which parser produced them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::IdentifierStrings;

// ── Detail values ──────────────────────────────────────────────────

/// A scalar stored in [`MetadataNode::details`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    Null,
    Bool(bool),
    Int(u64),
    Float(f64),
    Str(String),
}

impl DetailValue {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl From<u64> for DetailValue {
    fn from(v: u64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for DetailValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for DetailValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for DetailValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for DetailValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

/// Field name → scalar. Ordered so equality and serialization ignore insertion order.
pub type Details = BTreeMap<String, DetailValue>;

// ── Nodes ──────────────────────────────────────────────────────────

/// A provenance or quality fact about a subject artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataNode {
    /// Which schema produced this node (e.g. `criticalityscore`).
    pub metadata_type: String,
    /// Content-derived identity; equal for documents describing the same subject.
    pub id: String,
    pub details: Details,
}

/// The subject a metadata node describes, e.g. a source repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactNode {
    /// Normalized locator, e.g. `git+https://github.com/org/repo`.
    pub name: String,
}

/// An actor or key claim produced by an external identity resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityNode {
    pub id: String,
    pub digest: String,
    pub key: String,
    pub key_type: String,
    pub key_scheme: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Metadata,
    Artifact,
    Identity,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metadata => "Metadata",
            Self::Artifact => "Artifact",
            Self::Identity => "Identity",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GraphNode {
    Metadata(MetadataNode),
    Artifact(ArtifactNode),
    Identity(IdentityNode),
}

impl GraphNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Metadata(_) => NodeKind::Metadata,
            Self::Artifact(_) => NodeKind::Artifact,
            Self::Identity(_) => NodeKind::Identity,
        }
    }

    /// The key a graph store merges on. Two nodes of the same kind with the
    /// same merge key describe the same entity.
    pub fn merge_key(&self) -> &str {
        match self {
            Self::Metadata(n) => &n.id,
            Self::Artifact(n) => &n.name,
            Self::Identity(n) => &n.id,
        }
    }
}

impl From<MetadataNode> for GraphNode {
    fn from(n: MetadataNode) -> Self {
        Self::Metadata(n)
    }
}

impl From<ArtifactNode> for GraphNode {
    fn from(n: ArtifactNode) -> Self {
        Self::Artifact(n)
    }
}

impl From<IdentityNode> for GraphNode {
    fn from(n: IdentityNode) -> Self {
        Self::Identity(n)
    }
}

// ── Edges ──────────────────────────────────────────────────────────

/// Metadata → Artifact: the metadata node describes the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataForEdge {
    pub metadata_node: MetadataNode,
    pub for_artifact: ArtifactNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    MetadataFor,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MetadataFor => "MetadataFor",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GraphEdge {
    MetadataFor(MetadataForEdge),
}

impl GraphEdge {
    pub fn kind(&self) -> EdgeKind {
        match self {
            Self::MetadataFor(_) => EdgeKind::MetadataFor,
        }
    }

    /// Merge keys of the (source, target) endpoints.
    pub fn endpoints(&self) -> (&str, &str) {
        match self {
            Self::MetadataFor(e) => (&e.metadata_node.id, &e.for_artifact.name),
        }
    }
}

impl From<MetadataForEdge> for GraphEdge {
    fn from(e: MetadataForEdge) -> Self {
        Self::MetadataFor(e)
    }
}

/// Nodes and edges assembled from one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphBundle {
    /// Origin of the document, for logging and provenance.
    pub source: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// `None` when the parser does not extract identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<IdentifierStrings>,
}

// ── Tests ──────────────────────────────────────────────────────────
