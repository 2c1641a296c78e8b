use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── Document classification tags ───────────────────────────────────

/// Which schema a document conforms to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// An OpenSSF criticality score result for one repository.
    CriticalityScore,
    /// An OpenSSF scorecard result.
    Scorecard,
    /// An SPDX software bill of materials.
    Spdx,
    /// A CycloneDX software bill of materials.
    #[serde(rename = "cyclonedx")]
    CycloneDx,
    /// No registered schema matched.
    Unknown,
}

impl DocumentType {
    /// Document types with a parser shipped in this crate.
    pub const BUILTIN: [Self; 1] = [Self::CriticalityScore];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CriticalityScore => "criticality_score",
            Self::Scorecard => "scorecard",
            Self::Spdx => "spdx",
            Self::CycloneDx => "cyclonedx",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "criticality_score" => Ok(Self::CriticalityScore),
            "scorecard" => Ok(Self::Scorecard),
            "spdx" => Ok(Self::Spdx),
            "cyclonedx" => Ok(Self::CycloneDx),
            "unknown" => Ok(Self::Unknown),
            other => Err(ConfigError::Invalid(format!("unknown document type: {other}"))),
        }
    }
}

/// Serialization format a blob is declared to be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormatType {
    Json,
    JsonLines,
    Xml,
    #[default]
    Unknown,
}

impl FormatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::JsonLines => "json_lines",
            Self::Xml => "xml",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "json_lines" | "jsonl" => Ok(Self::JsonLines),
            "xml" => Ok(Self::Xml),
            "unknown" => Ok(Self::Unknown),
            other => Err(ConfigError::Invalid(format!("unknown format: {other}"))),
        }
    }
}

// ── Documents ──────────────────────────────────────────────────────

/// Where a document came from. Carried through for logging; never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInformation {
    /// Name of the collector that fetched the blob (e.g. "file").
    pub collector: String,
    /// Collector-specific location of the blob (path, URL, object key).
    pub source: String,
}

/// One ingested unit: raw bytes plus declared type, format and origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub blob: Vec<u8>,
    pub doc_type: DocumentType,
    pub format: FormatType,
    pub source_information: SourceInformation,
}

impl Document {
    /// A document whose type is not yet known.
    pub fn unclassified(
        blob: Vec<u8>,
        format: FormatType,
        source_information: SourceInformation,
    ) -> Self {
        Self {
            blob,
            doc_type: DocumentType::Unknown,
            format,
            source_information,
        }
    }
}

// ── Identifiers ────────────────────────────────────────────────────

/// Identifier strings a parser extracted for cross-document correlation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierStrings {
    /// Source-control locators, e.g. `git+https://github.com/org/repo`.
    pub vcs_strings: Vec<String>,
    /// Package URLs.
    pub purl_strings: Vec<String>,
    /// OCI image references.
    pub oci_strings: Vec<String>,
}

impl IdentifierStrings {
    pub fn is_empty(&self) -> bool {
        self.vcs_strings.is_empty() && self.purl_strings.is_empty() && self.oci_strings.is_empty()
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_str_matches_serde() {
        for kind in [
            DocumentType::CriticalityScore,
            DocumentType::Scorecard,
            DocumentType::Spdx,
            DocumentType::CycloneDx,
            DocumentType::Unknown,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(kind.as_str().parse::<DocumentType>().unwrap(), kind);
        }
    }

    #[test]
    fn format_type_parses_aliases() {
        assert_eq!("jsonl".parse::<FormatType>().unwrap(), FormatType::JsonLines);
        assert_eq!("json".parse::<FormatType>().unwrap(), FormatType::Json);
        assert!("yaml".parse::<FormatType>().is_err());
    }

    #[test]
    fn unclassified_document_has_unknown_type() {
        let doc = Document::unclassified(b"{}".to_vec(), FormatType::Json, SourceInformation::default());
        assert_eq!(doc.doc_type, DocumentType::Unknown);
    }

    #[test]
    fn empty_identifier_bundle() {
        let mut ids = IdentifierStrings::default();
        assert!(ids.is_empty());
        ids.vcs_strings.push("git+https://github.com/org/repo".into());
        assert!(!ids.is_empty());
    }
}
