use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::DocumentType;

/// Top-level Trellis configuration, matching `trellis.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrellisConfig {
    #[serde(default)]
    pub ingest: IngestSection,
    #[serde(default)]
    pub processor: ProcessorSection,
}

impl TrellisConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> crate::error::Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if self.ingest.max_blob_bytes == 0 {
            return Err(ConfigError::Invalid("ingest.max_blob_bytes must be positive".into()).into());
        }
        self.processor.document_types()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSection {
    /// Stop a batch at the first failing document instead of skipping it.
    pub fail_fast: bool,
    /// Blobs larger than this are rejected before decoding.
    pub max_blob_bytes: usize,
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_blob_bytes: 16 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorSection {
    /// Document types the registry exposes, by name.
    pub enabled: Vec<String>,
}

impl Default for ProcessorSection {
    fn default() -> Self {
        Self {
            enabled: DocumentType::BUILTIN
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
        }
    }
}

impl ProcessorSection {
    /// Resolve `enabled` into document types that have a built-in parser.
    pub fn document_types(&self) -> Result<Vec<DocumentType>, ConfigError> {
        let mut types = Vec::with_capacity(self.enabled.len());
        for name in &self.enabled {
            let doc_type: DocumentType = name.parse()?;
            if !DocumentType::BUILTIN.contains(&doc_type) {
                return Err(ConfigError::Invalid(format!(
                    "no built-in parser for document type: {doc_type}"
                )));
            }
            if !types.contains(&doc_type) {
                types.push(doc_type);
            }
        }
        Ok(types)
    }
}
