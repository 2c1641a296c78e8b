use crate::types::{DocumentType, FormatType};

/// Top-level Trellis error type.
///
/// All fallible operations in `trellis-core` return [`Result<T, TrellisError>`](Result).
/// Each variant wraps a domain-specific error enum, allowing callers to
/// match on the error source without losing type information.
#[derive(thiserror::Error, Debug)]
pub enum TrellisError {
    /// Error while assembling graph primitives from a document.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error dispatching a document through the registry.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Error in configuration parsing or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by a document parser.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    /// The blob is not well-formed data of its declared format.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The document was routed to a parser built for another type.
    #[error("expected document type: {expected}, actual document type: {actual}")]
    TypeMismatch {
        expected: DocumentType,
        actual: DocumentType,
    },

    /// The parser cannot handle the document's serialization format.
    #[error("unable to support parsing of {doc_type} document format: {format}")]
    UnsupportedFormat {
        doc_type: DocumentType,
        format: FormatType,
    },

    /// The capability exists on the interface but this parser does not provide it.
    #[error("{operation} is not implemented for {doc_type}")]
    NotImplemented {
        operation: &'static str,
        doc_type: DocumentType,
    },

    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,
}

/// Errors from type-keyed dispatch.
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    /// No parser factory is registered for this document type.
    #[error("no parser registered for document type: {0}")]
    NoParser(DocumentType),

    /// No registered guesser recognised the document.
    #[error("unable to classify document from {source_name}")]
    Unclassified { source_name: String },

    /// The blob exceeds the configured size limit.
    #[error("blob of {size} bytes exceeds limit of {limit} bytes")]
    BlobTooLarge { size: usize, limit: usize },
}

/// Errors in Trellis configuration parsing and validation.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist at the expected path.
    #[error("Config file not found: {0}")]
    NotFound(String),

    /// Configuration values are present but semantically invalid.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Configuration file syntax could not be parsed (TOML error).
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenience alias for `Result<T, TrellisError>`.
pub type Result<T> = std::result::Result<T, TrellisError>;
