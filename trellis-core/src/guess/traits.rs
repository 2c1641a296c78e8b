use crate::types::{DocumentType, FormatType};

/// Decides whether a blob conforms to one schema.
///
/// Implementations must be total: any failure to decode or match yields
/// [`DocumentType::Unknown`] so the registry can try the next candidate.
pub trait DocumentTypeGuesser: Send + Sync + std::fmt::Debug {
    /// Human-readable name for this guesser.
    fn name(&self) -> &'static str;

    fn guess_document_type(&self, blob: &[u8], format: FormatType) -> DocumentType;
}
