use tracing::trace;

use crate::schema::CriticalityScoreResult;
use crate::types::{DocumentType, FormatType};

use super::traits::DocumentTypeGuesser;

/// Recognises criticality score results.
///
/// A blob that decodes but carries neither a repository license nor a URL is
/// rejected: an unrelated JSON object decodes to all-default fields too.
#[derive(Debug, Default, Clone, Copy)]
pub struct CriticalityScoreGuesser;

impl DocumentTypeGuesser for CriticalityScoreGuesser {
    fn name(&self) -> &'static str {
        "criticality_score"
    }

    fn guess_document_type(&self, blob: &[u8], format: FormatType) -> DocumentType {
        if format != FormatType::Json {
            return DocumentType::Unknown;
        }
        let Ok(result) = CriticalityScoreResult::from_slice(blob) else {
            return DocumentType::Unknown;
        };
        if result.repo.license.is_empty() && result.repo.url.is_empty() {
            trace!("decoded as criticality score but no discriminating fields set");
            return DocumentType::Unknown;
        }
        DocumentType::CriticalityScore
    }
}
