pub mod criticality_score;
pub mod traits;

pub use criticality_score::CriticalityScoreGuesser;
pub use traits::DocumentTypeGuesser;
