pub mod criticality_score;
pub mod traits;

pub use criticality_score::CriticalityScoreParser;
pub use traits::{DocumentParser, ParserFactory};
