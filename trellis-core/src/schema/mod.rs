//! Typed views of external document formats. Pure data; no business logic.

pub mod criticality_score;

pub use criticality_score::{CriticalityScoreResult, LegacyMetrics, RepoDescriptor};
