// Wire model for OpenSSF criticality score results.

use serde::{Deserialize, Deserializer, Serialize};

/// One criticality score result, as emitted by the `criticality_score` tool.
///
/// Every field defaults when absent; only malformed JSON or a field of the
/// wrong shape fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalityScoreResult {
    /// Overall score. The tool writes it as a decimal string.
    #[serde(deserialize_with = "deserialize_score")]
    pub default_score: f64,
    pub legacy: LegacyMetrics,
    pub repo: RepoDescriptor,
}

impl CriticalityScoreResult {
    pub fn from_slice(blob: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(blob)
    }
}

/// Activity counters from the legacy scoring algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyMetrics {
    pub closed_issues_count: u64,
    pub commit_frequency: u64,
    pub contributor_count: u64,
    pub created_since: u64,
    pub github_mention_count: u64,
    pub issue_comment_frequency: u64,
    pub org_count: u64,
    pub recent_release_count: u64,
    pub updated_issues_count: u64,
    pub updated_since: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoDescriptor {
    pub created_at: String,
    pub language: String,
    pub license: String,
    pub star_count: u64,
    pub updated_at: String,
    pub url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(f64),
    Text(String),
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScore>::deserialize(deserializer)?;
    let score = match raw {
        None => 0.0,
        Some(RawScore::Number(n)) => n,
        Some(RawScore::Text(s)) if s.trim().is_empty() => 0.0,
        Some(RawScore::Text(s)) => s.trim().parse::<f64>().map_err(|e| {
            serde::de::Error::custom(format!("invalid default_score {s:?}: {e}"))
        })?,
    };
    if !score.is_finite() {
        return Err(serde::de::Error::custom("default_score must be finite"));
    }
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_document() {
        let blob = br#"{
            "default_score": "2.627",
            "legacy": {
                "closed_issues_count": 1, "commit_frequency": 2, "contributor_count": 24,
                "created_since": 3, "github_mention_count": 4, "issue_comment_frequency": 5,
                "org_count": 6, "recent_release_count": 7, "updated_issues_count": 8,
                "updated_since": 9
            },
            "repo": {
                "created_at": "2021-09-08T09:35:59Z", "language": "C++",
                "license": "Apache License 2.0", "star_count": 11,
                "updated_at": "2022-03-01T00:00:00Z", "url": "https://github.com/org/repo"
            }
        }"#;
        let doc = CriticalityScoreResult::from_slice(blob).unwrap();
        assert!((doc.default_score - 2.627).abs() < f64::EPSILON);
        assert_eq!(doc.legacy.contributor_count, 24);
        assert_eq!(doc.legacy.updated_since, 9);
        assert_eq!(doc.repo.star_count, 11);
        assert_eq!(doc.repo.url, "https://github.com/org/repo");
        assert_eq!(doc.repo.created_at, "2021-09-08T09:35:59Z");
    }

    #[test]
    fn absent_fields_default_to_zero_values() {
        let doc = CriticalityScoreResult::from_slice(b"{}").unwrap();
        assert_eq!(doc, CriticalityScoreResult::default());

        let doc = CriticalityScoreResult::from_slice(br#"{"repo": {"url": "u"}}"#).unwrap();
        assert_eq!(doc.repo.url, "u");
        assert_eq!(doc.repo.license, "");
        assert_eq!(doc.legacy, LegacyMetrics::default());
    }

    #[test]
    fn score_accepts_number_string_and_null() {
        let n = CriticalityScoreResult::from_slice(br#"{"default_score": 0.5}"#).unwrap();
        assert!((n.default_score - 0.5).abs() < f64::EPSILON);
        let s = CriticalityScoreResult::from_slice(br#"{"default_score": " 0.25 "}"#).unwrap();
        assert!((s.default_score - 0.25).abs() < f64::EPSILON);
        let e = CriticalityScoreResult::from_slice(br#"{"default_score": ""}"#).unwrap();
        assert!(e.default_score.abs() < f64::EPSILON);
        let z = CriticalityScoreResult::from_slice(br#"{"default_score": null}"#).unwrap();
        assert!(z.default_score.abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(CriticalityScoreResult::from_slice(b"not json").is_err());
        assert!(CriticalityScoreResult::from_slice(b"[1, 2]").is_err());
        assert!(CriticalityScoreResult::from_slice(br#"{"default_score": "high"}"#).is_err());
        assert!(CriticalityScoreResult::from_slice(br#"{"default_score": "NaN"}"#).is_err());
        assert!(
            CriticalityScoreResult::from_slice(br#"{"legacy": {"org_count": -1}}"#).is_err()
        );
        assert!(CriticalityScoreResult::from_slice(br#"{"repo": {"url": 5}}"#).is_err());
    }
}
