//! Canonical AI analysis record
//!
//! The normalizer reconciles whatever shape the model emitted into this one
//! record. It is constructed once per triage request, immutable afterwards,
//! and never persisted. Field names serialize in camelCase so the canonical
//! grammar is plain deserialization of a well-behaved model response.

mod normalizer;

pub use normalizer::AnalysisNormalizer;

use crate::domain::IssueNumber;
use serde::{Deserialize, Serialize};

/// Issue classification emitted by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Bug,
    Feature,
    Question,
}

impl IssueKind {
    /// Case-insensitive parse of a model-provided kind string
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bug" => Some(Self::Bug),
            "feature" => Some(Self::Feature),
            "question" => Some(Self::Question),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Question => "question",
        }
    }
}

/// Sentiment tone of the issue text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Neutral,
    Hostile,
}

impl Tone {
    /// Case-insensitive parse; `aggressive` aliases to hostile.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "neutral" => Some(Self::Neutral),
            "hostile" | "aggressive" => Some(Self::Hostile),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Hostile => "hostile",
        }
    }
}

/// Classification block of the analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
}

/// Duplicate detection block of the analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateDetection {
    pub is_duplicate: bool,
    /// Never equal to the issue under analysis; the normalizer drops
    /// self-references to absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_issue_number: Option<IssueNumber>,
    pub similarity_score: f64,
    pub has_explicit_original_issue_reference: bool,
}

/// Sentiment block of the analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub tone: Tone,
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
}

/// One curation label recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRecommendation {
    pub should_apply: bool,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// The up-to-three curation recommendations the model may emit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRecommendations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<LabelRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_wanted: Option<LabelRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_first_issue: Option<LabelRecommendation>,
}

impl LabelRecommendations {
    pub fn is_empty(&self) -> bool {
        self.documentation.is_none() && self.help_wanted.is_none() && self.good_first_issue.is_none()
    }
}

/// Canonical analysis record consumed by the policy layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub classification: Classification,
    pub duplicate_detection: DuplicateDetection,
    pub sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_recommendations: Option<LabelRecommendations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_response: Option<String>,
}

fn unit_interval(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

impl AiAnalysis {
    /// Shape guard for the canonical grammar: enum values deserialized,
    /// confidences and similarity inside [0,1], no self-referencing
    /// duplicate, suggested response non-empty when present.
    pub fn is_canonical_for(&self, current_issue: IssueNumber) -> bool {
        if !unit_interval(self.classification.confidence)
            || !unit_interval(self.sentiment.confidence)
            || !unit_interval(self.duplicate_detection.similarity_score)
        {
            return false;
        }
        if self.duplicate_detection.original_issue_number == Some(current_issue) {
            return false;
        }
        if let Some(recommendations) = &self.label_recommendations {
            let entries = [
                &recommendations.documentation,
                &recommendations.help_wanted,
                &recommendations.good_first_issue,
            ];
            for entry in entries.into_iter().flatten() {
                if !unit_interval(entry.confidence) {
                    return false;
                }
            }
        }
        if let Some(response) = &self.suggested_response {
            if response.trim().is_empty() {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> AiAnalysis {
        AiAnalysis {
            classification: Classification {
                kind: IssueKind::Bug,
                confidence: 0.9,
                reasoning: "stack trace included".to_string(),
            },
            duplicate_detection: DuplicateDetection {
                is_duplicate: false,
                original_issue_number: None,
                similarity_score: 0.1,
                has_explicit_original_issue_reference: false,
            },
            sentiment: Sentiment {
                tone: Tone::Neutral,
                confidence: 0.8,
                reasoning: String::new(),
            },
            label_recommendations: None,
            suggested_response: None,
        }
    }

    #[test]
    fn test_kind_parse_case_insensitive() {
        assert_eq!(IssueKind::parse("BUG"), Some(IssueKind::Bug));
        assert_eq!(IssueKind::parse(" Feature "), Some(IssueKind::Feature));
        assert_eq!(IssueKind::parse("enhancement"), None);
    }

    #[test]
    fn test_tone_aggressive_aliases_to_hostile() {
        assert_eq!(Tone::parse("Aggressive"), Some(Tone::Hostile));
        assert_eq!(Tone::parse("hostile"), Some(Tone::Hostile));
        assert_eq!(Tone::parse("angry"), None);
    }

    #[test]
    fn test_canonical_guard_accepts_well_formed() {
        let current = IssueNumber::new(42).unwrap();
        assert!(analysis().is_canonical_for(current));
    }

    #[test]
    fn test_canonical_guard_rejects_out_of_range_confidence() {
        let current = IssueNumber::new(42).unwrap();
        let mut bad = analysis();
        bad.classification.confidence = 1.5;
        assert!(!bad.is_canonical_for(current));

        let mut nan = analysis();
        nan.sentiment.confidence = f64::NAN;
        assert!(!nan.is_canonical_for(current));
    }

    #[test]
    fn test_canonical_guard_rejects_self_reference() {
        let current = IssueNumber::new(42).unwrap();
        let mut bad = analysis();
        bad.duplicate_detection.original_issue_number = IssueNumber::new(42);
        assert!(!bad.is_canonical_for(current));
    }

    #[test]
    fn test_canonical_guard_rejects_blank_suggested_response() {
        let current = IssueNumber::new(42).unwrap();
        let mut bad = analysis();
        bad.suggested_response = Some("   ".to_string());
        assert!(!bad.is_canonical_for(current));
    }
}
