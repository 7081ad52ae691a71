//! Curation label policy (documentation / help wanted / good first issue)
//!
//! Applies model label recommendations behind per-kind confidence gates.
//! Skipped wholesale for hostile issues and likely duplicates: curating
//! either would invite contributors into the wrong place.

use crate::analysis::{IssueKind, LabelRecommendation, LabelRecommendations, Tone};
use serde::Serialize;

/// Labels and gates for the three curation kinds
#[derive(Debug, Clone)]
pub struct CurationRules<'a> {
    pub documentation_label: &'a str,
    pub help_wanted_label: &'a str,
    pub good_first_issue_label: &'a str,
    pub documentation_threshold: f64,
    pub help_wanted_threshold: f64,
    pub good_first_issue_threshold: f64,
}

/// Outcome of the curation decision; label order is fixed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurationDecision {
    pub labels_to_add: Vec<String>,
}

pub fn decide(
    tone: Tone,
    likely_duplicate: bool,
    classification_kind: IssueKind,
    classification_confidence: f64,
    recommendations: Option<&LabelRecommendations>,
    existing_labels: &[String],
    rules: &CurationRules<'_>,
) -> CurationDecision {
    if tone == Tone::Hostile || likely_duplicate {
        return CurationDecision::default();
    }
    let Some(recommendations) = recommendations else {
        return CurationDecision::default();
    };

    let question_or_feature = matches!(classification_kind, IssueKind::Question | IssueKind::Feature);
    let mut labels_to_add = Vec::new();

    // Fixed output order: documentation, help wanted, good first issue
    if question_or_feature
        && accepted(
            recommendations.documentation.as_ref(),
            rules.documentation_threshold,
        )
        && !has_label(existing_labels, rules.documentation_label)
    {
        labels_to_add.push(rules.documentation_label.to_string());
    }

    if accepted(recommendations.help_wanted.as_ref(), rules.help_wanted_threshold)
        && !has_label(existing_labels, rules.help_wanted_label)
    {
        labels_to_add.push(rules.help_wanted_label.to_string());
    }

    if question_or_feature
        && classification_confidence >= rules.good_first_issue_threshold
        && accepted(
            recommendations.good_first_issue.as_ref(),
            rules.good_first_issue_threshold,
        )
        && !has_label(existing_labels, rules.good_first_issue_label)
    {
        labels_to_add.push(rules.good_first_issue_label.to_string());
    }

    CurationDecision { labels_to_add }
}

fn accepted(recommendation: Option<&LabelRecommendation>, threshold: f64) -> bool {
    recommendation
        .map(|rec| rec.should_apply && rec.confidence >= threshold)
        .unwrap_or(false)
}

fn has_label(existing_labels: &[String], label: &str) -> bool {
    existing_labels.iter().any(|existing| existing == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> CurationRules<'static> {
        CurationRules {
            documentation_label: "documentation",
            help_wanted_label: "help wanted",
            good_first_issue_label: "good first issue",
            documentation_threshold: 0.7,
            help_wanted_threshold: 0.7,
            good_first_issue_threshold: 0.75,
        }
    }

    fn recommend(confidence: f64) -> Option<LabelRecommendation> {
        Some(LabelRecommendation {
            should_apply: true,
            confidence,
            reasoning: None,
        })
    }

    fn all_recommended() -> LabelRecommendations {
        LabelRecommendations {
            documentation: recommend(0.9),
            help_wanted: recommend(0.9),
            good_first_issue: recommend(0.9),
        }
    }

    #[test]
    fn test_all_three_in_fixed_order() {
        let decision = decide(
            Tone::Neutral,
            false,
            IssueKind::Feature,
            0.9,
            Some(&all_recommended()),
            &[],
            &rules(),
        );
        assert_eq!(
            decision.labels_to_add,
            vec!["documentation", "help wanted", "good first issue"]
        );
    }

    #[test]
    fn test_hostile_tone_skips_curation() {
        let decision = decide(
            Tone::Hostile,
            false,
            IssueKind::Feature,
            0.9,
            Some(&all_recommended()),
            &[],
            &rules(),
        );
        assert!(decision.labels_to_add.is_empty());
    }

    #[test]
    fn test_likely_duplicate_skips_curation() {
        let decision = decide(
            Tone::Neutral,
            true,
            IssueKind::Feature,
            0.9,
            Some(&all_recommended()),
            &[],
            &rules(),
        );
        assert!(decision.labels_to_add.is_empty());
    }

    #[test]
    fn test_bug_kind_only_gets_help_wanted() {
        // documentation and good-first-issue require question or feature
        let decision = decide(
            Tone::Neutral,
            false,
            IssueKind::Bug,
            0.9,
            Some(&all_recommended()),
            &[],
            &rules(),
        );
        assert_eq!(decision.labels_to_add, vec!["help wanted"]);
    }

    #[test]
    fn test_good_first_issue_needs_classification_confidence() {
        let decision = decide(
            Tone::Neutral,
            false,
            IssueKind::Question,
            0.5,
            Some(&all_recommended()),
            &[],
            &rules(),
        );
        assert_eq!(decision.labels_to_add, vec!["documentation", "help wanted"]);
    }

    #[test]
    fn test_existing_labels_not_re_added() {
        let existing = vec!["documentation".to_string(), "good first issue".to_string()];
        let decision = decide(
            Tone::Neutral,
            false,
            IssueKind::Question,
            0.9,
            Some(&all_recommended()),
            &existing,
            &rules(),
        );
        assert_eq!(decision.labels_to_add, vec!["help wanted"]);
    }

    #[test]
    fn test_below_threshold_recommendation_ignored() {
        let recommendations = LabelRecommendations {
            documentation: recommend(0.5),
            help_wanted: recommend(0.69),
            good_first_issue: None,
        };
        let decision = decide(
            Tone::Neutral,
            false,
            IssueKind::Question,
            0.9,
            Some(&recommendations),
            &[],
            &rules(),
        );
        assert!(decision.labels_to_add.is_empty());
    }

    #[test]
    fn test_no_recommendations_no_labels() {
        let decision = decide(Tone::Neutral, false, IssueKind::Question, 0.9, None, &[], &rules());
        assert!(decision.labels_to_add.is_empty());
    }
}
