//! Classification (kind) label policy
//!
//! Kind labels are mutually exclusive: at most one of bug/feature/question at
//! a time. A sufficiently confident hostile tone suppresses them entirely and
//! outranks classification confidence.

use crate::analysis::Tone;
use serde::Serialize;

/// Outcome of the kind-label decision
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KindDecision {
    pub labels_to_add: Vec<String>,
    pub labels_to_remove: Vec<String>,
    pub was_suppressed_by_hostile_tone: bool,
}

#[allow(clippy::too_many_arguments)]
pub fn decide(
    target_label: &str,
    classification_confidence: f64,
    classification_threshold: f64,
    tone: Tone,
    tone_confidence: f64,
    tone_threshold: f64,
    existing_labels: &[String],
    all_kind_labels: &[&str],
) -> KindDecision {
    // Hostile suppression first: it wins over any classification confidence
    if tone == Tone::Hostile && tone_confidence >= tone_threshold {
        let labels_to_remove = all_kind_labels
            .iter()
            .filter(|label| existing_labels.iter().any(|existing| existing == *label))
            .map(|label| label.to_string())
            .collect();
        return KindDecision {
            labels_to_add: Vec::new(),
            labels_to_remove,
            was_suppressed_by_hostile_tone: true,
        };
    }

    if classification_confidence < classification_threshold {
        return KindDecision::default();
    }

    let labels_to_remove = all_kind_labels
        .iter()
        .filter(|label| **label != target_label)
        .filter(|label| existing_labels.iter().any(|existing| existing == *label))
        .map(|label| label.to_string())
        .collect();

    KindDecision {
        labels_to_add: vec![target_label.to_string()],
        labels_to_remove,
        was_suppressed_by_hostile_tone: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIND_LABELS: [&str; 3] = ["kind/bug", "kind/feature", "kind/question"];

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hostile_tone_suppresses_all_kind_labels() {
        let existing = labels(&["kind/bug", "kind/feature", "priority/high"]);
        let decision = decide(
            "kind/bug",
            0.99,
            0.8,
            Tone::Hostile,
            0.95,
            0.8,
            &existing,
            &KIND_LABELS,
        );

        assert!(decision.labels_to_add.is_empty());
        assert_eq!(decision.labels_to_remove, labels(&["kind/bug", "kind/feature"]));
        assert!(decision.was_suppressed_by_hostile_tone);
    }

    #[test]
    fn test_hostile_tone_below_threshold_does_not_suppress() {
        let existing = labels(&["kind/feature"]);
        let decision = decide(
            "kind/bug",
            0.9,
            0.8,
            Tone::Hostile,
            0.5,
            0.8,
            &existing,
            &KIND_LABELS,
        );

        assert_eq!(decision.labels_to_add, labels(&["kind/bug"]));
        assert_eq!(decision.labels_to_remove, labels(&["kind/feature"]));
        assert!(!decision.was_suppressed_by_hostile_tone);
    }

    #[test]
    fn test_low_classification_confidence_changes_nothing() {
        let existing = labels(&["kind/feature"]);
        let decision = decide(
            "kind/bug",
            0.5,
            0.8,
            Tone::Neutral,
            0.9,
            0.8,
            &existing,
            &KIND_LABELS,
        );

        assert_eq!(decision, KindDecision::default());
    }

    #[test]
    fn test_mutual_exclusivity_removes_other_kind_labels() {
        let existing = labels(&["kind/feature", "kind/question", "duplicate"]);
        let decision = decide(
            "kind/bug",
            0.85,
            0.8,
            Tone::Positive,
            0.2,
            0.8,
            &existing,
            &KIND_LABELS,
        );

        assert_eq!(decision.labels_to_add, labels(&["kind/bug"]));
        assert_eq!(
            decision.labels_to_remove,
            labels(&["kind/feature", "kind/question"])
        );
    }

    #[test]
    fn test_target_already_present_still_listed_for_idempotent_add() {
        // The execution context no-ops on labels already in its mirror
        let existing = labels(&["kind/bug"]);
        let decision = decide(
            "kind/bug",
            0.85,
            0.8,
            Tone::Neutral,
            0.1,
            0.8,
            &existing,
            &KIND_LABELS,
        );

        assert_eq!(decision.labels_to_add, labels(&["kind/bug"]));
        assert!(decision.labels_to_remove.is_empty());
    }
}
