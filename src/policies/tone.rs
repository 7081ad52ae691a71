//! Tone-monitor policy
//!
//! Flags hostile issues with a monitoring label regardless of confidence.
//! Distinct from kind suppression, which is confidence-gated.

use crate::analysis::Tone;
use serde::Serialize;

/// Outcome of the tone-monitor decision
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToneDecision {
    pub labels_to_add: Vec<String>,
}

pub fn decide(tone: Tone, monitoring_label: &str) -> ToneDecision {
    if tone == Tone::Hostile {
        ToneDecision {
            labels_to_add: vec![monitoring_label.to_string()],
        }
    } else {
        ToneDecision::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostile_adds_monitoring_label_regardless_of_confidence() {
        let decision = decide(Tone::Hostile, "needs monitoring");
        assert_eq!(decision.labels_to_add, vec!["needs monitoring"]);
    }

    #[test]
    fn test_other_tones_add_nothing() {
        assert!(decide(Tone::Neutral, "needs monitoring").labels_to_add.is_empty());
        assert!(decide(Tone::Positive, "needs monitoring").labels_to_add.is_empty());
    }
}
