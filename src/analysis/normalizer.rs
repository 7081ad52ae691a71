//! Multi-grammar normalization of raw model output
//!
//! Models emit at least three incompatible JSON shapes for the same analysis.
//! Normalization tries each grammar in a fixed order and takes the first
//! success: canonical -> structured-alias -> legacy -> give up. The ordering
//! is load-bearing: a payload that qualifies for the structured-alias grammar
//! never has its stray legacy-named fields consulted.

use crate::analysis::{
    AiAnalysis, Classification, DuplicateDetection, IssueKind, LabelRecommendation,
    LabelRecommendations, Sentiment, Tone,
};
use crate::domain::IssueNumber;
use serde_json::{Map, Value};

/// Aliased field names for the original issue number, in resolution priority
/// order. Each is checked on the duplicate object before the payload root.
const ORIGINAL_ISSUE_ALIASES: [&str; 6] = [
    "originalIssueNumber",
    "original_issue_number",
    "originalIssue",
    "original_issue",
    "duplicateOfIssue",
    "duplicate_of_issue",
];

/// Array-valued duplicate references, scanned after the alias chain
const DUPLICATE_OF_ARRAYS: [&str; 2] = ["duplicateOf", "duplicate_of"];

/// Root-level keys that count as a duplicate signal for structured-alias
/// grammar qualification
const ROOT_DUPLICATE_SIGNALS: [&str; 5] = [
    "isDuplicate",
    "is_duplicate",
    "similarityScore",
    "duplicateOf",
    "duplicate_of",
];

/// Parses raw model text into the canonical analysis record.
///
/// Deterministic and side-effect-free; returns `None` for anything it cannot
/// reconcile and never panics on any input string.
pub struct AnalysisNormalizer;

impl AnalysisNormalizer {
    pub fn normalize(raw: &str, current_issue: IssueNumber) -> Option<AiAnalysis> {
        let value: Value = serde_json::from_str(raw).ok()?;
        Self::canonical(&value, current_issue)
            .or_else(|| Self::structured_alias(&value, current_issue))
            .or_else(|| Self::legacy(&value, current_issue))
    }

    /// Canonical grammar: the payload already is an `AiAnalysis` with exact
    /// field names and in-range values. Returned unchanged.
    fn canonical(value: &Value, current_issue: IssueNumber) -> Option<AiAnalysis> {
        serde_json::from_value::<AiAnalysis>(value.clone())
            .ok()
            .filter(|analysis| analysis.is_canonical_for(current_issue))
    }

    /// Structured-alias grammar: a keyed record with aliased block and field
    /// names. Qualifies only with a classification object, a sentiment
    /// object, and at least one duplicate-signal field.
    fn structured_alias(value: &Value, current_issue: IssueNumber) -> Option<AiAnalysis> {
        let root = value.as_object()?;
        let classification_obj = root.get("classification")?.as_object()?;
        let sentiment_obj = root
            .get("sentiment")
            .and_then(Value::as_object)
            .or_else(|| root.get("tone").and_then(Value::as_object))?;
        let duplicate_obj = root
            .get("duplicateDetection")
            .and_then(Value::as_object)
            .or_else(|| root.get("duplicate").and_then(Value::as_object));

        let has_duplicate_signal = duplicate_obj.is_some()
            || ROOT_DUPLICATE_SIGNALS.iter().any(|key| root.contains_key(*key));
        if !has_duplicate_signal {
            return None;
        }

        let classification = Self::alias_classification(classification_obj, root);
        let sentiment = Self::alias_sentiment(sentiment_obj);
        let duplicate_detection = Self::alias_duplicate_detection(
            duplicate_obj,
            root,
            classification_obj,
            current_issue,
        );
        let label_recommendations = Self::parse_label_recommendations(root);
        let suggested_response = Self::parse_suggested_response(root);

        Some(AiAnalysis {
            classification,
            duplicate_detection,
            sentiment,
            label_recommendations,
            suggested_response,
        })
    }

    fn alias_classification(
        classification_obj: &Map<String, Value>,
        root: &Map<String, Value>,
    ) -> Classification {
        let parsed_kind = classification_obj
            .get("type")
            .or_else(|| classification_obj.get("kind"))
            .and_then(Value::as_str)
            .and_then(IssueKind::parse);

        // An unparseable kind makes the whole block unquantified
        let (kind, confidence) = match parsed_kind {
            Some(kind) => {
                let confidence = classification_obj
                    .get("confidence")
                    .and_then(valid_unit)
                    .or_else(|| root.get("confidence").and_then(valid_unit))
                    .unwrap_or(0.0);
                (kind, confidence)
            }
            None => (IssueKind::Question, 0.0),
        };

        Classification {
            kind,
            confidence,
            reasoning: string_field(classification_obj, "reasoning"),
        }
    }

    fn alias_sentiment(sentiment_obj: &Map<String, Value>) -> Sentiment {
        let parsed_tone = sentiment_obj
            .get("tone")
            .and_then(Value::as_str)
            .and_then(Tone::parse);

        let (tone, confidence) = match parsed_tone {
            Some(tone) => {
                let confidence = sentiment_obj
                    .get("confidence")
                    .and_then(valid_unit)
                    .unwrap_or(0.0);
                (tone, confidence)
            }
            None => (Tone::Neutral, 0.0),
        };

        Sentiment {
            tone,
            confidence,
            reasoning: string_field(sentiment_obj, "reasoning"),
        }
    }

    fn alias_duplicate_detection(
        duplicate_obj: Option<&Map<String, Value>>,
        root: &Map<String, Value>,
        classification_obj: &Map<String, Value>,
        current_issue: IssueNumber,
    ) -> DuplicateDetection {
        let is_duplicate = duplicate_obj
            .and_then(|obj| obj.get("isDuplicate").or_else(|| obj.get("is_duplicate")))
            .or_else(|| root.get("isDuplicate").or_else(|| root.get("is_duplicate")))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        // Similarity fallback chain: duplicate object -> root -> classification
        // object -> duplicate-dependent default
        let similarity_score = duplicate_obj
            .and_then(|obj| {
                obj.get("similarityScore")
                    .or_else(|| obj.get("similarity_score"))
            })
            .and_then(valid_unit)
            .or_else(|| root.get("similarityScore").and_then(valid_unit))
            .or_else(|| classification_obj.get("similarityScore").and_then(valid_unit))
            .unwrap_or(if is_duplicate { 1.0 } else { 0.0 });

        let (resolved, has_explicit_reference) = resolve_original_issue(duplicate_obj, root);
        // A self-reference is dropped; the explicit-reference flag survives so
        // the duplicate policy will not substitute the fallback issue
        let original_issue_number = resolved.filter(|number| *number != current_issue);

        DuplicateDetection {
            is_duplicate,
            original_issue_number,
            similarity_score,
            has_explicit_original_issue_reference: has_explicit_reference,
        }
    }

    /// Legacy grammar: bare-string classification and tone, snake_case
    /// duplicate block. Qualifies only when `tone` is a string or a
    /// `duplicate_detection` object is present.
    fn legacy(value: &Value, current_issue: IssueNumber) -> Option<AiAnalysis> {
        let root = value.as_object()?;
        let tone_string = root.get("tone").and_then(Value::as_str);
        let duplicate_obj = root.get("duplicate_detection").and_then(Value::as_object);
        if tone_string.is_none() && duplicate_obj.is_none() {
            return None;
        }

        // A present bare string is the whole signal: confidence defaults to
        // 1.0. A missing one falls back to a kind no threshold can action.
        let (kind, kind_confidence) = match root
            .get("classification")
            .and_then(Value::as_str)
            .and_then(IssueKind::parse)
        {
            Some(kind) => (kind, 1.0),
            None => (IssueKind::Question, 0.0),
        };
        let (tone, tone_confidence) = match tone_string.and_then(Tone::parse) {
            Some(tone) => (tone, 1.0),
            None => (Tone::Neutral, 0.0),
        };

        let is_duplicate = duplicate_obj
            .and_then(|obj| obj.get("is_duplicate"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let mut has_explicit_reference = false;
        let mut resolved = None;
        if let Some(obj) = duplicate_obj {
            if let Some(reference) = obj.get("original_issue_number") {
                has_explicit_reference = true;
                resolved = parse_issue_ref(reference);
            }
            if let Some(array) = obj.get("duplicate_of") {
                has_explicit_reference = true;
                if resolved.is_none() {
                    resolved = array
                        .as_array()
                        .and_then(|entries| entries.iter().find_map(parse_issue_ref));
                }
            }
        }
        let original_issue_number = resolved.filter(|number| *number != current_issue);

        Some(AiAnalysis {
            classification: Classification {
                kind,
                confidence: kind_confidence,
                reasoning: String::new(),
            },
            duplicate_detection: DuplicateDetection {
                is_duplicate,
                original_issue_number,
                similarity_score: if is_duplicate { 1.0 } else { 0.0 },
                has_explicit_original_issue_reference: has_explicit_reference,
            },
            sentiment: Sentiment {
                tone,
                confidence: tone_confidence,
                reasoning: String::new(),
            },
            label_recommendations: None,
            suggested_response: Self::parse_suggested_response(root),
        })
    }

    /// Accepts the block under either name, as a keyed object or as a
    /// 3-element sequence in documentation/helpWanted/goodFirstIssue order.
    /// A structurally invalid block becomes absent without failing the
    /// surrounding analysis; a bad entry is rejected alone.
    fn parse_label_recommendations(root: &Map<String, Value>) -> Option<LabelRecommendations> {
        let block = root
            .get("label_recommendations")
            .or_else(|| root.get("labelRecommendations"))?;

        match block {
            Value::Object(map) => Some(LabelRecommendations {
                documentation: map.get("documentation").and_then(parse_recommendation),
                help_wanted: map.get("helpWanted").and_then(parse_recommendation),
                good_first_issue: map.get("goodFirstIssue").and_then(parse_recommendation),
            }),
            Value::Array(entries) if entries.len() == 3 => Some(LabelRecommendations {
                documentation: parse_recommendation(&entries[0]),
                help_wanted: parse_recommendation(&entries[1]),
                good_first_issue: parse_recommendation(&entries[2]),
            }),
            _ => None,
        }
    }

    fn parse_suggested_response(root: &Map<String, Value>) -> Option<String> {
        root.get("suggestedResponse")
            .or_else(|| root.get("suggested_response"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }
}

/// Walk the alias chain, duplicate object before root for each name, then the
/// duplicate-of arrays. Returns the first resolvable number plus whether any
/// explicit reference was present at all: an unresolved reference is not a
/// missing one.
fn resolve_original_issue(
    duplicate_obj: Option<&Map<String, Value>>,
    root: &Map<String, Value>,
) -> (Option<IssueNumber>, bool) {
    let mut has_explicit_reference = false;
    let mut resolved = None;

    for key in ORIGINAL_ISSUE_ALIASES {
        for scope in [duplicate_obj, Some(root)].into_iter().flatten() {
            if let Some(reference) = scope.get(key) {
                has_explicit_reference = true;
                if resolved.is_none() {
                    resolved = parse_issue_ref(reference);
                }
            }
        }
    }

    for key in DUPLICATE_OF_ARRAYS {
        for scope in [duplicate_obj, Some(root)].into_iter().flatten() {
            if let Some(value) = scope.get(key) {
                has_explicit_reference = true;
                if resolved.is_none() {
                    if let Some(entries) = value.as_array() {
                        resolved = entries.iter().find_map(parse_issue_ref);
                    }
                }
            }
        }
    }

    (resolved, has_explicit_reference)
}

/// Issue reference as a positive integer or a `"#123"`/`"123"` string
fn parse_issue_ref(value: &Value) -> Option<IssueNumber> {
    match value {
        Value::Number(number) => number.as_u64().and_then(IssueNumber::new),
        Value::String(text) => IssueNumber::parse_reference(text),
        _ => None,
    }
}

/// Finite value inside [0,1]; anything else is treated as absent so the
/// grammar-specific default applies
fn valid_unit(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|number| number.is_finite() && (0.0..=1.0).contains(number))
}

fn string_field(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(number: u64) -> IssueNumber {
        IssueNumber::new(number).unwrap()
    }

    fn normalize(raw: &str) -> Option<AiAnalysis> {
        AnalysisNormalizer::normalize(raw, issue(42))
    }

    #[test]
    fn test_unparsable_input_returns_none() {
        for raw in [
            "",
            "not json",
            "{\"unterminated\": ",
            "<html>model exploded</html>",
            "null",
            "42",
            "\"just a string\"",
            "[1, 2, 3]",
            "{}",
        ] {
            assert!(normalize(raw).is_none(), "expected None for {raw:?}");
        }
    }

    #[test]
    fn test_canonical_round_trip_is_identity() {
        let analysis = AiAnalysis {
            classification: Classification {
                kind: IssueKind::Bug,
                confidence: 0.93,
                reasoning: "panic with backtrace".to_string(),
            },
            duplicate_detection: DuplicateDetection {
                is_duplicate: true,
                original_issue_number: IssueNumber::new(7),
                similarity_score: 0.91,
                has_explicit_original_issue_reference: true,
            },
            sentiment: Sentiment {
                tone: Tone::Neutral,
                confidence: 0.85,
                reasoning: "matter of fact".to_string(),
            },
            label_recommendations: Some(LabelRecommendations {
                documentation: Some(LabelRecommendation {
                    should_apply: true,
                    confidence: 0.8,
                    reasoning: Some("asks about docs".to_string()),
                }),
                help_wanted: None,
                good_first_issue: None,
            }),
            suggested_response: Some("Try the nightly build.".to_string()),
        };

        let raw = serde_json::to_string(&analysis).unwrap();
        assert_eq!(normalize(&raw).unwrap(), analysis);
    }

    #[test]
    fn test_canonical_out_of_range_confidence_falls_through() {
        // Confidence above 1.0 fails the canonical guard; the structured-alias
        // grammar treats the field as absent and defaults it to 0.0
        let raw = r#"{
            "classification": {"type": "bug", "confidence": 3.5, "reasoning": "r"},
            "duplicateDetection": {"isDuplicate": false, "similarityScore": 0.2,
                                   "hasExplicitOriginalIssueReference": false},
            "sentiment": {"tone": "neutral", "confidence": 0.9, "reasoning": ""}
        }"#;
        let analysis = normalize(raw).unwrap();
        assert_eq!(analysis.classification.kind, IssueKind::Bug);
        assert_eq!(analysis.classification.confidence, 0.0);
        assert_eq!(analysis.sentiment.confidence, 0.9);
    }

    #[test]
    fn test_structured_alias_duplicate_block_and_root_confidence() {
        let raw = r#"{
            "classification": {"type": "Feature", "reasoning": "asks for export"},
            "confidence": 0.88,
            "duplicate": {"is_duplicate": true, "similarity_score": 0.9},
            "sentiment": {"tone": "positive", "confidence": 0.7}
        }"#;
        let analysis = normalize(raw).unwrap();
        assert_eq!(analysis.classification.kind, IssueKind::Feature);
        assert_eq!(analysis.classification.confidence, 0.88);
        assert!(analysis.duplicate_detection.is_duplicate);
        assert_eq!(analysis.duplicate_detection.similarity_score, 0.9);
        assert_eq!(analysis.sentiment.tone, Tone::Positive);
    }

    #[test]
    fn test_structured_alias_requires_duplicate_signal() {
        let raw = r#"{
            "classification": {"type": "bug", "confidence": 0.9},
            "sentiment": {"tone": "neutral", "confidence": 0.9}
        }"#;
        assert!(normalize(raw).is_none());
    }

    #[test]
    fn test_structured_alias_requires_sentiment_object() {
        // A bare-string tone is not a sentiment object; with a
        // duplicate_detection block this payload is legacy instead
        let raw = r#"{
            "classification": {"type": "bug", "confidence": 0.9},
            "tone": "hostile",
            "duplicate_detection": {"is_duplicate": false}
        }"#;
        let analysis = normalize(raw).unwrap();
        assert_eq!(analysis.sentiment.tone, Tone::Hostile);
        assert_eq!(analysis.sentiment.confidence, 1.0);
        // Legacy ignores the object-form classification block
        assert_eq!(analysis.classification.kind, IssueKind::Question);
        assert_eq!(analysis.classification.confidence, 0.0);
    }

    #[test]
    fn test_similarity_defaults_follow_duplicate_flag() {
        let duplicate = r#"{
            "classification": {"type": "bug", "confidence": 0.9},
            "sentiment": {"tone": "neutral", "confidence": 0.5},
            "isDuplicate": true
        }"#;
        assert_eq!(normalize(duplicate).unwrap().duplicate_detection.similarity_score, 1.0);

        let not_duplicate = r#"{
            "classification": {"type": "bug", "confidence": 0.9},
            "sentiment": {"tone": "neutral", "confidence": 0.5},
            "isDuplicate": false
        }"#;
        assert_eq!(normalize(not_duplicate).unwrap().duplicate_detection.similarity_score, 0.0);
    }

    #[test]
    fn test_similarity_chain_prefers_duplicate_object() {
        let raw = r#"{
            "classification": {"type": "bug", "confidence": 0.9, "similarityScore": 0.1},
            "similarityScore": 0.5,
            "duplicateDetection": {"isDuplicate": true, "similarityScore": 0.95},
            "sentiment": {"tone": "neutral", "confidence": 0.5}
        }"#;
        assert_eq!(normalize(raw).unwrap().duplicate_detection.similarity_score, 0.95);
    }

    #[test]
    fn test_similarity_chain_reaches_classification_object() {
        let raw = r#"{
            "classification": {"type": "bug", "confidence": 0.9, "similarityScore": 0.33},
            "duplicateDetection": {"isDuplicate": true},
            "sentiment": {"tone": "neutral", "confidence": 0.5}
        }"#;
        assert_eq!(normalize(raw).unwrap().duplicate_detection.similarity_score, 0.33);
    }

    #[test]
    fn test_original_issue_alias_priority_order() {
        // originalIssueNumber outranks later aliases wherever they live
        let raw = r#"{
            "classification": {"type": "bug", "confidence": 0.9},
            "duplicateDetection": {
                "isDuplicate": true,
                "originalIssue": 11,
                "originalIssueNumber": 9
            },
            "original_issue_number": 13,
            "sentiment": {"tone": "neutral", "confidence": 0.5}
        }"#;
        let analysis = normalize(raw).unwrap();
        assert_eq!(
            analysis.duplicate_detection.original_issue_number.unwrap().value(),
            9
        );
        assert!(analysis.duplicate_detection.has_explicit_original_issue_reference);
    }

    #[test]
    fn test_original_issue_from_duplicate_of_array() {
        let raw = r##"{
            "classification": {"type": "bug", "confidence": 0.9},
            "duplicateDetection": {"isDuplicate": true, "duplicateOf": ["nope", "#15", 20]},
            "sentiment": {"tone": "neutral", "confidence": 0.5}
        }"##;
        let analysis = normalize(raw).unwrap();
        assert_eq!(
            analysis.duplicate_detection.original_issue_number.unwrap().value(),
            15
        );
    }

    #[test]
    fn test_self_reference_dropped_but_still_explicit() {
        let raw = r#"{
            "classification": {"type": "bug", "confidence": 0.9},
            "duplicateDetection": {"isDuplicate": true, "originalIssueNumber": 42},
            "sentiment": {"tone": "neutral", "confidence": 0.5}
        }"#;
        let analysis = normalize(raw).unwrap();
        assert!(analysis.duplicate_detection.original_issue_number.is_none());
        assert!(analysis.duplicate_detection.has_explicit_original_issue_reference);
    }

    #[test]
    fn test_unresolvable_reference_keeps_explicit_flag() {
        let raw = r#"{
            "classification": {"type": "bug", "confidence": 0.9},
            "duplicateDetection": {"isDuplicate": true, "originalIssueNumber": "the other one"},
            "sentiment": {"tone": "neutral", "confidence": 0.5}
        }"#;
        let analysis = normalize(raw).unwrap();
        assert!(analysis.duplicate_detection.original_issue_number.is_none());
        assert!(analysis.duplicate_detection.has_explicit_original_issue_reference);
    }

    #[test]
    fn test_label_recommendations_positional_array() {
        let raw = r#"{
            "classification": {"type": "question", "confidence": 0.9},
            "duplicateDetection": {"isDuplicate": false},
            "sentiment": {"tone": "neutral", "confidence": 0.5},
            "label_recommendations": [
                {"shouldApply": true, "confidence": 0.8},
                {"shouldApply": false, "confidence": 0.2},
                {"shouldApply": true, "confidence": 0.9, "reasoning": "tiny fix"}
            ]
        }"#;
        let recommendations = normalize(raw).unwrap().label_recommendations.unwrap();
        assert!(recommendations.documentation.unwrap().should_apply);
        assert!(!recommendations.help_wanted.unwrap().should_apply);
        let gfi = recommendations.good_first_issue.unwrap();
        assert_eq!(gfi.reasoning.as_deref(), Some("tiny fix"));
    }

    #[test]
    fn test_bad_recommendation_entry_rejected_alone() {
        let raw = r#"{
            "classification": {"type": "question", "confidence": 0.9},
            "duplicateDetection": {"isDuplicate": false},
            "sentiment": {"tone": "neutral", "confidence": 0.5},
            "labelRecommendations": {
                "documentation": {"shouldApply": "yes", "confidence": 0.8},
                "helpWanted": {"shouldApply": true, "confidence": 4.0},
                "goodFirstIssue": {"shouldApply": true, "confidence": 0.9}
            }
        }"#;
        let recommendations = normalize(raw).unwrap().label_recommendations.unwrap();
        assert!(recommendations.documentation.is_none());
        assert!(recommendations.help_wanted.is_none());
        assert!(recommendations.good_first_issue.is_some());
    }

    #[test]
    fn test_invalid_recommendation_block_becomes_absent() {
        let raw = r#"{
            "classification": {"type": "question", "confidence": 0.9},
            "duplicateDetection": {"isDuplicate": false},
            "sentiment": {"tone": "neutral", "confidence": 0.5},
            "labelRecommendations": "apply all of them"
        }"#;
        let analysis = normalize(raw).unwrap();
        assert!(analysis.label_recommendations.is_none());
    }

    #[test]
    fn test_legacy_grammar_full_shape() {
        let raw = r##"{
            "classification": "bug",
            "tone": "Aggressive",
            "duplicate_detection": {
                "is_duplicate": true,
                "original_issue_number": "#7"
            },
            "suggested_response": "  Please share the log output.  "
        }"##;
        let analysis = normalize(raw).unwrap();
        assert_eq!(analysis.classification.kind, IssueKind::Bug);
        assert_eq!(analysis.classification.confidence, 1.0);
        assert_eq!(analysis.sentiment.tone, Tone::Hostile);
        assert_eq!(analysis.sentiment.confidence, 1.0);
        assert!(analysis.duplicate_detection.is_duplicate);
        assert_eq!(
            analysis.duplicate_detection.original_issue_number.unwrap().value(),
            7
        );
        assert_eq!(analysis.duplicate_detection.similarity_score, 1.0);
        assert_eq!(
            analysis.suggested_response.as_deref(),
            Some("Please share the log output.")
        );
    }

    #[test]
    fn test_legacy_duplicate_of_array() {
        let raw = r#"{
            "duplicate_detection": {"is_duplicate": true, "duplicate_of": [3]}
        }"#;
        let analysis = normalize(raw).unwrap();
        assert_eq!(
            analysis.duplicate_detection.original_issue_number.unwrap().value(),
            3
        );
        assert!(analysis.duplicate_detection.has_explicit_original_issue_reference);
    }

    #[test]
    fn test_legacy_requires_tone_string_or_duplicate_object() {
        let raw = r#"{"classification": "bug", "suggested_response": "hi"}"#;
        assert!(normalize(raw).is_none());
    }

    #[test]
    fn test_structured_alias_wins_over_legacy_keys() {
        // Qualifies for structured-alias; the stray legacy duplicate_detection
        // block must be silently ignored
        let raw = r#"{
            "classification": {"type": "feature", "confidence": 0.9},
            "duplicateDetection": {"isDuplicate": false, "similarityScore": 0.1},
            "sentiment": {"tone": "positive", "confidence": 0.8},
            "duplicate_detection": {"is_duplicate": true, "original_issue_number": 5}
        }"#;
        let analysis = normalize(raw).unwrap();
        assert!(!analysis.duplicate_detection.is_duplicate);
        assert!(analysis.duplicate_detection.original_issue_number.is_none());
        assert!(!analysis.duplicate_detection.has_explicit_original_issue_reference);
    }
}
