//! Question-response policy
//!
//! Decides whether the bot should answer an issue that looks like a question,
//! and with which body: the model's suggested response when usable, otherwise
//! the fixed fallback checklist. Published comments carry a hidden
//! source-specific marker so repeated webhook deliveries can detect an
//! earlier answer.

use crate::analysis::{IssueKind, Tone};
use crate::config::GroundingConfig;
use crate::domain::IssueAction;
use serde::Serialize;
use std::collections::HashSet;

/// Where the response body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    AiSuggestedResponse,
    FallbackChecklist,
}

impl ResponseSource {
    /// Hidden HTML-comment marker prepended to published comments; the
    /// idempotency check looks for this prefix among the bot's comments.
    pub fn comment_marker(&self) -> &'static str {
        match self {
            Self::AiSuggestedResponse => "<!-- triago:question-response:ai -->",
            Self::FallbackChecklist => "<!-- triago:question-response:fallback -->",
        }
    }
}

/// Outcome of the question-response decision
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionDecision {
    pub should_create_comment: bool,
    pub response_source: Option<ResponseSource>,
    pub response_body: Option<String>,
    /// Whether a suggested response demonstrably reuses repository vocabulary
    pub uses_repository_context: bool,
}

/// Question heuristic over title+body: an ASCII or Spanish inverted question
/// mark, or any configured signal keyword, case-insensitive.
pub fn looks_like_question(title: &str, body: &str, signal_keywords: &[String]) -> bool {
    let text = format!("{} {}", title, body);
    if text.contains('?') || text.contains('¿') {
        return true;
    }
    let lowered = text.to_lowercase();
    signal_keywords
        .iter()
        .any(|keyword| lowered.contains(&keyword.to_lowercase()))
}

#[allow(clippy::too_many_arguments)]
pub fn decide(
    action: IssueAction,
    tone: Tone,
    classification_kind: IssueKind,
    classification_confidence: f64,
    classification_threshold: f64,
    looks_like_question: bool,
    suggested_response: Option<&str>,
    fallback_checklist: &str,
    repo_context: &str,
    grounding: &GroundingConfig,
) -> QuestionDecision {
    // Only answer freshly opened, non-hostile issues
    if action != IssueAction::Opened || tone == Tone::Hostile {
        return QuestionDecision::default();
    }

    let classified_as_question = classification_kind == IssueKind::Question
        && classification_confidence >= classification_threshold;
    if !classified_as_question && !looks_like_question {
        return QuestionDecision::default();
    }

    // Model-suggested response first; the checklist only backs up the heuristic
    let suggested = suggested_response.map(str::trim).filter(|text| !text.is_empty());
    let (response_source, response_body) = match suggested {
        Some(text) => (ResponseSource::AiSuggestedResponse, text.to_string()),
        None if looks_like_question && !fallback_checklist.trim().is_empty() => {
            (ResponseSource::FallbackChecklist, fallback_checklist.to_string())
        }
        None => return QuestionDecision::default(),
    };

    let uses_repository_context = response_source == ResponseSource::AiSuggestedResponse
        && is_grounded_in(repo_context, &response_body, grounding);

    QuestionDecision {
        should_create_comment: true,
        response_source: Some(response_source),
        response_body: Some(response_body),
        uses_repository_context,
    }
}

/// A response uses repository context when at least two distinct meaningful
/// tokens from the repository's long-form text also appear in it.
fn is_grounded_in(repo_context: &str, response: &str, grounding: &GroundingConfig) -> bool {
    if repo_context.is_empty() {
        return false;
    }
    let context_tokens = meaningful_tokens(repo_context, grounding);
    if context_tokens.is_empty() {
        return false;
    }
    let response_tokens = meaningful_tokens(response, grounding);
    context_tokens.intersection(&response_tokens).count() >= 2
}

/// Lower-cased alphanumeric runs of the configured minimum length, minus the
/// stop-word list
fn meaningful_tokens(text: &str, grounding: &GroundingConfig) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= grounding.min_token_len)
        .filter(|token| !grounding.stop_words.iter().any(|stop| stop == token))
        .map(str::to_string)
        .collect()
}
