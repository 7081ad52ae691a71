//! Duplicate triage policy
//!
//! Decides whether to mark an issue as a duplicate of another one. The
//! duplicate comment is gated on the label being newly added so repeated
//! webhook deliveries never post it twice.

use crate::domain::IssueNumber;
use serde::Serialize;

/// Outcome of the duplicate decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateDecision {
    pub should_apply_duplicate_actions: bool,
    /// Resolved original issue, after fallback substitution if any
    pub original_issue_number: Option<IssueNumber>,
    pub similarity_score: f64,
    pub used_fallback_original_issue: bool,
    /// Comment to post when the duplicate label is newly added
    pub comment_body: Option<String>,
}

#[allow(clippy::too_many_arguments)]
pub fn decide(
    is_duplicate: bool,
    original_issue_number: Option<IssueNumber>,
    similarity_score: f64,
    has_explicit_reference: bool,
    current_issue: IssueNumber,
    fallback_original_issue: Option<IssueNumber>,
    similarity_threshold: f64,
) -> DuplicateDecision {
    let has_similarity_score = similarity_score >= similarity_threshold;

    // Substitute the most recent other open issue only when the model gave no
    // explicit reference at all. An explicit reference that failed to resolve
    // is an unresolved reference, not a missing one.
    let mut used_fallback_original_issue = false;
    let resolved = match original_issue_number {
        Some(number) => Some(number),
        None if has_similarity_score && !has_explicit_reference => {
            if let Some(fallback) = fallback_original_issue {
                used_fallback_original_issue = true;
                Some(fallback)
            } else {
                None
            }
        }
        None => None,
    };

    let has_valid_original_issue = resolved.map(|number| number != current_issue).unwrap_or(false);
    let should_apply = is_duplicate && has_similarity_score && has_valid_original_issue;

    let comment_body = match resolved {
        Some(number) if should_apply => {
            let percent = (similarity_score * 100.0).round() as u32;
            Some(format!(
                "This issue appears to be a duplicate of #{} (Similarity: {}%).",
                number, percent
            ))
        }
        _ => None,
    };

    DuplicateDecision {
        should_apply_duplicate_actions: should_apply,
        original_issue_number: resolved,
        similarity_score,
        used_fallback_original_issue,
        comment_body,
    }
}
