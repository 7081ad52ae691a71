//! Issue integrity validation and the pre-AI governance plan
//!
//! Before any model work happens, an issue must carry enough information to
//! be triaged at all. Invalid issues get exactly one "needs more info" label
//! and one comment per violation cycle; valid issues shed any stale error
//! labels and proceed to AI triage.

use crate::config::TriageConfig;
use crate::domain::Issue;
use crate::error::{Result, TriagoError};
use regex::RegexBuilder;
use serde::Serialize;

/// Minimum normalized title length
pub const MIN_TITLE_LEN: usize = 10;
/// Minimum normalized description length
pub const MIN_DESCRIPTION_LEN: usize = 30;

/// Pre-compiled, case-insensitive spam patterns
pub struct SpamPatternSet {
    patterns: Vec<regex::Regex>,
}

impl SpamPatternSet {
    pub fn compile(patterns: &[String]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| TriagoError::InvalidSpamPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            compiled.push(regex);
        }
        Ok(Self { patterns: compiled })
    }

    /// Whether any pattern matches; callers aggregate all matches into a
    /// single spam violation
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|regex| regex.is_match(text))
    }
}

/// Result of integrity validation, errors in detection order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueIntegrityReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Validates title, description, author, and spam content.
/// Error strings are stable: the governance comment quotes them verbatim.
pub fn validate_issue(issue: &Issue, spam_patterns: &SpamPatternSet) -> IssueIntegrityReport {
    let mut errors = Vec::new();

    if issue.title.is_empty() {
        errors.push("Title is required".to_string());
    } else if issue.title.normalized_len() < MIN_TITLE_LEN {
        errors.push(format!("Title is too short (min {} chars)", MIN_TITLE_LEN));
    }

    if issue.description.is_empty() {
        errors.push("Description is required".to_string());
    } else if issue.description.normalized_len() < MIN_DESCRIPTION_LEN {
        errors.push(format!(
            "Description is too short (min {} chars) to be useful",
            MIN_DESCRIPTION_LEN
        ));
    }

    if issue.author.is_empty() {
        errors.push("Author is required".to_string());
    }

    // One aggregated error no matter how many patterns match, or where
    let content = format!("{} {}", issue.title.normalized(), issue.description.normalized());
    if spam_patterns.matches(&content) {
        errors.push("Content contains spam keywords".to_string());
    }

    IssueIntegrityReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// What the webhook handler should do with the validation outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValidationPlan {
    /// Flag the issue: add the needs-info label and post one comment listing
    /// every violation
    FlagNeedsInfo { label: String, comment: String },
    /// Already flagged in an earlier cycle; repeating the comment would be
    /// spam of our own
    AlreadyFlagged,
    /// Valid: drop stale error labels and continue to AI triage
    Proceed { error_labels_to_remove: Vec<String> },
}

pub fn build_governance_plan(
    report: &IssueIntegrityReport,
    current_labels: &[String],
    config: &TriageConfig,
) -> ValidationPlan {
    if report.is_valid {
        let error_labels_to_remove = config
            .labels
            .error_labels
            .iter()
            .filter(|label| current_labels.iter().any(|existing| existing == *label))
            .cloned()
            .collect();
        return ValidationPlan::Proceed {
            error_labels_to_remove,
        };
    }

    let needs_info = &config.labels.needs_info;
    if current_labels.iter().any(|label| label == needs_info) {
        return ValidationPlan::AlreadyFlagged;
    }

    ValidationPlan::FlagNeedsInfo {
        label: needs_info.clone(),
        comment: needs_info_comment(&report.errors),
    }
}

fn needs_info_comment(errors: &[String]) -> String {
    let mut comment = String::from(
        "Thanks for opening this issue! It needs a bit more information before it can be triaged:\n\n",
    );
    for error in errors {
        comment.push_str("- ");
        comment.push_str(error);
        comment.push('\n');
    }
    comment.push_str("\nPlease edit the issue to address the points above.");
    comment
}
