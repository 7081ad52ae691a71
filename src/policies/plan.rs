//! Action plan composition
//!
//! Builds one immutable `ActionPlan` per triage request out of the five
//! policy decisions. The plan is consumed exactly once by the execution
//! context, in the fixed application order classification -> duplicate ->
//! tone -> question -> curation.

use crate::analysis::AiAnalysis;
use crate::config::TriageConfig;
use crate::domain::IssueSnapshot;
use crate::policies::curation::{self, CurationDecision, CurationRules};
use crate::policies::duplicate::{self, DuplicateDecision};
use crate::policies::kind::{self, KindDecision};
use crate::policies::question::{self, QuestionDecision};
use crate::policies::tone::{self, ToneDecision};
use serde::Serialize;

/// One sub-decision per governance concern, built once and never mutated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionPlan {
    pub classification: KindDecision,
    pub duplicate: DuplicateDecision,
    pub question: QuestionDecision,
    pub tone: ToneDecision,
    pub curation: CurationDecision,
}

/// Composes the policy decisions for one issue snapshot and analysis record
pub struct ActionPlanBuilder<'a> {
    config: &'a TriageConfig,
}

impl<'a> ActionPlanBuilder<'a> {
    pub fn new(config: &'a TriageConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, snapshot: &IssueSnapshot, analysis: &AiAnalysis) -> ActionPlan {
        let labels = &self.config.labels;
        let thresholds = &self.config.thresholds;

        let classification = kind::decide(
            labels.kind_label(analysis.classification.kind),
            analysis.classification.confidence,
            thresholds.classification,
            analysis.sentiment.tone,
            analysis.sentiment.confidence,
            thresholds.tone,
            &snapshot.labels,
            &labels.all_kind_labels(),
        );

        let duplicate = duplicate::decide(
            analysis.duplicate_detection.is_duplicate,
            analysis.duplicate_detection.original_issue_number,
            analysis.duplicate_detection.similarity_score,
            analysis
                .duplicate_detection
                .has_explicit_original_issue_reference,
            snapshot.number,
            snapshot.fallback_original_issue(),
            thresholds.duplicate_similarity,
        );

        let looks_like_question = question::looks_like_question(
            &snapshot.title,
            &snapshot.body,
            &self.config.question.signal_keywords,
        );
        let question = question::decide(
            snapshot.action,
            analysis.sentiment.tone,
            analysis.classification.kind,
            analysis.classification.confidence,
            thresholds.classification,
            looks_like_question,
            analysis.suggested_response.as_deref(),
            &self.config.question.fallback_checklist,
            &snapshot.repo_context,
            &self.config.grounding,
        );

        let tone = tone::decide(analysis.sentiment.tone, &labels.needs_monitoring);

        let curation = curation::decide(
            analysis.sentiment.tone,
            duplicate.should_apply_duplicate_actions,
            analysis.classification.kind,
            analysis.classification.confidence,
            analysis.label_recommendations.as_ref(),
            &snapshot.labels,
            &CurationRules {
                documentation_label: &labels.documentation,
                help_wanted_label: &labels.help_wanted,
                good_first_issue_label: &labels.good_first_issue,
                documentation_threshold: thresholds.documentation,
                help_wanted_threshold: thresholds.help_wanted,
                good_first_issue_threshold: thresholds.good_first_issue,
            },
        );

        ActionPlan {
            classification,
            duplicate,
            question,
            tone,
            curation,
        }
    }
}
