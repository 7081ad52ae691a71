//! Governance execution context
//!
//! Applies one action plan against the gateway with idempotent add/remove
//! semantics. The context owns a live mirror of the issue's label set, seeded
//! from the snapshot: every step reads the up-to-date mirror, so a label
//! removed by the classification step cannot be re-added by a later step
//! that still believes it is present. Sub-plans run strictly in the order
//! classification -> duplicate -> tone -> question -> curation, and gateway
//! calls are awaited sequentially, never in parallel.

use crate::config::TriageConfig;
use crate::domain::{IssueNumber, RepoSlug};
use crate::error::{Result, TriagoError};
use crate::gateway::{GovernanceAction, GovernanceGateway, HistoryGateway};
use crate::policies::{
    ActionPlan, CurationDecision, DuplicateDecision, KindDecision, QuestionDecision, ResponseSource,
    ToneDecision,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for which source answered question issues. Shared across
/// requests; increments are atomic with respect to the executor.
#[derive(Debug, Default)]
pub struct QuestionResponseMetrics {
    ai_suggested: AtomicU64,
    fallback_checklist: AtomicU64,
}

impl QuestionResponseMetrics {
    pub fn record(&self, source: ResponseSource) {
        match source {
            ResponseSource::AiSuggestedResponse => {
                self.ai_suggested.fetch_add(1, Ordering::Relaxed);
            }
            ResponseSource::FallbackChecklist => {
                self.fallback_checklist.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn ai_suggested(&self) -> u64 {
        self.ai_suggested.load(Ordering::Relaxed)
    }

    pub fn fallback_checklist(&self) -> u64 {
        self.fallback_checklist.load(Ordering::Relaxed)
    }
}

/// Request-scoped applier for one action plan. Created per triage request and
/// discarded afterwards.
pub struct GovernanceExecutionContext<'a> {
    repo: &'a RepoSlug,
    issue_number: IssueNumber,
    /// Live mirror of the issue's label set
    labels: HashSet<String>,
    /// Ordered log of the actions actually performed
    applied: Vec<GovernanceAction>,
    plan: Option<ActionPlan>,
    gateway: &'a dyn GovernanceGateway,
    history: &'a dyn HistoryGateway,
    config: &'a TriageConfig,
    metrics: Option<&'a QuestionResponseMetrics>,
}

impl<'a> GovernanceExecutionContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        repo: &'a RepoSlug,
        issue_number: IssueNumber,
        current_labels: &[String],
        plan: ActionPlan,
        gateway: &'a dyn GovernanceGateway,
        history: &'a dyn HistoryGateway,
        config: &'a TriageConfig,
        metrics: Option<&'a QuestionResponseMetrics>,
    ) -> Self {
        Self {
            repo,
            issue_number,
            labels: current_labels.iter().cloned().collect(),
            applied: Vec::new(),
            plan: Some(plan),
            gateway,
            history,
            config,
            metrics,
        }
    }

    /// Number of gateway actions performed so far
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// Ordered list of the actions performed so far
    pub fn applied_actions(&self) -> &[GovernanceAction] {
        &self.applied
    }

    /// Adds a label unless the mirror already has it. Returns whether a
    /// gateway call was made.
    pub async fn add_label_if_missing(&mut self, label: &str) -> Result<bool> {
        if self.labels.contains(label) {
            return Ok(false);
        }

        self.gateway
            .add_labels(self.repo, self.issue_number, &[label.to_string()])
            .await
            .map_err(|e| self.gateway_failure("add label", label, e))?;

        self.labels.insert(label.to_string());
        self.applied.push(GovernanceAction::AddLabel {
            label: label.to_string(),
        });
        Ok(true)
    }

    /// Removes a label if the mirror has it. Returns whether a gateway call
    /// was made.
    pub async fn remove_label_if_present(&mut self, label: &str) -> Result<bool> {
        if !self.labels.contains(label) {
            return Ok(false);
        }

        self.gateway
            .remove_label(self.repo, self.issue_number, label)
            .await
            .map_err(|e| self.gateway_failure("remove label", label, e))?;

        self.labels.remove(label);
        self.applied.push(GovernanceAction::RemoveLabel {
            label: label.to_string(),
        });
        Ok(true)
    }

    async fn create_comment(&mut self, body: &str) -> Result<()> {
        self.gateway
            .create_comment(self.repo, self.issue_number, body)
            .await
            .map_err(|e| self.gateway_failure("create comment", "", e))?;

        self.applied.push(GovernanceAction::CreateComment {
            body: body.to_string(),
        });
        Ok(())
    }

    /// Applies the plan this context was built with. Consumes it: a second
    /// call is a programming error, not recoverable input.
    pub async fn apply(&mut self) -> Result<usize> {
        let plan = self.plan.take().ok_or(TriagoError::MissingActionPlan)?;

        self.apply_classification(&plan.classification).await?;
        self.apply_duplicate(&plan.duplicate).await?;
        self.apply_tone(&plan.tone).await?;
        self.apply_question(&plan.question).await?;
        self.apply_curation(&plan.curation).await?;

        tracing::debug!(
            issue = self.issue_number.value(),
            applied = self.applied.len(),
            "governance plan applied"
        );
        Ok(self.applied.len())
    }

    async fn apply_classification(&mut self, decision: &KindDecision) -> Result<()> {
        for label in &decision.labels_to_add {
            self.add_label_if_missing(label).await?;
        }
        for label in &decision.labels_to_remove {
            self.remove_label_if_present(label).await?;
        }
        Ok(())
    }

    async fn apply_duplicate(&mut self, decision: &DuplicateDecision) -> Result<()> {
        if !decision.should_apply_duplicate_actions {
            return Ok(());
        }

        let duplicate_label = self.config.labels.duplicate.clone();
        let newly_added = self.add_label_if_missing(&duplicate_label).await?;

        // The comment rides on the label add: if the label was already there,
        // an earlier run already commented
        if newly_added {
            if let Some(body) = &decision.comment_body {
                self.create_comment(body).await?;
            }
        }
        Ok(())
    }

    async fn apply_tone(&mut self, decision: &ToneDecision) -> Result<()> {
        for label in &decision.labels_to_add {
            self.add_label_if_missing(label).await?;
        }
        Ok(())
    }

    async fn apply_question(&mut self, decision: &QuestionDecision) -> Result<()> {
        if !decision.should_create_comment {
            return Ok(());
        }
        let (Some(source), Some(body)) = (decision.response_source, &decision.response_body) else {
            return Ok(());
        };

        let marker = source.comment_marker();
        let already_answered = self
            .history
            .has_issue_comment_with_prefix(
                self.repo,
                self.issue_number,
                marker,
                &self.config.bot.login,
            )
            .await
            .map_err(|e| self.gateway_failure("find bot comment", marker, e))?;
        if already_answered {
            tracing::debug!(
                issue = self.issue_number.value(),
                "question already answered, skipping comment"
            );
            return Ok(());
        }

        let full_body = format!("{}\n{}", marker, body);
        self.create_comment(&full_body).await?;
        if let Some(metrics) = self.metrics {
            metrics.record(source);
        }
        Ok(())
    }

    async fn apply_curation(&mut self, decision: &CurationDecision) -> Result<()> {
        for label in &decision.labels_to_add {
            self.add_label_if_missing(label).await?;
        }
        Ok(())
    }

    fn gateway_failure(&self, operation: &str, detail: &str, error: TriagoError) -> TriagoError {
        tracing::error!(
            repo = %self.repo,
            issue = self.issue_number.value(),
            operation,
            detail,
            %error,
            "gateway call failed"
        );
        error
    }
}
