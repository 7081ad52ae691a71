//! Triage orchestration
//!
//! Two-phase flow per webhook delivery: `gate` runs the identity and
//! integrity checks and executes the pre-AI governance plan; `govern`
//! consumes the already-fetched model response and applies the policy
//! engine's action plan. The model call itself happens between the phases,
//! outside this crate, and only for issues that passed the gate.

use crate::analysis::AnalysisNormalizer;
use crate::config::{ConfigValidator, TriageConfig};
use crate::domain::{
    Issue, IssueAction, IssueAuthor, IssueDescription, IssueNumber, IssueSnapshot, IssueTitle,
    RepoSlug,
};
use crate::error::Result;
use crate::execution::{GovernanceExecutionContext, QuestionResponseMetrics};
use crate::gateway::{GovernanceGateway, HistoryGateway};
use crate::policies::ActionPlanBuilder;
use crate::validation::{build_governance_plan, validate_issue, SpamPatternSet, ValidationPlan};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw issue event as delivered by the webhook transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueEvent {
    pub repo: RepoSlug,
    pub action: String,
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: String,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub repo_context: String,
}

/// Why a triage request ended without governance actions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum SkipReason {
    /// Action verb other than opened/edited
    UnsupportedAction(String),
    /// Event failed an identity check before validation
    MalformedEvent(String),
    /// No grammar could reconcile the model response; fail open
    AnalysisUnusable,
}

/// Final outcome of one triage request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum TriageOutcome {
    Skipped { reason: SkipReason },
    /// Issue failed integrity validation and was flagged this cycle
    NeedsMoreInfo {
        errors: Vec<String>,
        actions_applied: usize,
    },
    /// Issue failed integrity validation but was flagged earlier
    AlreadyFlagged,
    Completed { actions_applied: usize },
}

/// Outcome of the pre-AI gate phase
#[derive(Debug, Clone)]
pub enum GateOutcome {
    /// Issue is valid; fetch a model response and call `govern`
    Proceed { snapshot: IssueSnapshot },
    /// Request finished inside the gate
    Handled(TriageOutcome),
}

/// Orchestrates validation, normalization, and governance for one repository
/// installation. Owns the compiled spam patterns and the injected gateways.
pub struct TriageService {
    config: TriageConfig,
    spam_patterns: SpamPatternSet,
    gateway: Arc<dyn GovernanceGateway>,
    history: Arc<dyn HistoryGateway>,
    metrics: Option<Arc<QuestionResponseMetrics>>,
}

impl TriageService {
    pub fn new(
        config: TriageConfig,
        gateway: Arc<dyn GovernanceGateway>,
        history: Arc<dyn HistoryGateway>,
    ) -> Result<Self> {
        ConfigValidator::validate(&config)?;
        let spam_patterns = SpamPatternSet::compile(&config.validation.spam_patterns)?;
        Ok(Self {
            config,
            spam_patterns,
            gateway,
            history,
            metrics: None,
        })
    }

    /// Attach shared counters for question-response-source metrics
    pub fn with_metrics(mut self, metrics: Arc<QuestionResponseMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Pre-AI gate: verb support, identity checks, integrity validation, and
    /// the validation governance plan. No model output is consumed here.
    pub async fn gate(&self, event: &IssueEvent) -> Result<GateOutcome> {
        let Some(action) = IssueAction::parse(&event.action) else {
            tracing::info!(action = %event.action, "skipping unsupported action");
            return Ok(GateOutcome::Handled(TriageOutcome::Skipped {
                reason: SkipReason::UnsupportedAction(event.action.clone()),
            }));
        };

        let Some(number) = IssueNumber::new(event.number) else {
            tracing::warn!(number = event.number, "skipping event with invalid issue number");
            return Ok(GateOutcome::Handled(TriageOutcome::Skipped {
                reason: SkipReason::MalformedEvent("issue number must be positive".to_string()),
            }));
        };

        let issue = Issue {
            number,
            title: IssueTitle::new(&event.title),
            description: IssueDescription::new(&event.body),
            author: IssueAuthor::new(&event.author),
            created_at: event.created_at,
        };
        let report = validate_issue(&issue, &self.spam_patterns);

        match build_governance_plan(&report, &event.labels, &self.config) {
            ValidationPlan::FlagNeedsInfo { label, comment } => {
                tracing::info!(
                    repo = %event.repo,
                    issue = number.value(),
                    violations = report.errors.len(),
                    "flagging issue for more information"
                );
                self.gateway
                    .add_labels(&event.repo, number, &[label])
                    .await
                    .map_err(|e| self.log_gateway_failure("add needs-info label", e))?;
                self.gateway
                    .create_comment(&event.repo, number, &comment)
                    .await
                    .map_err(|e| self.log_gateway_failure("create validation comment", e))?;
                Ok(GateOutcome::Handled(TriageOutcome::NeedsMoreInfo {
                    errors: report.errors,
                    actions_applied: 2,
                }))
            }
            ValidationPlan::AlreadyFlagged => {
                tracing::debug!(
                    repo = %event.repo,
                    issue = number.value(),
                    "issue still invalid but already flagged"
                );
                Ok(GateOutcome::Handled(TriageOutcome::AlreadyFlagged))
            }
            ValidationPlan::Proceed {
                error_labels_to_remove,
            } => {
                let mut labels = event.labels.clone();
                for label in &error_labels_to_remove {
                    self.gateway
                        .remove_label(&event.repo, number, label)
                        .await
                        .map_err(|e| self.log_gateway_failure("remove error label", e))?;
                    labels.retain(|existing| existing != label);
                }
                self.gateway
                    .log_validated_issue(&event.repo, number)
                    .await
                    .map_err(|e| self.log_gateway_failure("log validated issue", e))?;

                let recent_issues = self
                    .history
                    .find_recent_issues(&event.repo, self.config.bot.recent_issue_limit)
                    .await
                    .map_err(|e| self.log_gateway_failure("find recent issues", e))?;

                Ok(GateOutcome::Proceed {
                    snapshot: IssueSnapshot {
                        repo: event.repo.clone(),
                        number,
                        title: event.title.clone(),
                        body: event.body.clone(),
                        action,
                        labels,
                        recent_issues,
                        repo_context: event.repo_context.clone(),
                    },
                })
            }
        }
    }

    /// Governance phase: normalize the already-fetched model response, build
    /// the action plan, and apply it. An unusable response skips the request
    /// instead of failing it: the bot must never block on model
    /// unreliability.
    pub async fn govern(
        &self,
        snapshot: &IssueSnapshot,
        raw_model_response: &str,
    ) -> Result<TriageOutcome> {
        let Some(analysis) = AnalysisNormalizer::normalize(raw_model_response, snapshot.number)
        else {
            tracing::warn!(
                repo = %snapshot.repo,
                issue = snapshot.number.value(),
                "model response unusable, skipping governance"
            );
            return Ok(TriageOutcome::Skipped {
                reason: SkipReason::AnalysisUnusable,
            });
        };

        let plan = ActionPlanBuilder::new(&self.config).build(snapshot, &analysis);
        let mut context = GovernanceExecutionContext::new(
            &snapshot.repo,
            snapshot.number,
            &snapshot.labels,
            plan,
            self.gateway.as_ref(),
            self.history.as_ref(),
            &self.config,
            self.metrics.as_deref(),
        );
        let actions_applied = context.apply().await?;

        tracing::info!(
            repo = %snapshot.repo,
            issue = snapshot.number.value(),
            actions_applied,
            "triage completed"
        );
        Ok(TriageOutcome::Completed { actions_applied })
    }

    fn log_gateway_failure(
        &self,
        operation: &str,
        error: crate::error::TriagoError,
    ) -> crate::error::TriagoError {
        tracing::error!(operation, %error, "gateway call failed during gate phase");
        error
    }
}
