//! Triago - Issue Triage Bot Core
//!
//! Turns unreliable model output into a validated analysis record and maps
//! that record plus repository context into a deterministic, idempotent set
//! of governance actions (labels, comments), executed through injected
//! gateways. Transport, the concrete tracker client, and the model client
//! all live outside this crate.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod execution;
pub mod gateway;
pub mod policies;
pub mod triage;
pub mod validation;

pub use analysis::{AiAnalysis, AnalysisNormalizer};
pub use config::TriageConfig;
pub use error::{Result, TriagoError};
pub use execution::{GovernanceExecutionContext, QuestionResponseMetrics};
pub use gateway::{GovernanceAction, GovernanceGateway, HistoryGateway};
pub use policies::{ActionPlan, ActionPlanBuilder};
pub use triage::{GateOutcome, IssueEvent, SkipReason, TriageOutcome, TriageService};
