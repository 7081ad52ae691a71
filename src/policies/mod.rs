//! Governance policy layer
//!
//! One pure decision function per governance concern. Every function maps an
//! analysis record, issue state, and configured thresholds to an immutable
//! decision; nothing in this module performs side effects. The plan builder
//! composes the five concerns into a single `ActionPlan`.

pub mod curation;
pub mod duplicate;
pub mod kind;
pub mod plan;
pub mod question;
pub mod tone;

pub use curation::CurationDecision;
pub use duplicate::DuplicateDecision;
pub use kind::KindDecision;
pub use plan::{ActionPlan, ActionPlanBuilder};
pub use question::{QuestionDecision, ResponseSource};
pub use tone::ToneDecision;
