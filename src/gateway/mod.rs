//! Boundary contracts to the issue tracker
//!
//! The policy engine never talks to a tracker directly: it produces
//! instructions and consumes these traits. Concrete REST adapters live
//! outside this crate.

use crate::domain::{IssueNumber, RecentIssueSummary, RepoSlug};
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// One governance instruction, as actually performed against the tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum GovernanceAction {
    AddLabel { label: String },
    RemoveLabel { label: String },
    CreateComment { body: String },
    LogValidatedIssue,
}

/// Mutating side of the tracker boundary.
///
/// Failures propagate to the caller uncaught, with one exception the adapter
/// must absorb itself: a "label not found" response to `remove_label` is a
/// successful no-op, because the remote label store is eventually consistent
/// with the mirror this engine maintains.
#[async_trait]
pub trait GovernanceGateway: Send + Sync {
    async fn add_labels(&self, repo: &RepoSlug, issue: IssueNumber, labels: &[String])
        -> Result<()>;

    async fn remove_label(&self, repo: &RepoSlug, issue: IssueNumber, label: &str) -> Result<()>;

    async fn create_comment(&self, repo: &RepoSlug, issue: IssueNumber, body: &str) -> Result<()>;

    async fn log_validated_issue(&self, repo: &RepoSlug, issue: IssueNumber) -> Result<()>;
}

/// Read-only side of the tracker boundary
#[async_trait]
pub trait HistoryGateway: Send + Sync {
    /// Recent issues in the repository, most recent first
    async fn find_recent_issues(
        &self,
        repo: &RepoSlug,
        limit: usize,
    ) -> Result<Vec<RecentIssueSummary>>;

    /// Whether the given author already commented on the issue with a body
    /// starting with `prefix`
    async fn has_issue_comment_with_prefix(
        &self,
        repo: &RepoSlug,
        issue: IssueNumber,
        prefix: &str,
        author_login: &str,
    ) -> Result<bool>;
}
