//! Value objects and issue-tracker entities
//!
//! Parsing and validation primitives with no dependencies on the rest of the
//! crate. Everything arriving from a webhook payload or a tracker API response
//! passes through these wrappers before the policy layer sees it.

use crate::error::{Result, TriagoError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Positive issue number.
///
/// Zero and negative values never identify an issue on any tracker, so they
/// fail construction instead of flowing into the policy layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct IssueNumber(u64);

impl IssueNumber {
    pub fn new(value: u64) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Parse a loose issue reference: `123`, `"123"`, or `"#123"`.
    pub fn parse_reference(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        digits.parse::<u64>().ok().and_then(Self::new)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for IssueNumber {
    type Error = String;

    fn try_from(value: u64) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "issue number must be positive".to_string())
    }
}

impl From<IssueNumber> for u64 {
    fn from(value: IssueNumber) -> Self {
        value.0
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repository identifier in `owner/name` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let (owner, name) = trimmed
            .split_once('/')
            .ok_or_else(|| TriagoError::InvalidRepository {
                raw: raw.to_string(),
            })?;
        let owner = owner.trim();
        let name = name.trim();
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(TriagoError::InvalidRepository {
                raw: raw.to_string(),
            });
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl TryFrom<String> for RepoSlug {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value).map_err(|e| e.to_string())
    }
}

impl From<RepoSlug> for String {
    fn from(value: RepoSlug) -> Self {
        value.as_slug()
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Collapse internal whitespace runs and trim the ends.
/// All length checks run against this normalized form.
fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Issue title with whitespace normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTitle {
    raw: String,
    normalized: String,
}

impl IssueTitle {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize_whitespace(&raw);
        Self { raw, normalized }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn normalized_len(&self) -> usize {
        self.normalized.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Issue description (body) with whitespace normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDescription {
    raw: String,
    normalized: String,
}

impl IssueDescription {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize_whitespace(&raw);
        Self { raw, normalized }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn normalized_len(&self) -> usize {
        self.normalized.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Issue author login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueAuthor(String);

impl IssueAuthor {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn login(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Issue entity as received from the tracker, wrapped in validated value objects
#[derive(Debug, Clone)]
pub struct Issue {
    pub number: IssueNumber,
    pub title: IssueTitle,
    pub description: IssueDescription,
    pub author: IssueAuthor,
    pub created_at: DateTime<Utc>,
}

/// Webhook action verbs this engine reacts to.
/// Anything else is skipped before validation or AI work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueAction {
    Opened,
    Edited,
}

impl IssueAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "opened" => Some(Self::Opened),
            "edited" => Some(Self::Edited),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Edited => "edited",
        }
    }
}

/// Open/closed state of a tracker issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// Summary row returned by the history gateway, used for duplicate fallback
/// resolution. Callers supply these most-recent-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentIssueSummary {
    pub number: IssueNumber,
    pub title: String,
    pub labels: Vec<String>,
    pub state: IssueState,
}

/// Everything the policy layer needs to know about one issue at triage time.
/// Owned by the caller; the policy layer never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueSnapshot {
    pub repo: RepoSlug,
    pub number: IssueNumber,
    pub title: String,
    pub body: String,
    pub action: IssueAction,
    pub labels: Vec<String>,
    /// Recent issues in this repository, most recent first
    #[serde(default)]
    pub recent_issues: Vec<RecentIssueSummary>,
    /// Repository long-form text (e.g. the README) for grounding detection
    #[serde(default)]
    pub repo_context: String,
}

impl IssueSnapshot {
    /// Most recent open issue other than the one being triaged, if any.
    /// This is the fallback candidate for duplicate resolution.
    pub fn fallback_original_issue(&self) -> Option<IssueNumber> {
        self.recent_issues
            .iter()
            .find(|summary| summary.number != self.number && summary.state == IssueState::Open)
            .map(|summary| summary.number)
    }
}
