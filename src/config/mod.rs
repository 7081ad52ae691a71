//! Configuration management for Triago
//!
//! Thresholds, label names, spam patterns, and response texts are all
//! configuration-driven so governance behavior can be tuned per repository
//! without code changes.

use crate::error::{Result, TriagoError};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub bot: BotConfig,
    pub thresholds: ThresholdsConfig,
    pub labels: LabelsConfig,
    pub validation: ValidationConfig,
    pub question: QuestionConfig,
    pub grounding: GroundingConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Bot identity and history lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Login the bot comments under; used to find its own earlier comments
    pub login: String,
    /// How many recent issues to request for duplicate fallback resolution
    pub recent_issue_limit: usize,
}

/// Confidence and similarity gates for every policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    /// Minimum classification confidence before a kind label is applied
    pub classification: f64,
    /// Minimum hostile-tone confidence before kind labels are suppressed
    pub tone: f64,
    /// Minimum similarity before duplicate actions apply
    pub duplicate_similarity: f64,
    /// Curation gates, one per label kind
    pub documentation: f64,
    pub help_wanted: f64,
    pub good_first_issue: f64,
}

/// Label names the governance actions work with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    pub bug: String,
    pub feature: String,
    pub question: String,
    pub duplicate: String,
    pub needs_info: String,
    pub needs_monitoring: String,
    pub documentation: String,
    pub help_wanted: String,
    pub good_first_issue: String,
    /// Labels removed once an issue passes integrity validation
    pub error_labels: Vec<String>,
}

impl LabelsConfig {
    pub fn kind_label(&self, kind: crate::analysis::IssueKind) -> &str {
        match kind {
            crate::analysis::IssueKind::Bug => &self.bug,
            crate::analysis::IssueKind::Feature => &self.feature,
            crate::analysis::IssueKind::Question => &self.question,
        }
    }

    /// The mutually exclusive kind-label set
    pub fn all_kind_labels(&self) -> [&str; 3] {
        [&self.bug, &self.feature, &self.question]
    }
}

/// Integrity validation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Case-insensitive regular expressions matched against title+description
    pub spam_patterns: Vec<String>,
}

/// Question-response settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionConfig {
    /// Keywords that make an issue look like a question, case-insensitive
    pub signal_keywords: Vec<String>,
    /// Fixed response used when the model suggests nothing usable
    pub fallback_checklist: String,
}

/// Grounding detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingConfig {
    /// Minimum length of a meaningful token
    pub min_token_len: usize,
    /// Tokens excluded from grounding comparison
    pub stop_words: Vec<String>,
}

impl TriageConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TriagoError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| TriagoError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: TriageConfig = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        // Validate configuration
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| TriagoError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: TRIAGO_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("TRIAGO_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        // Simple implementation for common overrides
        match path {
            "BOT__LOGIN" => {
                self.bot.login = value.to_string();
            }
            "THRESHOLDS__CLASSIFICATION" => {
                self.thresholds.classification = parse_env_f64(path, value)?;
            }
            "THRESHOLDS__TONE" => {
                self.thresholds.tone = parse_env_f64(path, value)?;
            }
            "THRESHOLDS__DUPLICATE_SIMILARITY" => {
                self.thresholds.duplicate_similarity = parse_env_f64(path, value)?;
            }
            _ => {
                tracing::debug!("Ignoring unknown env override: {}", path);
            }
        }
        Ok(())
    }
}

fn parse_env_f64(path: &str, value: &str) -> Result<f64> {
    value.parse().map_err(|_| TriagoError::InvalidConfigValue {
        path: path.to_string(),
        message: format!("Cannot parse '{}' as number", value),
    })
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            bot: BotConfig {
                login: "triago-bot".to_string(),
                recent_issue_limit: 20,
            },
            thresholds: ThresholdsConfig {
                classification: 0.8,
                tone: 0.8,
                duplicate_similarity: 0.85,
                documentation: 0.7,
                help_wanted: 0.7,
                good_first_issue: 0.75,
            },
            labels: LabelsConfig {
                bug: "type: bug".to_string(),
                feature: "type: feature".to_string(),
                question: "type: question".to_string(),
                duplicate: "duplicate".to_string(),
                needs_info: "needs more info".to_string(),
                needs_monitoring: "needs monitoring".to_string(),
                documentation: "documentation".to_string(),
                help_wanted: "help wanted".to_string(),
                good_first_issue: "good first issue".to_string(),
                error_labels: vec!["needs more info".to_string()],
            },
            validation: ValidationConfig {
                spam_patterns: vec![
                    r"free\s+money".to_string(),
                    r"(easy|fast)\s+cash".to_string(),
                    r"viagra|cialis".to_string(),
                    r"online\s+casino".to_string(),
                    r"crypto\s+(pump|giveaway)".to_string(),
                    r"click\s+here\s+to\s+claim".to_string(),
                    r"subscribe\s+to\s+my".to_string(),
                ],
            },
            question: QuestionConfig {
                signal_keywords: vec![
                    "how do i".to_string(),
                    "how to".to_string(),
                    "how can i".to_string(),
                    "is it possible".to_string(),
                    "what is".to_string(),
                    "why does".to_string(),
                    "can someone".to_string(),
                ],
                fallback_checklist: "Thanks for your question! While you wait for a maintainer, \
                                     please check:\n\n\
                                     - [ ] The README and documentation\n\
                                     - [ ] Existing issues and discussions\n\
                                     - [ ] The version you are running is the latest release\n\n\
                                     Adding reproduction steps or logs will speed things up."
                    .to_string(),
            },
            grounding: GroundingConfig {
                min_token_len: 5,
                stop_words: [
                    "about", "after", "before", "being", "could", "every", "first", "other",
                    "please", "should", "since", "their", "there", "these", "those", "using",
                    "where", "which", "while", "would",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TriageConfig::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = TriageConfig::default();
        config.save(&path).unwrap();

        let loaded = TriageConfig::load(&path).unwrap();
        assert_eq!(loaded.bot.login, config.bot.login);
        assert_eq!(loaded.thresholds.classification, config.thresholds.classification);
        assert_eq!(loaded.labels.duplicate, config.labels.duplicate);
        assert_eq!(
            loaded.question.signal_keywords.len(),
            config.question.signal_keywords.len()
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = TriageConfig::load(Path::new("/nonexistent/triago.toml"));
        assert!(matches!(result, Err(TriagoError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_kind_label_mapping() {
        let config = TriageConfig::default();
        assert_eq!(config.labels.kind_label(crate::analysis::IssueKind::Bug), "type: bug");
        assert_eq!(
            config.labels.all_kind_labels(),
            ["type: bug", "type: feature", "type: question"]
        );
    }
}
