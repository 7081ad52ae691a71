use crate::config::TriageConfig;
use crate::error::{Result, TriagoError, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &TriageConfig) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_bot(config, &mut errors);
        Self::validate_thresholds(config, &mut errors);
        Self::validate_labels(config, &mut errors);
        Self::validate_spam_patterns(config, &mut errors);
        Self::validate_question(config, &mut errors);
        Self::validate_grounding(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(TriagoError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &TriageConfig, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_bot(config: &TriageConfig, errors: &mut Vec<ValidationError>) {
        if config.bot.login.trim().is_empty() {
            errors.push(ValidationError::new("bot.login", "Bot login must not be empty"));
        }
        if config.bot.recent_issue_limit == 0 {
            errors.push(ValidationError::new(
                "bot.recent_issue_limit",
                "Recent issue limit must be greater than 0",
            ));
        }
    }

    fn validate_thresholds(config: &TriageConfig, errors: &mut Vec<ValidationError>) {
        let thresholds = [
            ("thresholds.classification", config.thresholds.classification),
            ("thresholds.tone", config.thresholds.tone),
            (
                "thresholds.duplicate_similarity",
                config.thresholds.duplicate_similarity,
            ),
            ("thresholds.documentation", config.thresholds.documentation),
            ("thresholds.help_wanted", config.thresholds.help_wanted),
            (
                "thresholds.good_first_issue",
                config.thresholds.good_first_issue,
            ),
        ];

        for (path, value) in thresholds {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                errors.push(ValidationError::new(
                    path,
                    format!("Threshold must be within [0, 1], got {}", value),
                ));
            }
        }
    }

    fn validate_labels(config: &TriageConfig, errors: &mut Vec<ValidationError>) {
        let labels = [
            ("labels.bug", &config.labels.bug),
            ("labels.feature", &config.labels.feature),
            ("labels.question", &config.labels.question),
            ("labels.duplicate", &config.labels.duplicate),
            ("labels.needs_info", &config.labels.needs_info),
            ("labels.needs_monitoring", &config.labels.needs_monitoring),
            ("labels.documentation", &config.labels.documentation),
            ("labels.help_wanted", &config.labels.help_wanted),
            ("labels.good_first_issue", &config.labels.good_first_issue),
        ];

        for (path, label) in labels {
            if label.trim().is_empty() {
                errors.push(ValidationError::new(path, "Label name must not be empty"));
            }
        }

        // Kind labels must stay distinct for mutual exclusivity to mean anything
        let kinds = config.labels.all_kind_labels();
        if kinds[0] == kinds[1] || kinds[0] == kinds[2] || kinds[1] == kinds[2] {
            errors.push(ValidationError::new(
                "labels",
                "Kind labels (bug/feature/question) must be distinct",
            ));
        }
    }

    fn validate_spam_patterns(config: &TriageConfig, errors: &mut Vec<ValidationError>) {
        for (index, pattern) in config.validation.spam_patterns.iter().enumerate() {
            if let Err(e) = regex::Regex::new(pattern) {
                errors.push(ValidationError::new(
                    format!("validation.spam_patterns[{}]", index),
                    format!("Invalid regular expression: {}", e),
                ));
            }
        }
    }

    fn validate_question(config: &TriageConfig, errors: &mut Vec<ValidationError>) {
        if config.question.fallback_checklist.trim().is_empty() {
            errors.push(ValidationError::new(
                "question.fallback_checklist",
                "Fallback checklist must not be empty",
            ));
        }
        for (index, keyword) in config.question.signal_keywords.iter().enumerate() {
            if keyword.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("question.signal_keywords[{}]", index),
                    "Signal keyword must not be empty",
                ));
            }
        }
    }

    fn validate_grounding(config: &TriageConfig, errors: &mut Vec<ValidationError>) {
        if config.grounding.min_token_len == 0 {
            errors.push(ValidationError::new(
                "grounding.min_token_len",
                "Minimum token length must be greater than 0",
            ));
        }
    }
}
