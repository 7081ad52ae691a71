use triago::analysis::AnalysisNormalizer;
use triago::cli::{Cli, Commands};
use triago::config::TriageConfig;
use triago::domain::{
    Issue, IssueAction, IssueAuthor, IssueDescription, IssueNumber, IssueSnapshot, IssueTitle,
};
use triago::error::{Result, TriagoError};
use triago::policies::ActionPlanBuilder;
use triago::triage::IssueEvent;
use triago::validation::{build_governance_plan, validate_issue, SpamPatternSet};

use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Plan { event, response } => {
            cmd_plan(cli.config, event, response)?;
        }
        Commands::CheckConfig => {
            cmd_check_config(cli.config)?;
        }
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("triago=info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(path: Option<PathBuf>) -> Result<TriageConfig> {
    match path {
        Some(path) => TriageConfig::load(&path),
        None => Ok(TriageConfig::default()),
    }
}

/// Replay a captured event and model response offline and print the decisions
/// the bot would have made. Never talks to a tracker or a model.
fn cmd_plan(config_path: Option<PathBuf>, event_path: PathBuf, response_path: PathBuf) -> Result<()> {
    let config = load_config(config_path)?;
    let spam_patterns = SpamPatternSet::compile(&config.validation.spam_patterns)?;

    let raw_event = read_file(&event_path)?;
    let event: IssueEvent = serde_json::from_str(&raw_event).map_err(|e| TriagoError::Json {
        source: e,
        context: format!("Failed to parse event file: {:?}", event_path),
    })?;

    let Some(action) = IssueAction::parse(&event.action) else {
        println!("{}", outcome_json("skipped", &format!("unsupported action '{}'", event.action))?);
        return Ok(());
    };
    let Some(number) = IssueNumber::new(event.number) else {
        println!("{}", outcome_json("skipped", "issue number must be positive")?);
        return Ok(());
    };

    let issue = Issue {
        number,
        title: IssueTitle::new(&event.title),
        description: IssueDescription::new(&event.body),
        author: IssueAuthor::new(&event.author),
        created_at: event.created_at,
    };
    let report = validate_issue(&issue, &spam_patterns);
    if !report.is_valid {
        let plan = build_governance_plan(&report, &event.labels, &config);
        println!("{}", to_pretty(&plan)?);
        return Ok(());
    }

    let raw_response = read_file(&response_path)?;
    let Some(analysis) = AnalysisNormalizer::normalize(&raw_response, number) else {
        println!("{}", outcome_json("skipped", "model response unusable")?);
        return Ok(());
    };

    let snapshot = IssueSnapshot {
        repo: event.repo.clone(),
        number,
        title: event.title.clone(),
        body: event.body.clone(),
        action,
        labels: event.labels.clone(),
        recent_issues: Vec::new(),
        repo_context: event.repo_context.clone(),
    };
    let plan = ActionPlanBuilder::new(&config).build(&snapshot, &analysis);
    println!("{}", to_pretty(&plan)?);
    Ok(())
}

fn cmd_check_config(config_path: Option<PathBuf>) -> Result<()> {
    match load_config(config_path) {
        Ok(config) => {
            println!(
                "Configuration OK (schema {}, bot login '{}')",
                config.meta.schema_version, config.bot.login
            );
            Ok(())
        }
        Err(TriagoError::ConfigValidation { errors }) => {
            eprintln!("Configuration invalid:");
            for error in &errors {
                eprintln!("  {}: {}", error.path, error.message);
            }
            Err(TriagoError::ConfigValidation { errors })
        }
        Err(e) => Err(e),
    }
}

fn read_file(path: &PathBuf) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| TriagoError::Io {
        source: e,
        context: format!("Failed to read file: {:?}", path),
    })
}

fn to_pretty<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| TriagoError::Json {
        source: e,
        context: "Failed to serialize output".to_string(),
    })
}

fn outcome_json(outcome: &str, reason: &str) -> Result<String> {
    to_pretty(&serde_json::json!({ "outcome": outcome, "reason": reason }))
}
