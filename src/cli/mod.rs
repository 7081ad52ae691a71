//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "triago",
    version,
    about = "Issue triage bot core with AI analysis normalization and governance policies",
    long_about = "Triago normalizes raw model responses into a canonical analysis record and \
                  derives the governance actions (labels, comments) a triage bot would take. \
                  The CLI works entirely offline: it replays captured webhook events and model \
                  responses without touching any tracker or model API."
)]
pub struct Cli {
    /// Config file path (defaults to built-in production values)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive the action plan for a captured event and model response
    Plan {
        /// Issue event JSON file (repo, action, number, title, body, ...)
        #[arg(short, long, value_name = "FILE")]
        event: PathBuf,

        /// Raw model response text file
        #[arg(short, long, value_name = "FILE")]
        response: PathBuf,
    },

    /// Validate a configuration file
    CheckConfig,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
