//! Command-line definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use prlint_core::DEFAULT_CONFIG_PATH;
use prlint_runtime::sources::DEFAULT_API_URL;
use prlint_runtime::CommitFetchPolicy;

/// Check that a pull request references an approved project key.
#[derive(Debug, Parser)]
#[command(name = "pr-lint", version, about)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lint the pull request from the CI event payload
    Run(RunArgs),

    /// Evaluate pull-request text offline
    Eval(EvalArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to the pull_request event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: PathBuf,

    /// Configuration file path inside the repository
    #[arg(long, env = "INPUT_CONFIG_PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: String,

    /// Message reported instead of the default on failure
    #[arg(long, env = "INPUT_CUSTOM_ERROR_MESSAGE")]
    pub custom_error_message: Option<String>,

    /// API token; falls back to GITHUB_TOKEN when unset or empty
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Read the configuration from this directory instead of the API
    #[arg(long)]
    pub local_config_dir: Option<PathBuf>,

    /// What to do when the commit list cannot be fetched
    #[arg(long, value_enum, default_value_t = FetchPolicyArg::Propagate)]
    pub commit_fetch_policy: FetchPolicyArg,

    /// Per-request HTTP timeout (e.g. "30s", "1m")
    #[arg(long, value_parser = humantime::parse_duration, default_value = "30s")]
    pub http_timeout: Duration,

    /// Attempts per API call, including the first
    #[arg(long, default_value_t = 3)]
    pub max_attempts: u32,
}

#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Configuration file (YAML, or JSON with a .json extension); defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Pull-request title
    #[arg(long, default_value = "")]
    pub title: String,

    /// Head branch name
    #[arg(long, default_value = "")]
    pub branch: String,

    /// Pull-request description
    #[arg(long)]
    pub description: Option<String>,

    /// Commit message (repeatable)
    #[arg(long = "commit")]
    pub commits: Vec<String>,

    /// Message reported instead of the default on failure
    #[arg(long)]
    pub custom_error_message: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetchPolicyArg {
    Propagate,
    FailCheck,
}

impl From<FetchPolicyArg> for CommitFetchPolicy {
    fn from(value: FetchPolicyArg) -> Self {
        match value {
            FetchPolicyArg::Propagate => CommitFetchPolicy::Propagate,
            FetchPolicyArg::FailCheck => CommitFetchPolicy::FailCheck,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
