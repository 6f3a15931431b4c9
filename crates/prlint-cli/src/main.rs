//! `pr-lint`: checks that a pull request references an approved project key.
//!
//! Exit codes: 0 pass (or skipped event), 1 lint failure, 2 operational error.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use prlint_core::{evaluate, Configuration, EvaluationResult, PullRequestContext};
use prlint_runtime::sources::{GitHubClient, GitHubToken, LocalConfigSource};
use prlint_runtime::{
    report_run, ActionsSink, ConfigSource, LintRunner, PullRequestEvent, RetryConfig, RunOptions,
};

use cli::{Cli, Command, EvalArgs, OutputFormat, RunArgs};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Command::Run(args) => run(args).await,
        Command::Eval(args) => eval(args),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(args: RunArgs) -> Result<ExitCode> {
    let event = PullRequestEvent::from_file(&args.event_path).with_context(|| {
        format!(
            "Failed to load event payload from {}",
            args.event_path.display()
        )
    })?;

    let token = GitHubToken::from_value_or_env(args.github_token.clone())
        .context("A GitHub token is required to list commits")?;
    let github = Arc::new(
        GitHubClient::with_options(token, args.api_url.clone(), args.http_timeout)
            .context("Failed to build GitHub client")?,
    );

    let configs: Arc<dyn ConfigSource> = match &args.local_config_dir {
        Some(dir) => Arc::new(LocalConfigSource::new(dir)),
        None => github.clone(),
    };

    let retry = RetryConfig {
        max_attempts: args.max_attempts.max(1),
        ..RetryConfig::default()
    };
    let runner = LintRunner::new(configs, github)
        .with_retry(retry)
        .with_commit_fetch_policy(args.commit_fetch_policy.into());

    let config_path = if args.config_path.is_empty() {
        prlint_core::DEFAULT_CONFIG_PATH.to_string()
    } else {
        args.config_path.clone()
    };
    let options = RunOptions {
        config_path,
        custom_error_message: args.custom_error_message.clone(),
    };

    tracing::info!(
        repo = %event.repo(),
        pull_number = event.pull_number(),
        "Linting pull request"
    );
    let report = runner.run(&event, &options).await?;

    let mut sink = ActionsSink::new(io::stdout().lock());
    report_run(&mut sink, &report, options.custom_error_message.as_deref())
        .context("Failed to write verdict")?;

    Ok(exit_code(sink.exit_code()))
}

fn eval(args: EvalArgs) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => Configuration::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Configuration::default(),
    };

    let mut context = PullRequestContext::new(args.title, args.branch)
        .with_commit_messages(args.commits);
    context.description = args.description;

    let result = evaluate(&config, &context, args.custom_error_message.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &result)?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_text(&mut out, &result)?,
    }

    Ok(exit_code(if result.verdict.passed { 0 } else { 1 }))
}

fn write_text(out: &mut impl Write, result: &EvaluationResult) -> io::Result<()> {
    for outcome in result.outcomes.iter() {
        let status = match (outcome.enabled, outcome.passed) {
            (false, _) => "skip",
            (true, true) => "pass",
            (true, false) => "FAIL",
        };
        writeln!(out, "{:<12} {}", outcome.kind, status)?;
        for line in &outcome.diagnostics {
            writeln!(out, "  {}", line)?;
        }
    }

    match &result.verdict.message {
        None => writeln!(out, "Result ({}): passed", result.logic),
        Some(message) => writeln!(out, "Result ({}): {}", result.logic, message),
    }
}

fn exit_code(code: i32) -> ExitCode {
    if code == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_text_lists_every_check() {
        let config = Configuration::from_yaml("check_branch: true").unwrap();
        let context = PullRequestContext::new("[PROJ-1] Title", "main");
        let result = evaluate(&config, &context, None).unwrap();

        let mut out = Vec::new();
        write_text(&mut out, &result).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("title        pass"));
        assert!(text.contains("branch       FAIL"));
        assert!(text.contains("commits      skip"));
        assert!(text.contains("Result (and): PR Linting Failed"));
    }
}
