//! Configuration loading.
//!
//! A missing, unreadable or malformed configuration file never fails a run:
//! the loader logs why and falls back to the built-in defaults.

use prlint_core::{ConfigOverride, Configuration};

use crate::resilience::{with_retry, RetryConfig};
use crate::sources::{ConfigSource, RepoRef};

/// Resolve the configuration for a run.
pub async fn load_configuration(
    source: &dyn ConfigSource,
    repo: &RepoRef,
    path: &str,
    git_ref: &str,
    retry: &RetryConfig,
) -> Configuration {
    let fetched = with_retry(retry, "fetch config", || {
        source.fetch_config(repo, path, git_ref)
    })
    .await;

    let contents = match fetched {
        Ok(Some(contents)) => contents,
        Ok(None) => {
            tracing::warn!(
                source = source.name(),
                repo = %repo,
                path,
                git_ref,
                "Config file not found, using defaults"
            );
            return Configuration::default();
        }
        Err(e) => {
            tracing::warn!(
                source = source.name(),
                repo = %repo,
                path,
                error = %e,
                "Could not fetch config file, using defaults"
            );
            return Configuration::default();
        }
    };

    match parse_override(path, &contents) {
        Ok(overrides) => {
            tracing::debug!(path, ?overrides, "Loaded config overrides");
            Configuration::default().merge(overrides)
        }
        Err(e) => {
            tracing::warn!(path, error = %e, "Could not parse config file, using defaults");
            Configuration::default()
        }
    }
}

fn parse_override(path: &str, contents: &str) -> Result<ConfigOverride, prlint_core::ConfigError> {
    if path.ends_with(".json") {
        ConfigOverride::from_json(contents)
    } else {
        ConfigOverride::from_yaml(contents)
    }
}
