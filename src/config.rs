//! Run configuration resolved once at startup.
//!
//! [`RunConfig`] replaces any process-wide settings: `main` builds it from the
//! parsed [`Cli`] and hands a reference to the fetcher, pipeline and writer.

use crate::cli::Cli;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Client identity sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Folder created under the user's desktop when no output directory is given.
pub const DEFAULT_DIR_NAME: &str = "HealthNewsLinks";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no output directory given and no home directory found (pass --output-dir)")]
    NoHomeDir,
}

/// What to do with pages whose root element declares no `lang` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguagePolicy {
    #[default]
    AcceptUndeclared,
    RejectUndeclared,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub output_dir: PathBuf,
    /// Per-source cap on candidate links processed.
    pub max_articles_per_source: usize,
    pub article_delay: Duration,
    pub source_delay: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub language_policy: LanguagePolicy,
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let output_dir = match &cli.output_dir {
            Some(dir) => dir.clone(),
            None => default_output_dir()?,
        };
        let language_policy = if cli.reject_undeclared_lang {
            LanguagePolicy::RejectUndeclared
        } else {
            LanguagePolicy::AcceptUndeclared
        };

        Ok(Self {
            output_dir,
            max_articles_per_source: cli.max_articles,
            article_delay: Duration::from_millis(cli.article_delay_ms),
            source_delay: Duration::from_millis(cli.source_delay_ms),
            request_timeout: Duration::from_secs(cli.timeout_secs),
            user_agent: USER_AGENT.to_string(),
            language_policy,
        })
    }

    /// Path of the append-only run log inside the output directory.
    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(crate::logging::LOG_FILE_NAME)
    }
}

/// `<home>/Desktop/HealthNewsLinks`, with home resolved by [`dirs::home_dir`].
pub fn default_output_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(desktop_dir(&home))
}

fn desktop_dir(home: &Path) -> PathBuf {
    home.join("Desktop").join(DEFAULT_DIR_NAME)
}
