//! Runtime configuration for todo front ends.
//!
//! # Responsibility
//! - Resolve database path, storage key, log level and log directory.
//! - Apply precedence: explicit value, then environment, then default.
//!
//! # Invariants
//! - Blank values at any layer count as unset.
//! - The storage key is never empty.

use crate::logging::default_log_level;
use crate::store::todo_store::DEFAULT_STORAGE_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "TODO_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TODO_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TODO_LOG_DIR";
pub const ENV_STORAGE_KEY: &str = "TODO_STORAGE_KEY";
const DEFAULT_DB_FILE_NAME: &str = "todo_store.sqlite3";

/// Values supplied explicitly by the caller, typically CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub storage_key: Option<String>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub seed_samples: bool,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub seed_samples: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeLogDir(dir) => write!(
                f,
                "log directory must be an absolute path, got `{}`",
                dir.display()
            ),
        }
    }
}

impl Error for ConfigError {}

impl TodoConfig {
    /// Resolves configuration against the process environment.
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |name| std::env::var(name).ok())
    }

    /// Resolves configuration using `lookup` for environment values.
    ///
    /// # Errors
    /// - `ConfigError::RelativeLogDir` when the chosen log directory is relative.
    pub fn resolve(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let env = |name: &str| lookup(name).and_then(non_blank);

        let db_path = overrides
            .db_path
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| env(ENV_DB_PATH).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let storage_key = overrides
            .storage_key
            .and_then(non_blank)
            .or_else(|| env(ENV_STORAGE_KEY))
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        let log_level = overrides
            .log_level
            .and_then(non_blank)
            .or_else(|| env(ENV_LOG_LEVEL))
            .unwrap_or_else(|| default_log_level().to_string());

        let log_dir = overrides
            .log_dir
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| env(ENV_LOG_DIR).map(PathBuf::from));
        if let Some(dir) = log_dir.as_ref().filter(|dir| !dir.is_absolute()) {
            return Err(ConfigError::RelativeLogDir(dir.clone()));
        }

        Ok(Self {
            db_path,
            storage_key,
            log_level,
            log_dir,
            seed_samples: overrides.seed_samples,
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
