//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config file
//! 3. Repo config file
//!
//! # Global Config Locations
//!
//! Searched in order, first hit wins:
//! 1. `$GITCOVER_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitcover/config.toml`
//! 3. `~/.gitcover/config.toml`
//!
//! # Repo Config Location
//!
//! `<repo>/.git/gitcover/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use gitcover::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo"))).unwrap();
//! println!("remote: {}", config.remote_name());
//! println!("primary: {}", config.primary_branch());
//! ```

pub mod schema;

pub use schema::{AuthorConfig, FileConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default remote name registered by `init`.
pub const DEFAULT_REMOTE_NAME: &str = "origin";
/// Default branch used to locate the initial commit.
pub const DEFAULT_PRIMARY_BRANCH: &str = "master";
/// Default signature embedded in generated commit messages.
pub const DEFAULT_MESSAGE_SIGNATURE: &str = "gitcover";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: FileConfig,
    /// Repository configuration (if a repo path was given and had one)
    pub repo: Option<FileConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed or
    /// validated. Missing files are not an error.
    pub fn load(repo_path: Option<&Path>) -> Result<Config, ConfigError> {
        let (global, global_path) = match Self::global_candidates()
            .into_iter()
            .find(|p| p.exists())
        {
            Some(path) => (Self::read_file(&path)?, Some(path)),
            None => (FileConfig::default(), None),
        };

        let (repo, repo_path) = match repo_path.map(Self::repo_config_path) {
            Some(path) if path.exists() => (Some(Self::read_file(&path)?), Some(path)),
            _ => (None, None),
        };

        global.validate()?;
        if let Some(r) = &repo {
            r.validate()?;
        }

        tracing::debug!(
            global = ?global_path,
            repo = ?repo_path,
            "loaded configuration"
        );

        Ok(Config {
            global,
            repo,
            global_path,
            repo_path,
        })
    }

    /// Build a config from in-memory values, bypassing the filesystem.
    pub fn from_parts(global: FileConfig, repo: Option<FileConfig>) -> Config {
        Config {
            global,
            repo,
            global_path: None,
            repo_path: None,
        }
    }

    fn global_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(path) = std::env::var("GITCOVER_CONFIG") {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("gitcover/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".gitcover/config.toml"));
        }
        candidates
    }

    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Canonical repo config path for a working directory.
    pub fn repo_config_path(repo_path: &Path) -> PathBuf {
        repo_path.join(".git/gitcover/config.toml")
    }

    /// Path of the global file that was loaded, if any.
    pub fn global_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Path of the repo file that was loaded, if any.
    pub fn repo_path(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }

    fn effective(&self) -> FileConfig {
        match &self.repo {
            Some(repo) => self.global.merged_with(repo),
            None => self.global.clone(),
        }
    }

    // =========================================================================
    // Accessors with precedence applied
    // =========================================================================

    /// Remote name used by `init`. Defaults to `origin`.
    pub fn remote_name(&self) -> String {
        self.effective()
            .remote_name
            .unwrap_or_else(|| DEFAULT_REMOTE_NAME.to_string())
    }

    /// Branch holding the initial commit. Defaults to `master`.
    pub fn primary_branch(&self) -> String {
        self.effective()
            .primary_branch
            .unwrap_or_else(|| DEFAULT_PRIMARY_BRANCH.to_string())
    }

    /// Signature for generated commit messages. Defaults to `gitcover`.
    pub fn message_signature(&self) -> String {
        self.effective()
            .message_signature
            .unwrap_or_else(|| DEFAULT_MESSAGE_SIGNATURE.to_string())
    }

    /// Commit identity override, if configured.
    pub fn author(&self) -> Option<AuthorConfig> {
        self.effective().author
    }
}
