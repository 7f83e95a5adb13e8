//! cli
//!
//! Command-line interface layer for gitcover.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and open a [`Session`] over the working directory
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers translate arguments into session calls
//! and format the results; all git access goes through [`crate::session`].

pub mod args;
pub mod commands;

pub use args::Cli;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};

use crate::core::config::Config;
use crate::git::GitBackend;
use crate::session::Session;
use crate::ui::output::Verbosity;

/// Execution context derived from global flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// The directory commands run in.
    pub fn cwd(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().context("Failed to read current directory"),
        }
    }

    /// Configuration for `repo` (global only when `None`).
    pub fn config(&self, repo: Option<&Path>) -> Result<Config> {
        Config::load(repo).context("Failed to load configuration")
    }

    /// An empty session, configured for `repo`.
    pub fn session_for(&self, repo: Option<&Path>) -> Result<Session<GitBackend>> {
        let config = self.config(repo)?;
        let backend = GitBackend::with_author(config.author());
        Ok(Session::with_config(backend, config))
    }

    /// A session covering the working directory.
    pub fn covered_session(&self) -> Result<Session<GitBackend>> {
        let cwd = self.cwd()?;
        let mut session = self.session_for(Some(&cwd))?;
        session
            .cover(&cwd, &Default::default())
            .context("Failed to open repository")?;

        if !session.covers_anything() {
            bail!("Not a git repository: {}", cwd.display());
        }
        Ok(session)
    }
}

/// Run the CLI application.
///
/// Called from `main.rs` once logging is set up.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}
