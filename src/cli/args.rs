//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::StatusCategory;

/// gitcover - DWIM branch handling and status over a git working tree
#[derive(Parser, Debug)]
#[command(name = "gitcover")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if gitcover was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show working tree status grouped by category
    #[command(
        long_about = "Show working tree status grouped by category.\n\n\
            Every modified, added, deleted or untracked path is listed under \
            exactly one category. Empty categories are only printed by --json.",
        after_help = "\
EXAMPLES:
    gitcover status
    gitcover status --category untracked
    gitcover status --json"
    )]
    Status {
        /// Only show one category (changed, added, deleted, untracked)
        #[arg(long, value_name = "CATEGORY")]
        category: Option<StatusCategory>,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// List local and remote branches
    Branches,

    /// Check out a branch, tracking or creating it as needed
    #[command(
        long_about = "Check out a branch, tracking or creating it as needed.\n\n\
            Checking out the current branch does nothing. A name that exists on a \
            remote is checked out as a tracking branch. An unknown name is \
            created from HEAD, or from the repository's initial commit with \
            --from-initial. A repository without commits refuses any checkout.",
        after_help = "\
EXAMPLES:
    # Track origin/feature locally
    gitcover checkout feature

    # Start an unrelated line of work at the first commit
    gitcover checkout scratch --from-initial"
    )]
    Checkout {
        /// Branch name
        name: String,

        /// Root a new branch at the initial commit instead of HEAD
        #[arg(long)]
        from_initial: bool,
    },

    /// Print the remote a branch belongs to
    RemoteFor {
        /// Branch name
        branch: String,
    },

    /// List commits of a branch, oldest first
    Log {
        /// Branch name (default: current)
        branch: Option<String>,
    },

    /// Fetch and report whether a branch differs from its remote counterpart
    Updates {
        /// Branch name (default: current)
        branch: Option<String>,
    },

    /// Add or remove one file, commit and push in one step
    #[command(
        name = "push-file",
        after_help = "\
EXAMPLES:
    gitcover push-file notes/today.md
    gitcover push-file old.txt --remove
    gitcover push-file draft.md --branch drafts --remote backup"
    )]
    PushFile {
        /// Path relative to the repository root
        path: String,

        /// Target branch (default: current)
        #[arg(long)]
        branch: Option<String>,

        /// Target remote (default: the branch's remote)
        #[arg(long)]
        remote: Option<String>,

        /// Remove the file instead of adding it
        #[arg(long)]
        remove: bool,
    },

    /// Fetch, fast-forward the current branch and mirror every remote branch
    #[command(
        name = "pull-all",
        long_about = "Fetch, fast-forward the current branch and mirror every remote branch.\n\n\
            Every other remote branch is recreated as a fresh local tracking \
            branch. Local-only commits on those branches are discarded."
    )]
    PullAll,

    /// Clone a repository
    Clone {
        /// Source url or path
        url: String,

        /// Destination; missing parent directories are created
        path: PathBuf,

        /// Reset to HEAD after cloning
        #[arg(long)]
        reset: bool,

        /// Do not populate the working tree
        #[arg(long)]
        no_checkout: bool,
    },

    /// Create a repository, optionally registering a remote
    Init {
        /// Directory to create the repository in
        path: PathBuf,

        /// Remote url to register
        #[arg(long, value_name = "URL")]
        remote: Option<String>,

        /// Name for the remote (default: configured remote name)
        #[arg(long, value_name = "NAME", requires = "remote")]
        remote_name: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_status_category() {
        let cli = Cli::try_parse_from(["gitcover", "status", "--category", "untracked"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Status {
                category: Some(StatusCategory::Untracked),
                json: false
            }
        ));
    }

    #[test]
    fn reject_unknown_category() {
        assert!(Cli::try_parse_from(["gitcover", "status", "--category", "dirty"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gitcover", "branches", "--cwd", "/tmp", "-q"]).unwrap();
        assert_eq!(cli.cwd.as_deref(), Some(std::path::Path::new("/tmp")));
        assert!(cli.quiet);
    }

    #[test]
    fn remote_name_requires_remote() {
        assert!(Cli::try_parse_from(["gitcover", "init", "x", "--remote-name", "up"]).is_err());
    }

    #[test]
    fn push_file_flags() {
        let cli = Cli::try_parse_from([
            "gitcover", "push-file", "a.txt", "--branch", "drafts", "--remove",
        ])
        .unwrap();
        match cli.command {
            Command::PushFile {
                path,
                branch,
                remote,
                remove,
            } => {
                assert_eq!(path, "a.txt");
                assert_eq!(branch.as_deref(), Some("drafts"));
                assert_eq!(remote, None);
                assert!(remove);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
