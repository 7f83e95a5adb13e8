//! git::traits
//!
//! The backend capability a session drives.
//!
//! # Design
//!
//! Two traits split the capability along its lifetime:
//!
//! - [`Backend`] produces handles: open an existing repository, clone one,
//!   or initialize one.
//! - [`Repository`] is one open handle. Every method is a thin primitive;
//!   deciding *what* to call is the session's job.
//!
//! The session is generic over `Backend`, so the real `git2` implementation
//! ([`super::GitBackend`]) and the in-memory [`super::mock::MockBackend`]
//! are interchangeable.
//!
//! All methods take `&self`. Handles wrap libgit2 objects that carry their
//! own interior state, and the mock keeps its recording behind a mutex.

use std::path::Path;

use super::GitError;
use crate::core::types::{Oid, RawStatus, Remote};

/// Options for a branch checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutOptions {
    /// Create the branch while checking it out (`-b`).
    pub new_branch: bool,
    /// Commit-ish the new branch starts from; HEAD when `None`.
    pub start_point: Option<String>,
    /// Discard local modifications that would block the switch.
    pub force: bool,
}

impl CheckoutOptions {
    /// True when no option is set, i.e. pure DWIM checkout.
    pub fn is_empty(&self) -> bool {
        *self == CheckoutOptions::default()
    }
}

/// Options for branch creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchOptions {
    /// Commit-ish the branch starts from; HEAD when `None`.
    pub start_point: Option<String>,
    /// Remote-qualified branch to set as upstream. Also the start point when
    /// `start_point` is unset.
    pub track: Option<String>,
}

/// Options for cloning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneOptions {
    /// Branch to check out instead of the remote's HEAD.
    pub branch: Option<String>,
    /// Populate `.git` only, leave the working tree empty (`-n`).
    pub no_checkout: bool,
    /// Create a bare repository.
    pub bare: bool,
}

/// Options for repository initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOptions {
    /// Create a bare repository.
    pub bare: bool,
    /// Name of the unborn initial branch; backend default when `None`.
    pub initial_branch: Option<String>,
}

/// Which branch namespace to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchScope {
    /// `refs/heads/*`, listed as `name`
    Local,
    /// `refs/remotes/*`, listed as `remote/name`
    Remote,
}

/// Factory for repository handles.
pub trait Backend {
    /// The handle type this backend produces.
    type Repo: Repository;

    /// Open an existing repository rooted at `path`.
    fn open(&self, path: &Path) -> Result<Self::Repo, GitError>;

    /// Clone `url` into `dest`. The parent of `dest` must already exist.
    fn clone_repo(&self, url: &str, dest: &Path, opts: &CloneOptions)
        -> Result<Self::Repo, GitError>;

    /// Create a new repository at `path`.
    fn init(&self, path: &Path, opts: &InitOptions) -> Result<Self::Repo, GitError>;
}

/// Operations on one open repository.
pub trait Repository {
    /// Root of the working tree (the git dir for a bare repository).
    fn work_dir(&self) -> &Path;

    /// Branch names in enumeration order.
    fn list_branches(&self, scope: BranchScope) -> Result<Vec<String>, GitError>;

    /// Name of the checked-out branch. `None` when detached; the unborn
    /// branch name on an empty repository.
    fn current_branch(&self) -> Result<Option<String>, GitError>;

    fn create_branch(&self, name: &str, opts: &BranchOptions) -> Result<(), GitError>;

    fn delete_branch(&self, name: &str) -> Result<(), GitError>;

    /// Switch to `name`. Without `new_branch`, a name matching only a remote
    /// branch creates a local tracking branch from the first such remote.
    fn checkout(&self, name: &str, opts: &CheckoutOptions) -> Result<(), GitError>;

    /// Restore `paths` in the working tree from the index.
    fn checkout_paths(&self, paths: &[String]) -> Result<(), GitError>;

    /// Stage `path` (relative to the work dir).
    fn add(&self, path: &str) -> Result<(), GitError>;

    /// Remove `path` from the index and the working tree.
    fn remove(&self, path: &str) -> Result<(), GitError>;

    /// Commit the index on the current branch.
    fn commit(&self, message: &str) -> Result<Oid, GitError>;

    /// Mixed reset of the current branch and index to `target`.
    fn reset(&self, target: &str) -> Result<(), GitError>;

    fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError>;

    /// Configured remotes in enumeration order.
    fn remotes(&self) -> Result<Vec<Remote>, GitError>;

    /// Fetch every configured remote.
    fn fetch(&self) -> Result<(), GitError>;

    /// Fetch `remote` and fast-forward the current branch onto
    /// `remote/branch`.
    fn pull(&self, remote: &str, branch: &str) -> Result<(), GitError>;

    /// Push local `branch` to the same-named branch on `remote`.
    fn push(&self, remote: &str, branch: &str) -> Result<(), GitError>;

    /// Commits reachable from `refname`, newest first. `RefNotFound` when the
    /// ref does not resolve.
    fn log(&self, refname: &str) -> Result<Vec<Oid>, GitError>;

    /// Commits reachable from HEAD whose tree contains `path`, newest first.
    fn log_path(&self, path: &str) -> Result<Vec<Oid>, GitError>;

    /// Per-file raw state of the working tree and index.
    fn status(&self) -> Result<Vec<(String, RawStatus)>, GitError>;

    /// Unified diff text between two commit-ish values.
    fn diff(&self, from: &str, to: &str) -> Result<String, GitError>;

    /// Paths in the index.
    fn tracked_files(&self) -> Result<Vec<String>, GitError>;
}
