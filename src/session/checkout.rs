//! session::checkout
//!
//! The checkout engine: turns a branch name and options into exactly one
//! backend checkout call, a free no-op, or a fail-closed `false`.
//!
//! # Decision order
//!
//! First match wins:
//!
//! 1. No local branch and no remote branch of that name: fail closed. A
//!    freshly initialized repository has nothing to check out from.
//! 2. Name is the current branch: succeed without touching the backend.
//! 3. Name exists on a remote: drop every caller option and let the
//!    backend create the tracking branch.
//! 4. Name unknown everywhere: create it (`-b`) on top of the caller's
//!    options.
//! 5. Otherwise hand the caller's options through.
//!
//! The engine never caches: branch lists are read fresh on each call.

use tracing::{debug, instrument};

use super::{resolver, Session};
use crate::core::types::StatusCategory;
use crate::git::{Backend, BranchOptions, CheckoutOptions, GitError, Repository};

/// Outcome of the checkout decision procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutDecision {
    /// Nothing to check out from; report failure without a backend call.
    NoRepositoryContext,
    /// Already on the branch.
    SameBranch,
    /// Remote branch exists; backend DWIM with empty options.
    TrackRemote,
    /// Unknown name; create it while checking out.
    CreateLocal(CheckoutOptions),
    /// Existing local branch.
    Plain(CheckoutOptions),
}

impl CheckoutDecision {
    /// Options to hand the backend, or `None` when no call is made.
    pub fn options(&self) -> Option<CheckoutOptions> {
        match self {
            CheckoutDecision::NoRepositoryContext | CheckoutDecision::SameBranch => None,
            CheckoutDecision::TrackRemote => Some(CheckoutOptions::default()),
            CheckoutDecision::CreateLocal(opts) | CheckoutDecision::Plain(opts) => {
                Some(opts.clone())
            }
        }
    }
}

/// Decide how to check out `name` given the live branch lists.
pub fn decide(
    local: &[String],
    remote: &[String],
    current: Option<&str>,
    name: &str,
    opts: &CheckoutOptions,
) -> CheckoutDecision {
    let on_remote = resolver::has_remote_branch(remote, name);

    if local.is_empty() && !on_remote {
        return CheckoutDecision::NoRepositoryContext;
    }
    if current == Some(name) {
        return CheckoutDecision::SameBranch;
    }
    if on_remote {
        return CheckoutDecision::TrackRemote;
    }
    if !resolver::has_local_branch(local, name) {
        return CheckoutDecision::CreateLocal(CheckoutOptions {
            new_branch: true,
            ..opts.clone()
        });
    }
    CheckoutDecision::Plain(opts.clone())
}

/// Options for [`Session::create_branch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateBranchOptions {
    /// Start at and track the first remote branch of the same name.
    pub track_remote: bool,
    pub start_point: Option<String>,
}

impl<B: Backend> Session<B> {
    /// Check out `name`. `Ok(false)` when the repository has nothing to check
    /// out from; `Ok(true)` otherwise, including the no-op on the current
    /// branch.
    #[instrument(skip(self, opts))]
    pub fn checkout(&self, name: &str, opts: &CheckoutOptions) -> Result<bool, GitError> {
        let local = self.local_branches()?;
        let remote = self.remote_branches()?;
        let current = self.current_branch()?;

        let decision = decide(&local, &remote, current.as_deref(), name, opts);
        debug!(?decision, "checkout decision");

        match decision.options() {
            None => Ok(decision == CheckoutDecision::SameBranch),
            Some(opts) => {
                self.layer()?.checkout(name, &opts)?;
                Ok(true)
            }
        }
    }

    /// Check out `branch`, rooting it at the initial commit when it does
    /// not exist yet.
    pub fn checkout_from_initial_commit(
        &self,
        branch: &str,
        opts: &CheckoutOptions,
    ) -> Result<bool, GitError> {
        let mut opts = opts.clone();
        if !self.has_branch(branch)? {
            if let Some(initial) = self.initial_commit()? {
                debug!(%initial, "rooting new branch at initial commit");
                opts.start_point = Some(initial.to_string());
            }
        }
        self.checkout(branch, &opts)
    }

    /// Whether [`Session::checkout`] can do anything for `name`.
    pub fn can_checkout(&self, name: &str) -> Result<bool, GitError> {
        Ok(self.has_remote_branch(name)? || !self.local_branches()?.is_empty())
    }

    pub fn create_branch(&self, name: &str, opts: &CreateBranchOptions) -> Result<(), GitError> {
        let track = if opts.track_remote {
            self.remote_branch_for(name)?
        } else {
            None
        };

        self.layer()?.create_branch(
            name,
            &BranchOptions {
                start_point: opts.start_point.clone(),
                track,
            },
        )
    }

    /// Delete a local branch. Deleting the checked-out branch is ignored.
    pub fn delete_branch(&self, name: &str) -> Result<(), GitError> {
        if self.current_branch()?.as_deref() == Some(name) {
            debug!(name, "refusing to delete the current branch");
            return Ok(());
        }
        self.layer()?.delete_branch(name)
    }

    // =========================================================================
    // Path restore
    // =========================================================================

    /// Restore tracked `paths` from the index. Untracked paths are skipped;
    /// `Ok(false)` when nothing is left to restore.
    pub fn checkout_files(&self, paths: &[String]) -> Result<bool, GitError> {
        let tracked = self.files_paths()?;
        let paths: Vec<String> = paths
            .iter()
            .filter(|p| tracked.contains(p))
            .cloned()
            .collect();

        if paths.is_empty() {
            return Ok(false);
        }
        self.layer()?.checkout_paths(&paths)?;
        Ok(true)
    }

    pub fn checkout_deleted_files(&mut self) -> Result<bool, GitError> {
        let deleted = self.files_with_status(StatusCategory::Deleted)?;
        self.checkout_files(&deleted)
    }

    pub fn checkout_changed_files(&mut self) -> Result<bool, GitError> {
        let changed = self.files_with_status(StatusCategory::Changed)?;
        self.checkout_files(&changed)
    }
}
