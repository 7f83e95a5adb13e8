//! session::sync
//!
//! Operations that talk to remotes: pushing a branch, publishing one file,
//! mirroring remote branches locally, and checking for upstream updates.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, instrument, warn};

use super::Session;
use crate::core::types::{Oid, QualifiedBranch};
use crate::git::{Backend, BranchOptions, CheckoutOptions, GitError, Repository};

/// How [`Session::push_file`] records the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verb {
    #[default]
    Add,
    Remove,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verb::Add => "add",
            Verb::Remove => "remove",
        })
    }
}

/// Options for [`Session::push_file`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushFileOptions {
    /// Target branch; the current branch when `None`.
    pub branch: Option<String>,
    /// Target remote; resolved from the branch when `None`.
    pub remote: Option<String>,
    pub verb: Verb,
}

impl<B: Backend> Session<B> {
    fn require_current(&self) -> Result<String, GitError> {
        self.current_branch()?.ok_or_else(|| GitError::RefNotFound {
            refname: "HEAD".to_string(),
        })
    }

    /// Push `branch` (current by default) to the remote it belongs to.
    pub fn push_branch(&self, branch: Option<&str>) -> Result<(), GitError> {
        let branch = match branch {
            Some(b) => b.to_string(),
            None => self.require_current()?,
        };
        let remote = self
            .remote_for(&branch)?
            .ok_or_else(|| GitError::NoRemote {
                branch: branch.clone(),
            })?;
        self.push(&remote, &branch)
    }

    /// Check out the target branch, stage or remove `path`, commit and push.
    ///
    /// The commit message is `"<verb> <path> (brought to you by <signature>)"`.
    #[instrument(skip(self, opts), fields(verb = %opts.verb))]
    pub fn push_file(&self, path: &str, opts: &PushFileOptions) -> Result<Oid, GitError> {
        let branch = match &opts.branch {
            Some(b) => b.clone(),
            None => self.require_current()?,
        };
        let remote = match &opts.remote {
            Some(r) => r.clone(),
            None => self
                .remote_for(&branch)?
                .ok_or_else(|| GitError::NoRemote {
                    branch: branch.clone(),
                })?,
        };

        self.checkout(&branch, &CheckoutOptions::default())?;

        match opts.verb {
            Verb::Add => self.add(path)?,
            Verb::Remove => self.remove(path)?,
        }
        let message = format!(
            "{} {} (brought to you by {})",
            opts.verb,
            path,
            self.config.message_signature()
        );
        let oid = self.commit(&message)?;

        self.push(&remote, &branch)?;
        debug!(%oid, %remote, %branch, "published");
        Ok(oid)
    }

    /// Fetch, fast-forward the current branch, then rebuild every other
    /// remote branch as a fresh local tracking branch.
    ///
    /// Local-only commits on the rebuilt branches are discarded. Returns the
    /// names of the rebuilt branches.
    #[instrument(skip(self))]
    pub fn pull_all_branches(&self) -> Result<Vec<String>, GitError> {
        self.fetch()?;

        let current = self.current_branch()?;
        if let Some(current) = &current {
            let counterpart = self
                .remote_branch_for(current)?
                .and_then(|q| QualifiedBranch::parse(&q));
            if let Some(upstream) = counterpart {
                self.pull(upstream.remote(), upstream.branch())?;
            }
        }

        let layer = self.layer()?;
        let mut local = self.local_branches()?;
        let mut seen = HashSet::new();
        let mut rebuilt = Vec::new();

        for qualified in self.other_remote_branches()? {
            let Some(parsed) = QualifiedBranch::parse(&qualified) else {
                continue;
            };
            let name = parsed.branch().to_string();
            if current.as_deref() == Some(name.as_str()) || !seen.insert(name.clone()) {
                continue;
            }

            if local.contains(&name) {
                warn!(branch = %name, upstream = %qualified, "replacing local branch");
                layer.delete_branch(&name)?;
                local.retain(|b| b != &name);
            }
            layer.create_branch(
                &name,
                &BranchOptions {
                    start_point: None,
                    track: Some(qualified.clone()),
                },
            )?;
            rebuilt.push(name);
        }

        Ok(rebuilt)
    }

    /// Fetch, then compare `branch` (current by default) with its remote
    /// counterpart. `None` unless the branch exists both locally and
    /// remotely.
    pub fn has_updates(&self, branch: Option<&str>) -> Result<Option<bool>, GitError> {
        self.fetch()?;

        let branch = match branch {
            Some(b) => b.to_string(),
            None => match self.current_branch()? {
                Some(b) => b,
                None => return Ok(None),
            },
        };

        if !(self.has_local_branch(&branch)? && self.has_remote_branch(&branch)?) {
            return Ok(None);
        }
        let Some(remote) = self.remote_branch_for(&branch)? else {
            return Ok(None);
        };

        Ok(Some(
            self.commits(Some(&branch))? != self.commits(Some(&remote))?,
        ))
    }

    /// Fetch, then reset the current branch to its remote counterpart.
    pub fn reset_to_remote_head(&self) -> Result<(), GitError> {
        self.fetch()?;
        let current = self.require_current()?;
        let target = self
            .remote_branch_for(&current)?
            .ok_or(GitError::NoRemote { branch: current })?;
        self.reset(Some(&target))
    }
}
