//! git::interface
//!
//! Backend implementation using git2.
//!
//! This module is the **single doorway** to libgit2. No other module
//! imports `git2`; everything above talks to the [`Backend`] and
//! [`Repository`] traits.
//!
//! # Error Handling
//!
//! libgit2 errors are normalized once, here, into [`GitError`] by error
//! code. Above this layer errors travel unchanged.
//!
//! # Transports
//!
//! libgit2 is built vendored without default features, so local paths,
//! `file://` and `git://` remotes work out of the box.
//!
//! # Example
//!
//! ```ignore
//! use gitcover::git::{Backend, GitBackend, Repository, BranchScope};
//! use std::path::Path;
//!
//! let repo = GitBackend::new().open(Path::new("."))?;
//! for name in repo.list_branches(BranchScope::Local)? {
//!     println!("{name}");
//! }
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::traits::{
    Backend, BranchOptions, BranchScope, CheckoutOptions, CloneOptions, InitOptions, Repository,
};
use crate::core::config::AuthorConfig;
use crate::core::types::{
    BranchName, Oid, QualifiedBranch, RawStatus, Remote, StatusCode, TypeError,
};

/// Errors from backend and session operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Path does not hold a repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was opened
        path: PathBuf,
    },

    /// The session holds no repository handle.
    #[error("no repository is covered by this session")]
    NotCovered,

    /// Requested ref or revision does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Invalid ref or branch name.
    #[error("invalid ref name: {message}")]
    InvalidRefName {
        /// Description of the problem
        message: String,
    },

    /// No remote could be resolved for a branch.
    #[error("no remote to push or pull branch '{branch}'")]
    NoRemote {
        /// Branch the remote was resolved for
        branch: String,
    },

    /// Pull would need a merge commit.
    #[error("cannot fast-forward '{branch}'")]
    NotFastForward {
        /// Branch being pulled
        branch: String,
    },

    /// Permission, lock or authentication failure.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Filesystem error outside libgit2.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other libgit2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error, naming what was being resolved.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound | git2::ErrorCode::UnbornBranch => GitError::RefNotFound {
                refname: context.to_string(),
            },
            git2::ErrorCode::InvalidSpec => GitError::InvalidRefName {
                message: format!("{}: {}", context, err.message()),
            },
            git2::ErrorCode::Locked | git2::ErrorCode::Auth | git2::ErrorCode::Certificate => {
                GitError::AccessError {
                    message: format!("{}: {}", context, err.message()),
                }
            }
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }

    /// Whether this error is the "does not exist" class.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GitError::RefNotFound { .. } | GitError::ObjectNotFound { .. }
        )
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::RefNotFound {
                refname: err.message().to_string(),
            },
            git2::ErrorCode::Locked | git2::ErrorCode::Auth => GitError::AccessError {
                message: err.message().to_string(),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            TypeError::InvalidBranchName(msg) | TypeError::InvalidStatus(msg) => {
                GitError::InvalidRefName { message: msg }
            }
        }
    }
}

fn is_unborn(err: &git2::Error) -> bool {
    matches!(
        err.code(),
        git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound
    )
}

fn to_oid(oid: git2::Oid) -> Result<Oid, GitError> {
    Oid::new(oid.to_string()).map_err(GitError::from)
}

/// Translate libgit2 status flags into porcelain-style columns.
fn raw_status(status: git2::Status) -> RawStatus {
    if status.is_conflicted() {
        return RawStatus::new(StatusCode::Conflicted, StatusCode::Conflicted);
    }
    if status.is_wt_new() && !status.is_index_new() {
        return RawStatus::new(StatusCode::Untracked, StatusCode::Untracked);
    }

    let index = if status.is_index_new() {
        StatusCode::Added
    } else if status.is_index_deleted() {
        StatusCode::Deleted
    } else if status.is_index_renamed() {
        StatusCode::Renamed
    } else if status.is_index_typechange() {
        StatusCode::TypeChanged
    } else if status.is_index_modified() {
        StatusCode::Modified
    } else {
        StatusCode::Unmodified
    };

    let worktree = if status.is_wt_deleted() {
        StatusCode::Deleted
    } else if status.is_wt_renamed() {
        StatusCode::Renamed
    } else if status.is_wt_typechange() {
        StatusCode::TypeChanged
    } else if status.is_wt_modified() {
        StatusCode::Modified
    } else {
        StatusCode::Unmodified
    };

    RawStatus::new(index, worktree)
}

/// An open repository.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
    work_dir: PathBuf,
    author: Option<AuthorConfig>,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    fn wrap(repo: git2::Repository, author: Option<AuthorConfig>) -> Self {
        let work_dir = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Self {
            repo,
            work_dir,
            author,
        }
    }

    fn signature(&self) -> Result<git2::Signature<'static>, GitError> {
        let sig = match &self.author {
            Some(author) => git2::Signature::now(&author.name, &author.email)?,
            None => self.repo.signature()?,
        };
        Ok(sig)
    }

    fn resolve_commit(&self, spec: &str) -> Result<git2::Commit<'_>, GitError> {
        self.repo
            .revparse_single(spec)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|e| GitError::from_git2(e, spec))
    }

    fn head_commit(&self) -> Result<Option<git2::Commit<'_>>, GitError> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if is_unborn(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// First remote-tracking branch whose suffix is `name`.
    fn tracking_candidate(&self, name: &str) -> Result<Option<String>, GitError> {
        Ok(self
            .list_branches(BranchScope::Remote)?
            .into_iter()
            .find(|qualified| {
                QualifiedBranch::parse(qualified)
                    .is_some_and(|q| q.branch() == name && !q.is_head_marker())
            }))
    }

    fn switch_to(&self, name: &str, force: bool) -> Result<(), GitError> {
        let refname = format!("refs/heads/{name}");
        let target = self.resolve_commit(&refname)?;

        let mut builder = git2::build::CheckoutBuilder::new();
        if force {
            builder.force();
        } else {
            builder.safe();
        }

        self.repo
            .checkout_tree(target.as_object(), Some(&mut builder))
            .map_err(|e| GitError::from_git2(e, name))?;
        self.repo
            .set_head(&refname)
            .map_err(|e| GitError::from_git2(e, &refname))?;
        Ok(())
    }
}

impl Repository for Git {
    fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn list_branches(&self, scope: BranchScope) -> Result<Vec<String>, GitError> {
        let kind = match scope {
            BranchScope::Local => git2::BranchType::Local,
            BranchScope::Remote => git2::BranchType::Remote,
        };

        let mut names = Vec::new();
        for entry in self.repo.branches(Some(kind))? {
            let (branch, _) = entry?;
            // non-UTF8 names cannot be matched by callers anyway
            if let Ok(Some(name)) = branch.name() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn current_branch(&self) -> Result<Option<String>, GitError> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(String::from)),
            Ok(_) => Ok(None),
            Err(e) if is_unborn(&e) => {
                let head = self.repo.find_reference("HEAD")?;
                Ok(head
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(String::from))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn create_branch(&self, name: &str, opts: &BranchOptions) -> Result<(), GitError> {
        let name = BranchName::new(name)?;
        let start = opts
            .start_point
            .as_deref()
            .or(opts.track.as_deref())
            .unwrap_or("HEAD");
        let commit = self.resolve_commit(start)?;

        let mut branch = self
            .repo
            .branch(name.as_str(), &commit, false)
            .map_err(|e| GitError::from_git2(e, name.as_str()))?;

        if let Some(upstream) = &opts.track {
            branch
                .set_upstream(Some(upstream.as_str()))
                .map_err(|e| GitError::from_git2(e, upstream))?;
        }
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<(), GitError> {
        let mut branch = self
            .repo
            .find_branch(name, git2::BranchType::Local)
            .map_err(|e| GitError::from_git2(e, name))?;
        branch.delete().map_err(|e| GitError::from_git2(e, name))
    }

    fn checkout(&self, name: &str, opts: &CheckoutOptions) -> Result<(), GitError> {
        if opts.new_branch {
            let branch_opts = BranchOptions {
                start_point: opts.start_point.clone(),
                track: None,
            };
            self.create_branch(name, &branch_opts)?;
        } else if self.repo.find_branch(name, git2::BranchType::Local).is_err() {
            let upstream = self
                .tracking_candidate(name)?
                .ok_or_else(|| GitError::RefNotFound {
                    refname: name.to_string(),
                })?;
            let branch_opts = BranchOptions {
                start_point: None,
                track: Some(upstream),
            };
            self.create_branch(name, &branch_opts)?;
        }

        self.switch_to(name, opts.force)
    }

    fn checkout_paths(&self, paths: &[String]) -> Result<(), GitError> {
        let mut builder = git2::build::CheckoutBuilder::new();
        builder.force();
        for path in paths {
            builder.path(path.as_str());
        }
        self.repo.checkout_index(None, Some(&mut builder))?;
        Ok(())
    }

    fn add(&self, path: &str) -> Result<(), GitError> {
        let mut index = self.repo.index()?;
        index
            .add_path(Path::new(path))
            .map_err(|e| GitError::from_git2(e, path))?;
        index.write()?;
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<(), GitError> {
        let mut index = self.repo.index()?;
        index
            .remove_path(Path::new(path))
            .map_err(|e| GitError::from_git2(e, path))?;
        index.write()?;

        let full = self.work_dir.join(path);
        if full.exists() {
            std::fs::remove_file(full)?;
        }
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<Oid, GitError> {
        let sig = self.signature()?;
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = self.head_commit()?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
        to_oid(oid)
    }

    fn reset(&self, target: &str) -> Result<(), GitError> {
        let object = self
            .repo
            .revparse_single(target)
            .map_err(|e| GitError::from_git2(e, target))?;
        self.repo.reset(&object, git2::ResetType::Mixed, None)?;
        Ok(())
    }

    fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        self.repo
            .remote(name, url)
            .map_err(|e| GitError::from_git2(e, name))?;
        Ok(())
    }

    fn remotes(&self) -> Result<Vec<Remote>, GitError> {
        let names = self.repo.remotes()?;
        let mut remotes = Vec::new();
        for name in names.iter().flatten() {
            let remote = self.repo.find_remote(name)?;
            remotes.push(Remote::new(name, remote.url().unwrap_or_default()));
        }
        Ok(remotes)
    }

    fn fetch(&self) -> Result<(), GitError> {
        for remote in self.remotes()? {
            let mut handle = self.repo.find_remote(&remote.name)?;
            // empty refspec list means "the configured ones"
            handle
                .fetch(&[] as &[&str], None, None)
                .map_err(|e| GitError::from_git2(e, &remote.url))?;
        }
        Ok(())
    }

    fn pull(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        let mut handle = self
            .repo
            .find_remote(remote)
            .map_err(|e| GitError::from_git2(e, remote))?;
        handle.fetch(&[] as &[&str], None, None)?;

        let upstream_ref = format!("refs/remotes/{remote}/{branch}");
        let upstream = self
            .repo
            .find_reference(&upstream_ref)
            .map_err(|e| GitError::from_git2(e, &upstream_ref))?;
        let incoming = self.repo.reference_to_annotated_commit(&upstream)?;
        let (analysis, _) = self.repo.merge_analysis(&[&incoming])?;

        if analysis.is_up_to_date() {
            return Ok(());
        }
        if !(analysis.is_fast_forward() || analysis.is_unborn()) {
            return Err(GitError::NotFastForward {
                branch: branch.to_string(),
            });
        }

        // Safe checkout keeps unrelated local edits and refuses to clobber
        // conflicting ones, before any ref moves.
        let target = self.repo.find_object(incoming.id(), None)?;
        let mut builder = git2::build::CheckoutBuilder::new();
        builder.safe();
        self.repo
            .checkout_tree(&target, Some(&mut builder))
            .map_err(|e| GitError::from_git2(e, branch))?;

        let local_ref = format!("refs/heads/{branch}");
        let reflog = format!("pull: fast-forward to {remote}/{branch}");
        match self.repo.find_reference(&local_ref) {
            Ok(mut reference) => {
                reference.set_target(incoming.id(), &reflog)?;
            }
            Err(_) => {
                self.repo.reference(&local_ref, incoming.id(), true, &reflog)?;
            }
        }
        self.repo.set_head(&local_ref)?;
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        let mut handle = self
            .repo
            .find_remote(remote)
            .map_err(|e| GitError::from_git2(e, remote))?;

        let rejection: RefCell<Option<String>> = RefCell::new(None);
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.push_update_reference(|refname, status| {
            if let Some(reason) = status {
                *rejection.borrow_mut() = Some(format!("push of {refname} rejected: {reason}"));
            }
            Ok(())
        });
        let mut opts = git2::PushOptions::new();
        opts.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        handle
            .push(&[refspec.as_str()], Some(&mut opts))
            .map_err(|e| GitError::from_git2(e, &refspec))?;

        if let Some(message) = rejection.borrow_mut().take() {
            return Err(GitError::Internal { message });
        }
        Ok(())
    }

    fn log(&self, refname: &str) -> Result<Vec<Oid>, GitError> {
        let tip = self.resolve_commit(refname)?;

        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        walk.push(tip.id())?;

        walk.map(|oid| to_oid(oid?)).collect()
    }

    fn log_path(&self, path: &str) -> Result<Vec<Oid>, GitError> {
        let Some(head) = self.head_commit()? else {
            return Ok(Vec::new());
        };

        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        walk.push(head.id())?;

        let mut known = Vec::new();
        for oid in walk {
            let commit = self.repo.find_commit(oid?)?;
            if commit.tree()?.get_path(Path::new(path)).is_ok() {
                known.push(to_oid(commit.id())?);
            }
        }
        Ok(known)
    }

    fn status(&self) -> Result<Vec<(String, RawStatus)>, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut entries = Vec::new();
        for entry in statuses.iter() {
            if let Some(path) = entry.path() {
                entries.push((path.to_string(), raw_status(entry.status())));
            }
        }
        Ok(entries)
    }

    fn diff(&self, from: &str, to: &str) -> Result<String, GitError> {
        let old_tree = self.resolve_commit(from)?.tree()?;
        let new_tree = self.resolve_commit(to)?.tree()?;
        let diff = self
            .repo
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)?;

        let mut text = String::new();
        diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
            if matches!(line.origin(), '+' | '-' | ' ') {
                text.push(line.origin());
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;
        Ok(text)
    }

    fn tracked_files(&self) -> Result<Vec<String>, GitError> {
        let index = self.repo.index()?;
        Ok(index
            .iter()
            .filter_map(|entry| String::from_utf8(entry.path).ok())
            .collect())
    }
}

/// Produces [`Git`] handles.
#[derive(Debug, Clone, Default)]
pub struct GitBackend {
    author: Option<AuthorConfig>,
}

impl GitBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit as `author` instead of the identity in git config.
    pub fn with_author(author: Option<AuthorConfig>) -> Self {
        Self { author }
    }
}

impl Backend for GitBackend {
    type Repo = Git;

    fn open(&self, path: &Path) -> Result<Git, GitError> {
        let repo = git2::Repository::open(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        Ok(Git::wrap(repo, self.author.clone()))
    }

    fn clone_repo(&self, url: &str, dest: &Path, opts: &CloneOptions) -> Result<Git, GitError> {
        let mut builder = git2::build::RepoBuilder::new();
        builder.bare(opts.bare);
        if let Some(branch) = &opts.branch {
            builder.branch(branch);
        }
        if opts.no_checkout {
            let mut checkout = git2::build::CheckoutBuilder::new();
            checkout.dry_run();
            builder.with_checkout(checkout);
        }

        let repo = builder
            .clone(url, dest)
            .map_err(|e| GitError::from_git2(e, url))?;
        Ok(Git::wrap(repo, self.author.clone()))
    }

    fn init(&self, path: &Path, opts: &InitOptions) -> Result<Git, GitError> {
        let mut init_opts = git2::RepositoryInitOptions::new();
        init_opts.bare(opts.bare).mkpath(true);
        if let Some(branch) = &opts.initial_branch {
            init_opts.initial_head(branch);
        }

        let repo = git2::Repository::init_opts(path, &init_opts)
            .map_err(|e| GitError::from_git2(e, &path.display().to_string()))?;
        Ok(Git::wrap(repo, self.author.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backend() -> GitBackend {
        GitBackend::with_author(Some(AuthorConfig {
            name: "Test User".into(),
            email: "test@example.com".into(),
        }))
    }

    fn init_with_commit(dir: &Path) -> Git {
        let opts = InitOptions {
            initial_branch: Some("master".into()),
            ..Default::default()
        };
        let git = backend().init(dir, &opts).unwrap();
        std::fs::write(dir.join("README.md"), "readme\n").unwrap();
        git.add("README.md").unwrap();
        git.commit("initial").unwrap();
        git
    }

    mod git_error {
        use super::*;

        #[test]
        fn not_found_codes_map_to_ref_not_found() {
            let err = git2::Error::new(
                git2::ErrorCode::NotFound,
                git2::ErrorClass::Reference,
                "missing",
            );
            let mapped = GitError::from_git2(err, "refs/heads/ghost");
            assert!(matches!(mapped, GitError::RefNotFound { ref refname } if refname == "refs/heads/ghost"));
            assert!(mapped.is_not_found());
        }

        #[test]
        fn auth_maps_to_access_error() {
            let err = git2::Error::new(git2::ErrorCode::Auth, git2::ErrorClass::Net, "denied");
            assert!(matches!(
                GitError::from_git2(err, "origin"),
                GitError::AccessError { .. }
            ));
        }

        #[test]
        fn type_errors_convert() {
            let err: GitError = TypeError::InvalidBranchName("x".into()).into();
            assert!(matches!(err, GitError::InvalidRefName { .. }));
        }

        #[test]
        fn display_formatting() {
            let err = GitError::NoRemote {
                branch: "feature".into(),
            };
            assert!(err.to_string().contains("feature"));
        }
    }

    mod raw_status_mapping {
        use super::*;

        #[test]
        fn untracked_is_double_question() {
            let raw = raw_status(git2::Status::WT_NEW);
            assert_eq!(raw, RawStatus::from_porcelain("??").unwrap());
        }

        #[test]
        fn staged_new_with_edits() {
            let raw = raw_status(git2::Status::INDEX_NEW | git2::Status::WT_MODIFIED);
            assert_eq!(raw, RawStatus::from_porcelain("AM").unwrap());
        }

        #[test]
        fn worktree_delete() {
            let raw = raw_status(git2::Status::WT_DELETED);
            assert_eq!(raw, RawStatus::from_porcelain(" D").unwrap());
        }

        #[test]
        fn conflicts() {
            let raw = raw_status(git2::Status::CONFLICTED);
            assert_eq!(raw, RawStatus::from_porcelain("UU").unwrap());
        }
    }

    mod repository {
        use super::*;

        #[test]
        fn open_non_repository_fails() {
            let dir = TempDir::new().unwrap();
            assert!(matches!(
                GitBackend::new().open(dir.path()),
                Err(GitError::NotARepo { .. })
            ));
        }

        #[test]
        fn unborn_repository_reports_initial_branch() {
            let dir = TempDir::new().unwrap();
            let opts = InitOptions {
                initial_branch: Some("master".into()),
                ..Default::default()
            };
            let git = backend().init(dir.path(), &opts).unwrap();
            assert_eq!(git.current_branch().unwrap().as_deref(), Some("master"));
            assert!(git.list_branches(BranchScope::Local).unwrap().is_empty());
            assert!(git.log_path("README.md").unwrap().is_empty());
        }

        #[test]
        fn commit_log_and_branches() {
            let dir = TempDir::new().unwrap();
            let git = init_with_commit(dir.path());

            std::fs::write(dir.path().join("b.txt"), "b\n").unwrap();
            git.add("b.txt").unwrap();
            let second = git.commit("second").unwrap();

            let log = git.log("master").unwrap();
            assert_eq!(log.len(), 2);
            assert_eq!(log[0], second);
            assert_eq!(
                git.list_branches(BranchScope::Local).unwrap(),
                vec!["master".to_string()]
            );
            assert!(git.log_path("b.txt").unwrap().len() == 1);
        }

        #[test]
        fn new_branch_checkout_and_delete() {
            let dir = TempDir::new().unwrap();
            let git = init_with_commit(dir.path());

            let opts = CheckoutOptions {
                new_branch: true,
                ..Default::default()
            };
            git.checkout("feature", &opts).unwrap();
            assert_eq!(git.current_branch().unwrap().as_deref(), Some("feature"));

            git.checkout("master", &CheckoutOptions::default()).unwrap();
            git.delete_branch("feature").unwrap();
            assert!(!git
                .list_branches(BranchScope::Local)
                .unwrap()
                .contains(&"feature".to_string()));
        }

        #[test]
        fn checkout_unknown_branch_is_ref_not_found() {
            let dir = TempDir::new().unwrap();
            let git = init_with_commit(dir.path());
            let err = git.checkout("ghost", &CheckoutOptions::default()).unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn status_and_path_restore() {
            let dir = TempDir::new().unwrap();
            let git = init_with_commit(dir.path());

            std::fs::write(dir.path().join("README.md"), "edited\n").unwrap();
            std::fs::write(dir.path().join("notes.txt"), "n\n").unwrap();

            let mut status = git.status().unwrap();
            status.sort_by(|a, b| a.0.cmp(&b.0));
            assert_eq!(
                status,
                vec![
                    ("README.md".to_string(), RawStatus::from_porcelain(" M").unwrap()),
                    ("notes.txt".to_string(), RawStatus::from_porcelain("??").unwrap()),
                ]
            );

            git.checkout_paths(&["README.md".to_string()]).unwrap();
            let restored = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
            assert_eq!(restored, "readme\n");
        }

        #[test]
        fn diff_between_commits() {
            let dir = TempDir::new().unwrap();
            let git = init_with_commit(dir.path());
            let first = git.log("HEAD").unwrap()[0].clone();

            std::fs::write(dir.path().join("README.md"), "changed\n").unwrap();
            git.add("README.md").unwrap();
            let second = git.commit("change").unwrap();

            let text = git.diff(first.as_str(), second.as_str()).unwrap();
            assert!(text.contains("-readme"));
            assert!(text.contains("+changed"));
        }

        #[test]
        fn remotes_are_listed() {
            let dir = TempDir::new().unwrap();
            let git = init_with_commit(dir.path());
            git.add_remote("origin", "/tmp/elsewhere").unwrap();
            assert_eq!(
                git.remotes().unwrap(),
                vec![Remote::new("origin", "/tmp/elsewhere")]
            );
        }

        #[test]
        fn tracked_files_lists_index() {
            let dir = TempDir::new().unwrap();
            let git = init_with_commit(dir.path());
            assert_eq!(git.tracked_files().unwrap(), vec!["README.md".to_string()]);
        }
    }
}
