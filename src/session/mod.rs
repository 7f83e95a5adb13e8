//! session
//!
//! One mutable handle over at most one open repository.
//!
//! # Lifecycle
//!
//! A [`Session`] starts empty. [`Session::cover`], [`Session::clone_repo`]
//! and [`Session::init`] replace the covered handle, and
//! [`Session::uncover`] releases it. Everything else either delegates to the
//! handle or routes through the branch resolver, the checkout engine and the
//! status classifier in the submodules.
//!
//! # Dressing
//!
//! Some follow-up actions can only run once a handle exists: resetting a
//! freshly covered repository, registering the remote of a freshly
//! initialized one. They are queued as [`Dressing`] before the open and
//! drained right after it, in enqueue order. The queue is empty whenever an
//! open operation returns, whether the actions ran, were discarded because
//! nothing got covered, or the open itself failed.
//!
//! # Example
//!
//! ```ignore
//! use gitcover::git::GitBackend;
//! use gitcover::session::{CoverOptions, Session};
//! use std::path::Path;
//!
//! let mut session = Session::new(GitBackend::new());
//! session.cover(Path::new("/path/to/repo"), &CoverOptions::default())?;
//! if session.covers_anything() {
//!     session.checkout("feature", &Default::default())?;
//! }
//! ```

pub mod checkout;
pub mod resolver;
pub mod status;
pub mod sync;
pub mod workdir;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::core::config::Config;
use crate::core::types::{Oid, Remote};
use crate::git::{Backend, BranchScope, CloneOptions, GitError, InitOptions, Repository};

pub use checkout::{CheckoutDecision, CreateBranchOptions};
pub use status::Classification;
pub use sync::{PushFileOptions, Verb};

/// Options for [`Session::cover`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverOptions {
    /// Reset to HEAD after opening when the repository has a commit.
    pub reset: bool,
}

/// What to clone, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    /// Url or path of the source repository.
    pub remote: String,
    /// Destination; missing parent directories are created.
    pub path: PathBuf,
    /// Reset to HEAD after cloning when the clone has a commit.
    pub reset: bool,
    pub options: CloneOptions,
}

impl CloneRequest {
    pub fn new(remote: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            remote: remote.into(),
            path: path.into(),
            reset: false,
            options: CloneOptions::default(),
        }
    }
}

/// Where to create a repository, and which remote to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    pub path: PathBuf,
    /// Url registered as a remote once the repository exists.
    pub remote: Option<String>,
    /// Name for `remote`; the configured remote name when `None`.
    pub remote_name: Option<String>,
    pub options: InitOptions,
}

impl InitRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            remote: None,
            remote_name: None,
            options: InitOptions::default(),
        }
    }
}

/// Deferred action that needs a covered handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dressing {
    /// Mixed reset to HEAD, skipped when the current branch has no commit.
    ResetIfCommitted,
    /// Register a remote.
    AddRemote { name: String, url: String },
}

/// Stateful wrapper over one repository handle.
pub struct Session<B: Backend> {
    backend: B,
    config: Config,
    layer: Option<B::Repo>,
    dressing: Vec<Dressing>,
    snapshot: Option<Classification>,
}

impl<B: Backend> fmt::Debug for Session<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("covering", &self.layer.as_ref().map(|l| l.work_dir()))
            .field("dressing", &self.dressing)
            .field("snapshot", &self.snapshot.is_some())
            .finish()
    }
}

impl<B: Backend> Session<B> {
    /// Empty session with default configuration.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, Config::default())
    }

    /// Empty session with explicit configuration.
    pub fn with_config(backend: B, config: Config) -> Self {
        Self {
            backend,
            config,
            layer: None,
            dressing: Vec::new(),
            snapshot: None,
        }
    }

    /// Session covering `path` from the start.
    ///
    /// Like [`Session::cover`], a path that holds no repository yields an
    /// empty session rather than an error.
    pub fn covering(backend: B, path: &Path) -> Result<Self, GitError> {
        let mut session = Self::new(backend);
        session.cover(path, &CoverOptions::default())?;
        Ok(session)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The covered handle, or [`GitError::NotCovered`].
    pub fn layer(&self) -> Result<&B::Repo, GitError> {
        self.layer.as_ref().ok_or(GitError::NotCovered)
    }

    /// Actions waiting for the next open.
    pub fn pending_dressing(&self) -> &[Dressing] {
        &self.dressing
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open `path` if it holds a repository marker; otherwise become empty.
    ///
    /// On a hard open error the previous handle and snapshot stay in place;
    /// only the dressing queue is cleared.
    #[instrument(skip(self, opts), fields(path = %path.display(), reset = opts.reset))]
    pub fn cover(&mut self, path: &Path, opts: &CoverOptions) -> Result<&mut Self, GitError> {
        if opts.reset {
            self.dressing.push(Dressing::ResetIfCommitted);
        }

        self.open_with(|backend| {
            if !Self::can_cover(path) {
                debug!("no repository marker");
                return Ok(None);
            }
            match backend.open(path) {
                Ok(repo) => Ok(Some(repo)),
                Err(GitError::NotARepo { .. }) => Ok(None),
                Err(e) => Err(e),
            }
        })
    }

    /// Clone `request.remote` into `request.path` and cover the result.
    #[instrument(skip(self, request), fields(remote = %request.remote, path = %request.path.display()))]
    pub fn clone_repo(&mut self, request: &CloneRequest) -> Result<&mut Self, GitError> {
        if request.reset {
            self.dressing.push(Dressing::ResetIfCommitted);
        }

        self.open_with(|backend| {
            if let Some(parent) = request.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            backend
                .clone_repo(&request.remote, &request.path, &request.options)
                .map(Some)
        })
    }

    /// Create a repository at `request.path` and cover it.
    #[instrument(skip(self, request), fields(path = %request.path.display()))]
    pub fn init(&mut self, request: &InitRequest) -> Result<&mut Self, GitError> {
        if let Some(url) = &request.remote {
            let name = request
                .remote_name
                .clone()
                .unwrap_or_else(|| self.config.remote_name());
            self.dressing.push(Dressing::AddRemote {
                name,
                url: url.clone(),
            });
        }

        self.open_with(|backend| backend.init(&request.path, &request.options).map(Some))
    }

    /// Release the covered handle. Idempotent.
    pub fn uncover(&mut self) {
        self.layer = None;
        self.snapshot = None;
    }

    pub fn covers_anything(&self) -> bool {
        self.layer.is_some()
    }

    /// Install the handle produced by `open`, then drain the dressing queue.
    fn open_with<F>(&mut self, open: F) -> Result<&mut Self, GitError>
    where
        F: FnOnce(&B) -> Result<Option<B::Repo>, GitError>,
    {
        let dressing = std::mem::take(&mut self.dressing);
        let layer = open(&self.backend)?;

        self.layer = layer;
        self.snapshot = None;

        if self.layer.is_none() {
            if !dressing.is_empty() {
                debug!(discarded = dressing.len(), "nothing covered, dressing dropped");
            }
            return Ok(self);
        }

        for action in dressing {
            self.dress(action)?;
        }
        Ok(self)
    }

    fn dress(&mut self, action: Dressing) -> Result<(), GitError> {
        debug!(?action, "dressing");
        match action {
            Dressing::ResetIfCommitted => {
                if !self.commits(None)?.is_empty() {
                    self.reset(None)?;
                }
            }
            Dressing::AddRemote { name, url } => self.add_remote(&name, &url)?,
        }
        Ok(())
    }

    // =========================================================================
    // Delegation
    // =========================================================================

    pub fn add(&self, path: &str) -> Result<(), GitError> {
        self.layer()?.add(path)
    }

    pub fn remove(&self, path: &str) -> Result<(), GitError> {
        self.layer()?.remove(path)
    }

    pub fn commit(&self, message: &str) -> Result<Oid, GitError> {
        self.layer()?.commit(message)
    }

    pub fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        self.layer()?.add_remote(name, url)
    }

    pub fn fetch(&self) -> Result<(), GitError> {
        self.layer()?.fetch()
    }

    pub fn pull(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.layer()?.pull(remote, branch)
    }

    pub fn push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.layer()?.push(remote, branch)
    }

    /// Mixed reset to `target`, HEAD by default.
    pub fn reset(&self, target: Option<&str>) -> Result<(), GitError> {
        self.layer()?.reset(target.unwrap_or("HEAD"))
    }

    pub fn current_branch(&self) -> Result<Option<String>, GitError> {
        self.layer()?.current_branch()
    }

    pub fn local_branches(&self) -> Result<Vec<String>, GitError> {
        self.layer()?.list_branches(BranchScope::Local)
    }

    pub fn remote_branches(&self) -> Result<Vec<String>, GitError> {
        self.layer()?.list_branches(BranchScope::Remote)
    }

    pub fn remotes(&self) -> Result<Vec<Remote>, GitError> {
        self.layer()?.remotes()
    }

    // =========================================================================
    // Branch queries
    // =========================================================================

    pub fn has_local_branch(&self, name: &str) -> Result<bool, GitError> {
        Ok(resolver::has_local_branch(&self.local_branches()?, name))
    }

    pub fn has_remote_branch(&self, name: &str) -> Result<bool, GitError> {
        Ok(resolver::has_remote_branch(&self.remote_branches()?, name))
    }

    pub fn has_branch(&self, name: &str) -> Result<bool, GitError> {
        Ok(resolver::has_branch(
            &self.local_branches()?,
            &self.remote_branches()?,
            name,
        ))
    }

    pub fn remote_branch_only(&self, name: &str) -> Result<bool, GitError> {
        Ok(resolver::remote_branch_only(
            &self.local_branches()?,
            &self.remote_branches()?,
            name,
        ))
    }

    /// Remote `branch` belongs to; see [`resolver::remote_for`].
    pub fn remote_for(&self, branch: &str) -> Result<Option<String>, GitError> {
        Ok(resolver::remote_for(
            &self.local_branches()?,
            &self.remote_branches()?,
            &self.remotes()?,
            branch,
        ))
    }

    pub fn remote_branch_for(&self, branch: &str) -> Result<Option<String>, GitError> {
        Ok(resolver::remote_branch_for(&self.remote_branches()?, branch))
    }

    /// Remote branches besides the current branch's counterpart.
    pub fn other_remote_branches(&self) -> Result<Vec<String>, GitError> {
        let current = self.current_branch()?.unwrap_or_default();
        Ok(resolver::other_remote_branches(
            &self.remote_branches()?,
            &current,
        ))
    }

    // =========================================================================
    // Remotes
    // =========================================================================

    /// Url of the first remote named `name`, or of the first remote.
    pub fn remote_url(&self, name: Option<&str>) -> Result<Option<String>, GitError> {
        Ok(self
            .remotes()?
            .into_iter()
            .find(|r| name.is_none_or(|n| r.name == n))
            .map(|r| r.url))
    }

    /// Name of the first remote at `url`, or of the first remote.
    pub fn remote_name(&self, url: Option<&str>) -> Result<Option<String>, GitError> {
        Ok(self
            .remotes()?
            .into_iter()
            .find(|r| url.is_none_or(|u| r.url == u))
            .map(|r| r.name))
    }

    pub fn any_remote(&self) -> Result<bool, GitError> {
        Ok(!self.remotes()?.is_empty())
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Commits of `branch` (current by default), oldest first.
    ///
    /// An unknown branch or an unborn one yields an empty list.
    pub fn commits(&self, branch: Option<&str>) -> Result<Vec<Oid>, GitError> {
        let branch = match branch {
            Some(b) => b.to_string(),
            None => match self.current_branch()? {
                Some(b) => b,
                None => "HEAD".to_string(),
            },
        };

        match self.layer()?.log(&branch) {
            Ok(mut commits) => {
                commits.reverse();
                Ok(commits)
            }
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Unified diff between two commit-ish values.
    pub fn diff(&self, from: &str, to: &str) -> Result<String, GitError> {
        self.layer()?.diff(from, to)
    }

    /// First commit of the primary branch, or of the first local branch when
    /// the primary branch does not exist.
    pub fn initial_commit(&self) -> Result<Option<Oid>, GitError> {
        let primary = self.config.primary_branch();
        let branch = if self.has_branch(&primary)? {
            Some(primary)
        } else {
            self.local_branches()?.into_iter().next()
        };

        match branch {
            Some(b) => Ok(self.commits(Some(&b))?.into_iter().next()),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FileConfig;
    use crate::git::mock::{FailOn, MockBackend, MockOperation, MockRepo};
    use proptest::prelude::*;
    use tempfile::TempDir;

    /// A temp dir with a `.git` marker, registered with the mock backend.
    pub(crate) fn covered_fixture() -> (TempDir, MockBackend, MockRepo) {
        let dir = TempDir::new().expect("tempdir");
        std::fs::create_dir(dir.path().join(".git")).expect("marker");
        let backend = MockBackend::new();
        let repo = backend.add_repo(dir.path());
        (dir, backend, repo)
    }

    pub(crate) fn covered_session() -> (TempDir, MockBackend, MockRepo, Session<MockBackend>) {
        let (dir, backend, repo) = covered_fixture();
        let mut session = Session::new(backend.clone());
        session
            .cover(dir.path(), &CoverOptions::default())
            .expect("cover");
        backend.clear_operations();
        (dir, backend, repo, session)
    }

    mod lifecycle {
        use super::*;

        #[test]
        fn new_session_is_empty() {
            let session = Session::new(MockBackend::new());
            assert!(!session.covers_anything());
            assert!(matches!(session.layer(), Err(GitError::NotCovered)));
            assert!(matches!(
                session.current_branch(),
                Err(GitError::NotCovered)
            ));
        }

        #[test]
        fn cover_opens_marked_directory() {
            let (dir, backend, _repo) = covered_fixture();
            let mut session = Session::new(backend.clone());
            session.cover(dir.path(), &CoverOptions::default()).unwrap();

            assert!(session.covers_anything());
            assert_eq!(session.layer().unwrap().work_dir(), dir.path());
            assert_eq!(
                backend.operations(),
                vec![MockOperation::Open {
                    path: dir.path().to_path_buf()
                }]
            );
        }

        #[test]
        fn cover_without_marker_is_empty_and_skips_backend() {
            let dir = TempDir::new().unwrap();
            let backend = MockBackend::new();
            backend.add_repo(dir.path());
            let mut session = Session::new(backend.clone());

            session.cover(dir.path(), &CoverOptions { reset: true }).unwrap();

            assert!(!session.covers_anything());
            assert!(session.pending_dressing().is_empty());
            assert!(backend.operations().is_empty());
        }

        #[test]
        fn cover_of_unregistered_marker_is_soft() {
            let dir = TempDir::new().unwrap();
            std::fs::create_dir(dir.path().join(".git")).unwrap();
            let mut session = Session::new(MockBackend::new());

            session.cover(dir.path(), &CoverOptions::default()).unwrap();
            assert!(!session.covers_anything());
        }

        #[test]
        fn cover_replaces_previous_handle() {
            let (first, backend, _) = covered_fixture();
            let second = TempDir::new().unwrap();
            std::fs::create_dir(second.path().join(".git")).unwrap();
            backend.add_repo(second.path());

            let mut session = Session::new(backend);
            session.cover(first.path(), &CoverOptions::default()).unwrap();
            session.cover(second.path(), &CoverOptions::default()).unwrap();
            assert_eq!(session.layer().unwrap().work_dir(), second.path());
        }

        #[test]
        fn uncover_is_idempotent() {
            let (_dir, _backend, _repo, mut session) = covered_session();
            session.uncover();
            session.uncover();
            assert!(!session.covers_anything());
        }

        #[test]
        fn covering_constructor() {
            let (dir, backend, _repo) = covered_fixture();
            let session = Session::covering(backend, dir.path()).unwrap();
            assert!(session.covers_anything());
        }

        #[test]
        fn backend_failure_propagates_and_clears_dressing() {
            let (dir, backend, _repo) = covered_fixture();
            backend.fail_on(FailOn::Open);
            let mut session = Session::new(backend);

            let result = session.cover(dir.path(), &CoverOptions { reset: true });
            assert!(matches!(result, Err(GitError::Internal { .. })));
            assert!(session.pending_dressing().is_empty());
            assert!(!session.covers_anything());
        }
    }

    mod dressing {
        use super::*;

        #[test]
        fn reset_runs_when_repository_has_commits() {
            let (dir, backend, repo) = covered_fixture();
            repo.with_local_branches(["master"])
                .with_current("master")
                .with_commits("master", 1);
            let mut session = Session::new(backend.clone());

            session.cover(dir.path(), &CoverOptions { reset: true }).unwrap();

            assert!(session.pending_dressing().is_empty());
            assert!(backend.operations().contains(&MockOperation::Reset {
                target: "HEAD".into()
            }));
        }

        #[test]
        fn reset_is_skipped_on_empty_repository() {
            let (dir, backend, repo) = covered_fixture();
            repo.with_current("master");
            let mut session = Session::new(backend.clone());

            session.cover(dir.path(), &CoverOptions { reset: true }).unwrap();

            assert!(!backend
                .operations()
                .iter()
                .any(|op| matches!(op, MockOperation::Reset { .. })));
        }

        #[test]
        fn init_registers_remote_after_creation() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("fresh");
            let backend = MockBackend::new();
            let mut session = Session::new(backend.clone());

            let mut request = InitRequest::new(&path);
            request.remote = Some("/srv/upstream.git".into());
            session.init(&request).unwrap();

            assert_eq!(
                backend.operations(),
                vec![
                    MockOperation::Init { path: path.clone() },
                    MockOperation::AddRemote {
                        name: "origin".into(),
                        url: "/srv/upstream.git".into()
                    },
                ]
            );
            assert_eq!(
                session.remote_url(Some("origin")).unwrap().as_deref(),
                Some("/srv/upstream.git")
            );
        }

        #[test]
        fn init_remote_name_comes_from_request_then_config() {
            let dir = TempDir::new().unwrap();
            let config = Config::from_parts(
                FileConfig {
                    remote_name: Some("upstream".into()),
                    ..Default::default()
                },
                None,
            );
            let mut session = Session::with_config(MockBackend::new(), config);

            let mut request = InitRequest::new(dir.path().join("a"));
            request.remote = Some("/srv/a.git".into());
            session.init(&request).unwrap();
            assert_eq!(session.remote_name(None).unwrap().as_deref(), Some("upstream"));

            let mut request = InitRequest::new(dir.path().join("b"));
            request.remote = Some("/srv/b.git".into());
            request.remote_name = Some("mirror".into());
            session.init(&request).unwrap();
            assert_eq!(session.remote_name(None).unwrap().as_deref(), Some("mirror"));
        }

        #[test]
        fn init_without_remote_queues_nothing() {
            let dir = TempDir::new().unwrap();
            let backend = MockBackend::new();
            let mut session = Session::new(backend.clone());
            session.init(&InitRequest::new(dir.path().join("x"))).unwrap();

            assert_eq!(backend.operations().len(), 1);
            assert!(!session.any_remote().unwrap());
        }
    }

    mod cloning {
        use super::*;

        #[test]
        fn clone_creates_parent_and_covers() {
            let dir = TempDir::new().unwrap();
            let backend = MockBackend::new();
            backend
                .add_repo("/srv/source")
                .with_local_branches(["master"])
                .with_current("master")
                .with_commits("master", 3);

            let dest = dir.path().join("nested/deeper/clone");
            let mut session = Session::new(backend.clone());
            session
                .clone_repo(&CloneRequest::new("/srv/source", &dest))
                .unwrap();

            assert!(dest.parent().unwrap().is_dir());
            assert!(session.covers_anything());
            assert_eq!(session.current_branch().unwrap().as_deref(), Some("master"));
            assert_eq!(session.commits(None).unwrap().len(), 3);
            assert_eq!(
                session.remote_branch_for("master").unwrap().as_deref(),
                Some("origin/master")
            );
        }

        #[test]
        fn clone_failure_propagates() {
            let dir = TempDir::new().unwrap();
            let backend = MockBackend::new();
            backend.fail_on(FailOn::Clone);
            let mut session = Session::new(backend);

            let mut request = CloneRequest::new("/srv/missing", dir.path().join("c"));
            request.reset = true;
            assert!(session.clone_repo(&request).is_err());
            assert!(session.pending_dressing().is_empty());
        }

        #[test]
        fn failed_clone_keeps_previous_handle() {
            let (dir, backend, _repo, mut session) = covered_session();
            session.status(None).unwrap();
            backend.fail_on(FailOn::Clone);

            let request = CloneRequest::new("/srv/missing", dir.path().join("c"));
            assert!(session.clone_repo(&request).is_err());

            assert!(session.covers_anything());
            assert!(session.snapshot().is_some());
            assert_eq!(session.directory().unwrap(), dir.path());
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn remote_lookups_take_first_match() {
            let (_dir, _backend, repo, session) = covered_session();
            repo.with_remotes([("origin", "/srv/a"), ("mirror", "/srv/a"), ("backup", "/srv/b")]);

            assert_eq!(session.remote_url(None).unwrap().as_deref(), Some("/srv/a"));
            assert_eq!(
                session.remote_url(Some("backup")).unwrap().as_deref(),
                Some("/srv/b")
            );
            assert_eq!(session.remote_url(Some("ghost")).unwrap(), None);
            assert_eq!(
                session.remote_name(Some("/srv/a")).unwrap().as_deref(),
                Some("origin")
            );
            assert!(session.any_remote().unwrap());
        }

        #[test]
        fn scenario_branch_queries() {
            let (_dir, _backend, repo, session) = covered_session();
            repo.with_local_branches(["master"])
                .with_remote_branches(["origin/HEAD", "origin/master", "origin/feature"])
                .with_current("master")
                .with_remotes([("origin", "/srv/origin")]);

            assert_eq!(session.other_remote_branches().unwrap(), vec!["origin/feature"]);
            assert!(session.remote_branch_only("feature").unwrap());
            assert!(session.has_branch("feature").unwrap());
            assert_eq!(session.remote_for("feature").unwrap().as_deref(), Some("origin"));
            assert_eq!(session.remote_for("ghost").unwrap(), None);
        }
    }

    mod history {
        use super::*;

        #[test]
        fn commits_of_unknown_branch_are_empty() {
            let (_dir, _backend, repo, session) = covered_session();
            repo.with_local_branches(["master"]).with_current("master");
            assert!(session.commits(Some("ghost")).unwrap().is_empty());
            assert!(session.commits(None).unwrap().is_empty());
        }

        #[test]
        fn initial_commit_prefers_primary_branch() {
            let (_dir, _backend, repo, session) = covered_session();
            repo.with_local_branches(["dev", "master"])
                .with_current("dev")
                .with_commits("master", 2)
                .with_commits("dev", 4);

            let master = repo.history("master");
            assert_eq!(session.initial_commit().unwrap(), master.last().cloned());
        }

        #[test]
        fn initial_commit_falls_back_to_first_local_branch() {
            let (_dir, _backend, repo, session) = covered_session();
            repo.with_local_branches(["trunk", "dev"])
                .with_current("dev")
                .with_commits("trunk", 2)
                .with_commits("dev", 1);

            let trunk = repo.history("trunk");
            assert_eq!(session.initial_commit().unwrap(), trunk.last().cloned());
        }

        #[test]
        fn initial_commit_of_empty_repository() {
            let (_dir, _backend, _repo, session) = covered_session();
            assert_eq!(session.initial_commit().unwrap(), None);
        }

        proptest! {
            #[test]
            fn commits_are_oldest_first(count in 0usize..16) {
                let (_dir, _backend, repo, session) = covered_session();
                repo.with_local_branches(["master"])
                    .with_current("master")
                    .with_commits("master", count);

                let mut commits = session.commits(None).unwrap();
                prop_assert_eq!(commits.len(), count);
                commits.reverse();
                prop_assert_eq!(commits, repo.history("master"));
            }
        }
    }
}
