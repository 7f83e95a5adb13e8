//! git::mock
//!
//! In-memory backend for deterministic testing.
//!
//! # Design
//!
//! [`MockBackend`] keeps a registry of fake repositories keyed by path.
//! Every handle it returns shares state with the registry, so a test can
//! keep a [`MockRepo`] around, seed it, hand the backend to a session and
//! inspect the result afterwards.
//!
//! Mutating calls are recorded as [`MockOperation`]s in one log shared by the
//! backend and all its repositories. Reads are not recorded, which makes
//! "this performed no backend call" a plain `operations().is_empty()` check.
//!
//! # Example
//!
//! ```
//! use gitcover::git::mock::{MockBackend, MockOperation};
//! use gitcover::git::{Backend, Repository, CheckoutOptions};
//! use std::path::Path;
//!
//! let backend = MockBackend::new();
//! backend
//!     .add_repo("/work/repo")
//!     .with_local_branches(["master"])
//!     .with_current("master")
//!     .with_commits("master", 2);
//!
//! let repo = backend.open(Path::new("/work/repo")).unwrap();
//! repo.checkout("feature", &CheckoutOptions { new_branch: true, ..Default::default() })
//!     .unwrap();
//! assert!(matches!(
//!     backend.operations().last(),
//!     Some(MockOperation::Checkout { name, .. }) if name == "feature"
//! ));
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{
    Backend, BranchOptions, BranchScope, CheckoutOptions, CloneOptions, InitOptions, Repository,
};
use super::GitError;
use crate::core::types::{Oid, QualifiedBranch, RawStatus, Remote, StatusCode};

/// Recorded mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Open { path: PathBuf },
    Clone { url: String, dest: PathBuf },
    Init { path: PathBuf },
    CreateBranch { name: String, opts: BranchOptions },
    DeleteBranch { name: String },
    Checkout { name: String, opts: CheckoutOptions },
    CheckoutPaths { paths: Vec<String> },
    Add { path: String },
    Remove { path: String },
    Commit { message: String },
    Reset { target: String },
    AddRemote { name: String, url: String },
    Fetch,
    Pull { remote: String, branch: String },
    Push { remote: String, branch: String },
}

/// Call that should fail on its next invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Open,
    Clone,
    Init,
    Checkout,
    Fetch,
    Push,
}

#[derive(Debug, Default)]
struct Shared {
    operations: Vec<MockOperation>,
    fail_on: Option<FailOn>,
    next_commit: u64,
}

impl Shared {
    fn record(&mut self, op: MockOperation) {
        self.operations.push(op);
    }

    fn check_failure(&mut self, call: FailOn) -> Result<(), GitError> {
        if self.fail_on == Some(call) {
            self.fail_on = None;
            return Err(GitError::Internal {
                message: format!("injected {call:?} failure"),
            });
        }
        Ok(())
    }

    fn mint_oid(&mut self) -> Oid {
        self.next_commit += 1;
        // 40 hex digits, counter in the low bits
        Oid::new(format!("{:040x}", self.next_commit)).expect("formatted oid is valid hex")
    }
}

#[derive(Debug, Default, Clone)]
struct RepoState {
    local: Vec<String>,
    remote: Vec<String>,
    current: Option<String>,
    /// branch or qualified name -> commits, newest first
    logs: HashMap<String, Vec<Oid>>,
    upstreams: HashMap<String, String>,
    remotes: Vec<Remote>,
    status: Vec<(String, RawStatus)>,
    staged: Vec<String>,
    tracked: Vec<String>,
}

impl RepoState {
    fn head_log(&self) -> Vec<Oid> {
        self.current
            .as_ref()
            .and_then(|b| self.logs.get(b))
            .cloned()
            .unwrap_or_default()
    }

    fn resolve(&self, refname: &str) -> Option<Vec<Oid>> {
        if refname == "HEAD" {
            let log = self.head_log();
            return (!log.is_empty()).then_some(log);
        }
        let name = refname
            .strip_prefix("refs/heads/")
            .or_else(|| refname.strip_prefix("refs/remotes/"))
            .unwrap_or(refname);
        if let Some(log) = self.logs.get(name) {
            return Some(log.clone());
        }
        // a raw sha resolves to the history ending at that commit
        self.logs.values().find_map(|log| {
            log.iter()
                .position(|oid| oid.as_str() == refname)
                .map(|at| log[at..].to_vec())
        })
    }
}

/// Handle to one fake repository. Clones share state.
#[derive(Debug, Clone)]
pub struct MockRepo {
    work_dir: PathBuf,
    state: Arc<Mutex<RepoState>>,
    shared: Arc<Mutex<Shared>>,
}

impl MockRepo {
    fn state(&self) -> MutexGuard<'_, RepoState> {
        self.state.lock().expect("mock repo state poisoned")
    }

    fn shared(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().expect("mock shared state poisoned")
    }

    /// Seed local branches (in enumeration order).
    pub fn with_local_branches<I, S>(&self, names: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state().local = names.into_iter().map(Into::into).collect();
        self
    }

    /// Seed remote-qualified branches (in enumeration order).
    pub fn with_remote_branches<I, S>(&self, names: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state().remote = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_current(&self, name: &str) -> &Self {
        self.state().current = Some(name.to_string());
        self
    }

    pub fn with_remotes<I, N, U>(&self, remotes: I) -> &Self
    where
        I: IntoIterator<Item = (N, U)>,
        N: Into<String>,
        U: Into<String>,
    {
        self.state().remotes = remotes
            .into_iter()
            .map(|(name, url)| Remote::new(name, url))
            .collect();
        self
    }

    /// Seed `count` fresh commits on `branch` (branch or qualified name).
    pub fn with_commits(&self, branch: &str, count: usize) -> &Self {
        let minted: Vec<Oid> = {
            let mut shared = self.shared();
            (0..count).map(|_| shared.mint_oid()).collect()
        };
        let mut state = self.state();
        let log = state.logs.entry(branch.to_string()).or_default();
        for oid in minted {
            log.insert(0, oid);
        }
        drop(state);
        self
    }

    /// Give `name` exactly the history of `from`.
    pub fn with_same_history(&self, name: &str, from: &str) -> &Self {
        let mut state = self.state();
        let log = state.logs.get(from).cloned().unwrap_or_default();
        state.logs.insert(name.to_string(), log);
        drop(state);
        self
    }

    /// Seed raw per-file states from porcelain codes.
    pub fn with_status<I>(&self, entries: I) -> &Self
    where
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        self.state().status = entries
            .into_iter()
            .map(|(path, code)| {
                let raw = RawStatus::from_porcelain(code).expect("valid porcelain code");
                (path.to_string(), raw)
            })
            .collect();
        self
    }

    pub fn with_tracked<I>(&self, paths: I) -> &Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.state().tracked = paths.into_iter().map(String::from).collect();
        self
    }

    /// Upstream recorded for a local branch, if any.
    pub fn upstream_of(&self, branch: &str) -> Option<String> {
        self.state().upstreams.get(branch).cloned()
    }

    /// Current history of a branch or qualified name, newest first.
    pub fn history(&self, name: &str) -> Vec<Oid> {
        self.state().logs.get(name).cloned().unwrap_or_default()
    }
}

impl Repository for MockRepo {
    fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn list_branches(&self, scope: BranchScope) -> Result<Vec<String>, GitError> {
        let state = self.state();
        Ok(match scope {
            BranchScope::Local => state.local.clone(),
            BranchScope::Remote => state.remote.clone(),
        })
    }

    fn current_branch(&self) -> Result<Option<String>, GitError> {
        Ok(self.state().current.clone())
    }

    fn create_branch(&self, name: &str, opts: &BranchOptions) -> Result<(), GitError> {
        self.shared().record(MockOperation::CreateBranch {
            name: name.to_string(),
            opts: opts.clone(),
        });

        let mut state = self.state();
        if state.local.iter().any(|b| b == name) {
            return Err(GitError::Internal {
                message: format!("branch '{name}' already exists"),
            });
        }
        let start = opts
            .start_point
            .as_deref()
            .or(opts.track.as_deref())
            .unwrap_or("HEAD");
        let log = state.resolve(start).ok_or_else(|| GitError::RefNotFound {
            refname: start.to_string(),
        })?;
        state.local.push(name.to_string());
        state.logs.insert(name.to_string(), log);
        if let Some(upstream) = &opts.track {
            state.upstreams.insert(name.to_string(), upstream.clone());
        }
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<(), GitError> {
        self.shared().record(MockOperation::DeleteBranch {
            name: name.to_string(),
        });

        let mut state = self.state();
        let before = state.local.len();
        state.local.retain(|b| b != name);
        if state.local.len() == before {
            return Err(GitError::RefNotFound {
                refname: name.to_string(),
            });
        }
        state.logs.remove(name);
        state.upstreams.remove(name);
        Ok(())
    }

    fn checkout(&self, name: &str, opts: &CheckoutOptions) -> Result<(), GitError> {
        {
            let mut shared = self.shared();
            shared.record(MockOperation::Checkout {
                name: name.to_string(),
                opts: opts.clone(),
            });
            shared.check_failure(FailOn::Checkout)?;
        }

        let mut state = self.state();
        let is_local = state.local.iter().any(|b| b == name);
        if opts.new_branch || !is_local {
            if is_local {
                return Err(GitError::Internal {
                    message: format!("branch '{name}' already exists"),
                });
            }
            let (start, upstream) = if opts.new_branch {
                (opts.start_point.clone().unwrap_or_else(|| "HEAD".into()), None)
            } else {
                let candidate = state
                    .remote
                    .iter()
                    .find(|q| {
                        QualifiedBranch::parse(q)
                            .is_some_and(|q| q.branch() == name && !q.is_head_marker())
                    })
                    .cloned()
                    .ok_or_else(|| GitError::RefNotFound {
                        refname: name.to_string(),
                    })?;
                (candidate.clone(), Some(candidate))
            };
            let log = state.resolve(&start).ok_or_else(|| GitError::RefNotFound {
                refname: start.clone(),
            })?;
            state.local.push(name.to_string());
            state.logs.insert(name.to_string(), log);
            if let Some(upstream) = upstream {
                state.upstreams.insert(name.to_string(), upstream);
            }
        }
        state.current = Some(name.to_string());
        Ok(())
    }

    fn checkout_paths(&self, paths: &[String]) -> Result<(), GitError> {
        self.shared().record(MockOperation::CheckoutPaths {
            paths: paths.to_vec(),
        });
        // only worktree-side changes are restored from the index
        self.state()
            .status
            .retain(|(path, raw)| !(paths.contains(path) && raw.index == StatusCode::Unmodified));
        Ok(())
    }

    fn add(&self, path: &str) -> Result<(), GitError> {
        self.shared().record(MockOperation::Add {
            path: path.to_string(),
        });
        let mut state = self.state();
        state.staged.push(path.to_string());
        if !state.tracked.iter().any(|p| p == path) {
            state.tracked.push(path.to_string());
        }
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<(), GitError> {
        self.shared().record(MockOperation::Remove {
            path: path.to_string(),
        });
        let mut state = self.state();
        state.staged.push(path.to_string());
        state.tracked.retain(|p| p != path);
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<Oid, GitError> {
        let oid = {
            let mut shared = self.shared();
            shared.record(MockOperation::Commit {
                message: message.to_string(),
            });
            shared.mint_oid()
        };

        let mut state = self.state();
        let branch = state.current.clone().ok_or_else(|| GitError::RefNotFound {
            refname: "HEAD".into(),
        })?;
        if !state.local.contains(&branch) {
            state.local.push(branch.clone());
        }
        state.logs.entry(branch).or_default().insert(0, oid.clone());
        let staged = std::mem::take(&mut state.staged);
        state.status.retain(|(path, _)| !staged.contains(path));
        Ok(oid)
    }

    fn reset(&self, target: &str) -> Result<(), GitError> {
        self.shared().record(MockOperation::Reset {
            target: target.to_string(),
        });
        Ok(())
    }

    fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        self.shared().record(MockOperation::AddRemote {
            name: name.to_string(),
            url: url.to_string(),
        });
        self.state().remotes.push(Remote::new(name, url));
        Ok(())
    }

    fn remotes(&self) -> Result<Vec<Remote>, GitError> {
        Ok(self.state().remotes.clone())
    }

    fn fetch(&self) -> Result<(), GitError> {
        let mut shared = self.shared();
        shared.record(MockOperation::Fetch);
        shared.check_failure(FailOn::Fetch)
    }

    fn pull(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.shared().record(MockOperation::Pull {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        let mut state = self.state();
        let qualified = format!("{remote}/{branch}");
        if let Some(log) = state.logs.get(&qualified).cloned() {
            state.logs.insert(branch.to_string(), log);
        }
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        {
            let mut shared = self.shared();
            shared.record(MockOperation::Push {
                remote: remote.to_string(),
                branch: branch.to_string(),
            });
            shared.check_failure(FailOn::Push)?;
        }
        let mut state = self.state();
        let log = state.logs.get(branch).cloned().ok_or_else(|| GitError::RefNotFound {
            refname: branch.to_string(),
        })?;
        let qualified = format!("{remote}/{branch}");
        if !state.remote.contains(&qualified) {
            state.remote.push(qualified.clone());
        }
        state.logs.insert(qualified, log);
        Ok(())
    }

    fn log(&self, refname: &str) -> Result<Vec<Oid>, GitError> {
        self.state()
            .resolve(refname)
            .ok_or_else(|| GitError::RefNotFound {
                refname: refname.to_string(),
            })
    }

    fn log_path(&self, path: &str) -> Result<Vec<Oid>, GitError> {
        let state = self.state();
        if state.tracked.iter().any(|p| p == path) {
            Ok(state.head_log())
        } else {
            Ok(Vec::new())
        }
    }

    fn status(&self) -> Result<Vec<(String, RawStatus)>, GitError> {
        Ok(self.state().status.clone())
    }

    fn diff(&self, from: &str, to: &str) -> Result<String, GitError> {
        Ok(format!("diff {from}..{to}\n"))
    }

    fn tracked_files(&self) -> Result<Vec<String>, GitError> {
        Ok(self.state().tracked.clone())
    }
}

/// Fake backend holding a registry of [`MockRepo`]s.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    repos: Arc<Mutex<HashMap<PathBuf, MockRepo>>>,
    shared: Arc<Mutex<Shared>>,
}

impl MockBackend {
    /// Create a backend with no repositories.
    pub fn new() -> Self {
        Self::default()
    }

    fn shared(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().expect("mock shared state poisoned")
    }

    fn repos(&self) -> MutexGuard<'_, HashMap<PathBuf, MockRepo>> {
        self.repos.lock().expect("mock registry poisoned")
    }

    /// Register an empty repository at `path` and return its handle.
    pub fn add_repo(&self, path: impl Into<PathBuf>) -> MockRepo {
        let work_dir = path.into();
        let repo = MockRepo {
            work_dir: work_dir.clone(),
            state: Arc::new(Mutex::new(RepoState::default())),
            shared: Arc::clone(&self.shared),
        };
        self.repos().insert(work_dir, repo.clone());
        repo
    }

    /// Handle to a registered repository.
    pub fn repo(&self, path: impl AsRef<Path>) -> Option<MockRepo> {
        self.repos().get(path.as_ref()).cloned()
    }

    /// Make the next `call` fail with an injected error.
    pub fn fail_on(&self, call: FailOn) {
        self.shared().fail_on = Some(call);
    }

    /// All recorded mutating calls, oldest first.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.shared().operations.clone()
    }

    /// Forget recorded calls.
    pub fn clear_operations(&self) {
        self.shared().operations.clear();
    }
}

impl Backend for MockBackend {
    type Repo = MockRepo;

    fn open(&self, path: &Path) -> Result<MockRepo, GitError> {
        {
            let mut shared = self.shared();
            shared.record(MockOperation::Open {
                path: path.to_path_buf(),
            });
            shared.check_failure(FailOn::Open)?;
        }
        self.repo(path).ok_or_else(|| GitError::NotARepo {
            path: path.to_path_buf(),
        })
    }

    fn clone_repo(&self, url: &str, dest: &Path, opts: &CloneOptions) -> Result<MockRepo, GitError> {
        {
            let mut shared = self.shared();
            shared.record(MockOperation::Clone {
                url: url.to_string(),
                dest: dest.to_path_buf(),
            });
            shared.check_failure(FailOn::Clone)?;
        }

        let source = self.repo(url).ok_or_else(|| GitError::NotARepo {
            path: PathBuf::from(url),
        })?;
        let source = source.state().clone();

        let clone = self.add_repo(dest);
        {
            let mut state = clone.state();
            state.remotes = vec![Remote::new("origin", url)];
            state.remote = std::iter::once("origin/HEAD".to_string())
                .chain(source.local.iter().map(|b| format!("origin/{b}")))
                .collect();
            for branch in &source.local {
                if let Some(log) = source.logs.get(branch) {
                    state.logs.insert(format!("origin/{branch}"), log.clone());
                }
            }
            let checked_out = opts.branch.clone().or_else(|| source.current.clone());
            if let Some(branch) = checked_out {
                if let Some(log) = source.logs.get(&branch) {
                    state.logs.insert(branch.clone(), log.clone());
                    state.local.push(branch.clone());
                    state
                        .upstreams
                        .insert(branch.clone(), format!("origin/{branch}"));
                }
                state.current = Some(branch);
            }
            if !opts.no_checkout {
                state.tracked = source.tracked.clone();
            }
        }
        Ok(clone)
    }

    fn init(&self, path: &Path, opts: &InitOptions) -> Result<MockRepo, GitError> {
        {
            let mut shared = self.shared();
            shared.record(MockOperation::Init {
                path: path.to_path_buf(),
            });
            shared.check_failure(FailOn::Init)?;
        }
        let repo = self.add_repo(path);
        let initial = opts
            .initial_branch
            .clone()
            .unwrap_or_else(|| "master".to_string());
        repo.with_current(&initial);
        Ok(repo)
    }
}
