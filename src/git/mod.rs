//! git
//!
//! The backend capability and its implementations.
//!
//! # Architecture
//!
//! [`traits`] defines what a session may ask of a repository. [`interface`]
//! implements it on top of `git2` and is the **only** module allowed to
//! import `git2`. [`mock`] implements it in memory for tests.
//!
//! # Example
//!
//! ```ignore
//! use gitcover::git::{Backend, GitBackend};
//! use std::path::Path;
//!
//! let repo = GitBackend::new().open(Path::new("/path/to/repo"))?;
//! ```

mod interface;
pub mod mock;
pub mod traits;

pub use interface::{Git, GitBackend, GitError};
pub use traits::{
    Backend, BranchOptions, BranchScope, CheckoutOptions, CloneOptions, InitOptions, Repository,
};
