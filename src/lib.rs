//! gitcover - a stateful session over one git repository
//!
//! A [`session::Session`] covers at most one repository at a time and layers
//! branch resolution, DWIM checkout, status classification and one-step
//! file publishing on top of a small backend capability.
//!
//! # Architecture
//!
//! The codebase is layered, leaves first:
//!
//! - [`core`] - Value types and configuration
//! - [`git`] - The backend capability, its `git2` implementation and a mock
//! - [`session`] - Lifecycle, branch resolver, checkout engine, status
//!   classifier
//! - [`cli`] - Command-line interface layer (parses args, delegates to a
//!   session)
//! - [`ui`] - Output helpers
//!
//! # Error model
//!
//! "Not found" conditions resolve to `false`, `None` or empty collections.
//! Backend failures surface as [`git::GitError`] unchanged; nothing is
//! retried.

pub mod cli;
pub mod core;
pub mod git;
pub mod session;
pub mod ui;
