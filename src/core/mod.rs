//! core
//!
//! Domain types and configuration shared by every layer.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, QualifiedBranch, Oid, status codes
//! - [`config`] - Configuration schema and loading

pub mod config;
pub mod types;
