//! core::types
//!
//! Strong types for the values a session hands around.
//!
//! # Types
//!
//! - [`BranchName`] - Validated git branch name, used when a branch is created
//! - [`QualifiedBranch`] - A `remote/branch` name split into its two parts
//! - [`Oid`] - Commit identifier (hex sha)
//! - [`Remote`] - A configured remote: name and url
//! - [`StatusCategory`] - One of the four file status buckets
//! - [`RawStatus`] - The backend's per-file two-column state
//!
//! Lookups (has-branch, remote-for) work on plain `&str` because names come
//! straight from the backend. Validation only happens where a name is about
//! to be written into the repository.
//!
//! # Examples
//!
//! ```
//! use gitcover::core::types::{BranchName, Oid, QualifiedBranch};
//!
//! let branch = BranchName::new("feature").unwrap();
//! assert_eq!(branch.as_str(), "feature");
//!
//! let qualified = QualifiedBranch::parse("origin/feature").unwrap();
//! assert_eq!(qualified.remote(), "origin");
//! assert_eq!(qualified.branch(), "feature");
//!
//! assert!(BranchName::new("invalid..name").is_err());
//! assert!(Oid::new("not-a-sha").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid object id: {0}")]
    InvalidOid(String),

    #[error("invalid status code: {0}")]
    InvalidStatus(String),
}

/// A validated git branch name.
///
/// Follows `git check-ref-format --branch`: not empty, not `@`, no leading
/// `.` or `-`, no trailing `/` or `.lock`, no `..`, `@{`, `//`, spaces,
/// control characters or any of `~^:\?*[`.
///
/// # Example
///
/// ```
/// use gitcover::core::types::BranchName;
///
/// assert!(BranchName::new("feature/x").is_ok());
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new("has space").is_err());
/// assert!(BranchName::new("@").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` naming the first rule violated.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if let Some(reason) = Self::violation(&name) {
            return Err(TypeError::InvalidBranchName(format!("'{name}': {reason}")));
        }
        Ok(Self(name))
    }

    fn violation(name: &str) -> Option<&'static str> {
        const FORBIDDEN: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];

        if name.is_empty() {
            return Some("cannot be empty");
        }
        if name == "@" {
            return Some("'@' is reserved");
        }
        if name.starts_with('-') {
            return Some("cannot start with '-'");
        }
        if name.ends_with('/') {
            return Some("cannot end with '/'");
        }
        if name.contains("..") || name.contains("@{") || name.contains("//") {
            return Some("cannot contain '..', '@{' or '//'");
        }
        if name.chars().any(|c| c.is_ascii_control() || FORBIDDEN.contains(&c)) {
            return Some("contains a forbidden character");
        }
        // per-component rules also cover the whole-name leading dot
        let bad_component = name
            .split('/')
            .any(|part| part.starts_with('.') || part.ends_with(".lock"));
        if bad_component {
            return Some("path component cannot start with '.' or end with '.lock'");
        }
        None
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A remote-qualified branch name, `<remote>/<branch>`.
///
/// Parsing splits on `/` and keeps the **last two** segments. A remote or a
/// branch containing a slash is therefore misread: `origin/feature/x` parses
/// as remote `feature`, branch `x`. Lookups built on this type inherit that
/// ambiguity.
///
/// # Example
///
/// ```
/// use gitcover::core::types::QualifiedBranch;
///
/// let q = QualifiedBranch::parse("upstream/main").unwrap();
/// assert_eq!(q.to_string(), "upstream/main");
///
/// let nested = QualifiedBranch::parse("origin/feature/x").unwrap();
/// assert_eq!(nested.remote(), "feature");
/// assert_eq!(nested.branch(), "x");
///
/// assert!(QualifiedBranch::parse("master").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedBranch {
    remote: String,
    branch: String,
}

impl QualifiedBranch {
    /// Split a qualified name. Returns `None` when there is no `/`.
    pub fn parse(name: &str) -> Option<Self> {
        let mut segments = name.rsplit('/');
        let branch = segments.next()?;
        let remote = segments.next()?;
        Some(Self {
            remote: remote.to_string(),
            branch: branch.to_string(),
        })
    }

    /// The remote segment.
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// The branch segment (the unqualified suffix).
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Whether this is a remote's symbolic `HEAD` marker (e.g. `origin/HEAD`).
    pub fn is_head_marker(&self) -> bool {
        self.branch == "HEAD"
    }
}

impl std::fmt::Display for QualifiedBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.remote, self.branch)
    }
}

/// A git object identifier (SHA-1 or SHA-256), normalized to lowercase.
///
/// # Example
///
/// ```
/// use gitcover::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// assert_eq!(oid.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` unless the input is 40 or 64 hex digits.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(Self(oid))
    }

    /// First `len` characters (or the whole id if shorter).
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A configured remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remote {
    /// Remote name, e.g. `origin`
    pub name: String,
    /// Fetch url; may be a filesystem path
    pub url: String,
}

impl Remote {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The four mutually exclusive file status buckets.
///
/// Ordering follows [`StatusCategory::ALL`], which is also the order keys
/// appear in a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    /// Tracked file whose content differs from HEAD
    Changed,
    /// File staged for addition
    Added,
    /// Tracked file removed from the index or the working tree
    Deleted,
    /// File present in the working tree only
    Untracked,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 4] = [
        StatusCategory::Changed,
        StatusCategory::Added,
        StatusCategory::Deleted,
        StatusCategory::Untracked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Changed => "changed",
            StatusCategory::Added => "added",
            StatusCategory::Deleted => "deleted",
            StatusCategory::Untracked => "untracked",
        }
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StatusCategory {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| TypeError::InvalidStatus(s.to_string()))
    }
}

/// One column of a raw file state, as in `git status --porcelain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Unmodified,
    Modified,
    Added,
    Deleted,
    Renamed,
    TypeChanged,
    Untracked,
    Conflicted,
}

impl StatusCode {
    /// Decode a porcelain status letter.
    pub fn from_char(c: char) -> Result<Self, TypeError> {
        Ok(match c {
            ' ' => StatusCode::Unmodified,
            'M' => StatusCode::Modified,
            'A' => StatusCode::Added,
            'D' => StatusCode::Deleted,
            'R' => StatusCode::Renamed,
            'T' => StatusCode::TypeChanged,
            '?' => StatusCode::Untracked,
            'U' => StatusCode::Conflicted,
            other => return Err(TypeError::InvalidStatus(other.to_string())),
        })
    }
}

/// Raw per-file state reported by the backend: index column and worktree
/// column.
///
/// # Example
///
/// ```
/// use gitcover::core::types::{RawStatus, StatusCode};
///
/// let raw = RawStatus::from_porcelain(" M").unwrap();
/// assert_eq!(raw.index, StatusCode::Unmodified);
/// assert_eq!(raw.worktree, StatusCode::Modified);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawStatus {
    pub index: StatusCode,
    pub worktree: StatusCode,
}

impl RawStatus {
    pub fn new(index: StatusCode, worktree: StatusCode) -> Self {
        Self { index, worktree }
    }

    /// Parse a two-letter porcelain code such as `"M "`, `" D"` or `"??"`.
    pub fn from_porcelain(code: &str) -> Result<Self, TypeError> {
        let mut chars = code.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(x), Some(y), None) => Ok(Self {
                index: StatusCode::from_char(x)?,
                worktree: StatusCode::from_char(y)?,
            }),
            _ => Err(TypeError::InvalidStatus(code.to_string())),
        }
    }

    /// Bucket this state into one category, or `None` for a clean entry.
    ///
    /// Precedence is added, deleted, untracked, changed, so a path never
    /// lands in two buckets.
    pub fn category(&self) -> Option<StatusCategory> {
        use StatusCode::*;
        match (self.index, self.worktree) {
            (Added, _) => Some(StatusCategory::Added),
            (Deleted, _) | (_, Deleted) => Some(StatusCategory::Deleted),
            (Untracked, _) | (_, Untracked) => Some(StatusCategory::Untracked),
            (Unmodified, Unmodified) => None,
            _ => Some(StatusCategory::Changed),
        }
    }
}
