//! session::resolver
//!
//! Branch resolution over live branch listings.
//!
//! Every function here is pure: callers pass the local names, the
//! remote-qualified names and (where needed) the configured remotes exactly
//! as the backend enumerated them. Nothing is cached, since branches change
//! outside the session's control.
//!
//! # Tie-break
//!
//! When several remotes carry the same branch, the **first** one in
//! enumeration order wins. There is no "best remote" heuristic.
//!
//! # Known ambiguity
//!
//! Remote-qualified names are split with [`QualifiedBranch::parse`], which
//! keeps the last two `/` segments. A branch called `feature/x` on `origin`
//! is seen as branch `x` on remote `feature`.

use crate::core::types::{QualifiedBranch, Remote};

/// Whether `name` is a local branch.
pub fn has_local_branch(local: &[String], name: &str) -> bool {
    local.iter().any(|b| b == name)
}

/// Whether any remote-qualified branch has `name` as its suffix.
pub fn has_remote_branch(remote: &[String], name: &str) -> bool {
    qualified(remote).any(|q| q.branch() == name)
}

/// Local or remote.
pub fn has_branch(local: &[String], remote: &[String], name: &str) -> bool {
    has_local_branch(local, name) || has_remote_branch(remote, name)
}

/// Known remotely but not locally.
pub fn remote_branch_only(local: &[String], remote: &[String], name: &str) -> bool {
    has_remote_branch(remote, name) && !has_local_branch(local, name)
}

/// Remote a branch belongs to.
///
/// `None` when the branch is unknown. Otherwise the remote of the first
/// qualified name whose suffix matches, falling back to the first configured
/// remote for a local-only branch.
pub fn remote_for(
    local: &[String],
    remote: &[String],
    remotes: &[Remote],
    branch: &str,
) -> Option<String> {
    if !has_branch(local, remote, branch) {
        return None;
    }

    qualified(remote)
        .find(|q| q.branch() == branch)
        .map(|q| q.remote().to_string())
        .or_else(|| remotes.first().map(|r| r.name.clone()))
}

/// First remote-qualified name whose suffix is `branch`.
pub fn remote_branch_for(remote: &[String], branch: &str) -> Option<String> {
    qualified(remote)
        .find(|q| q.branch() == branch)
        .map(|q| q.to_string())
}

/// Remote branches other than `current`'s counterpart and the `HEAD`
/// markers, in enumeration order.
pub fn other_remote_branches(remote: &[String], current: &str) -> Vec<String> {
    let counterpart = remote_branch_for(remote, current);

    remote
        .iter()
        .filter(|name| {
            let is_marker = QualifiedBranch::parse(name).is_some_and(|q| q.is_head_marker());
            !is_marker && Some(name.as_str()) != counterpart.as_deref()
        })
        .cloned()
        .collect()
}

fn qualified(remote: &[String]) -> impl Iterator<Item = QualifiedBranch> + '_ {
    remote.iter().filter_map(|name| QualifiedBranch::parse(name))
}
