//! branches and remote-for commands

use super::super::Context;
use crate::ui::output;
use anyhow::{bail, Result};

/// List local branches, marking the current one, then remote branches.
pub fn branches(ctx: &Context) -> Result<()> {
    let session = ctx.covered_session()?;
    let current = session.current_branch()?;

    for branch in session.local_branches()? {
        let is_current = current.as_deref() == Some(branch.as_str());
        println!("{}", output::format_branch(&branch, is_current));
    }
    for branch in session.remote_branches()? {
        println!("  remotes/{}", branch);
    }

    Ok(())
}

/// Print the remote `branch` belongs to.
pub fn remote_for(ctx: &Context, branch: &str) -> Result<()> {
    let session = ctx.covered_session()?;

    match session.remote_for(branch)? {
        Some(remote) => {
            println!("{}", remote);
            Ok(())
        }
        None => bail!("No remote known for branch '{}'", branch),
    }
}
