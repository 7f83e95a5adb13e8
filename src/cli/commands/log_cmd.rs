//! log command - List commits oldest first

use super::super::Context;
use anyhow::Result;

/// List commits of `branch` (current by default), oldest first.
///
/// An unknown branch prints nothing.
pub fn log(ctx: &Context, branch: Option<&str>) -> Result<()> {
    let session = ctx.covered_session()?;

    for commit in session.commits(branch)? {
        println!("{}", commit);
    }
    Ok(())
}
