//! checkout command - Check out a branch

use super::super::Context;
use crate::core::types::BranchName;
use crate::git::CheckoutOptions;
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

/// Check out a branch.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `name` - Branch to check out
/// * `from_initial` - Root a new branch at the initial commit
pub fn checkout(ctx: &Context, name: &str, from_initial: bool) -> Result<()> {
    let name = BranchName::new(name).context("Invalid branch name")?;
    let session = ctx.covered_session()?;
    let opts = CheckoutOptions::default();

    let done = if from_initial {
        session.checkout_from_initial_commit(name.as_str(), &opts)
    } else {
        session.checkout(name.as_str(), &opts)
    }
    .with_context(|| format!("Failed to check out '{}'", name))?;

    if !done {
        bail!("Nothing to check out from: the repository has no commits yet");
    }

    output::print(format!("Switched to '{}'", name), ctx.verbosity());
    Ok(())
}
