//! updates, push-file and pull-all commands

use super::super::Context;
use crate::session::{PushFileOptions, Verb};
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Report whether `branch` differs from its remote counterpart.
pub fn updates(ctx: &Context, branch: Option<&str>) -> Result<()> {
    let session = ctx.covered_session()?;

    let answer = match session.has_updates(branch).context("Failed to check for updates")? {
        Some(true) => "updates available",
        Some(false) => "up to date",
        None => {
            output::warn("branch is missing locally or remotely", ctx.verbosity());
            "unknown"
        }
    };
    println!("{}", answer);
    Ok(())
}

/// Add or remove one file, commit and push.
pub fn push_file(
    ctx: &Context,
    path: &str,
    branch: Option<String>,
    remote: Option<String>,
    remove: bool,
) -> Result<()> {
    let session = ctx.covered_session()?;
    let opts = PushFileOptions {
        branch,
        remote,
        verb: if remove { Verb::Remove } else { Verb::Add },
    };

    let oid = session
        .push_file(path, &opts)
        .with_context(|| format!("Failed to publish '{}'", path))?;

    output::print(format!("Published {} as {}", path, oid.short(7)), ctx.verbosity());
    Ok(())
}

/// Fetch, fast-forward and mirror all remote branches.
pub fn pull_all(ctx: &Context) -> Result<()> {
    let session = ctx.covered_session()?;

    let rebuilt = session
        .pull_all_branches()
        .context("Failed to pull branches")?;

    let verbosity = ctx.verbosity();
    if rebuilt.is_empty() {
        output::print("No other remote branches", verbosity);
    } else {
        output::print("Rebuilt from remote:", verbosity);
        output::print(output::format_list(&rebuilt, "  "), verbosity);
    }
    Ok(())
}
