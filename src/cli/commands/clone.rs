//! clone command - Clone a repository

use std::path::Path;

use super::super::Context;
use crate::git::CloneOptions;
use crate::session::CloneRequest;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Clone `url` into `path`, relative to the working directory.
pub fn clone(ctx: &Context, url: &str, path: &Path, reset: bool, no_checkout: bool) -> Result<()> {
    let dest = ctx.cwd()?.join(path);
    let mut session = ctx.session_for(None)?;

    let request = CloneRequest {
        remote: url.to_string(),
        path: dest.clone(),
        reset,
        options: CloneOptions {
            no_checkout,
            ..Default::default()
        },
    };
    session
        .clone_repo(&request)
        .with_context(|| format!("Failed to clone '{}'", url))?;

    output::print(format!("Cloned into {}", dest.display()), ctx.verbosity());
    Ok(())
}
