//! init command - Create a repository

use std::path::Path;

use super::super::Context;
use crate::session::InitRequest;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Create a repository at `path`, registering `remote` when given.
pub fn init(
    ctx: &Context,
    path: &Path,
    remote: Option<String>,
    remote_name: Option<String>,
) -> Result<()> {
    let dest = ctx.cwd()?.join(path);
    let mut session = ctx.session_for(None)?;

    let mut request = InitRequest::new(&dest);
    request.remote = remote;
    request.remote_name = remote_name;
    session
        .init(&request)
        .with_context(|| format!("Failed to initialize {}", dest.display()))?;

    let verbosity = ctx.verbosity();
    output::print(format!("Initialized {}", dest.display()), verbosity);
    if let (Some(name), Some(url)) = (session.remote_name(None)?, session.remote_url(None)?) {
        output::print(format!("Remote {} -> {}", name, url), verbosity);
    }
    Ok(())
}
