//! status command - Show the classified working tree

use super::super::Context;
use crate::core::types::StatusCategory;
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};

/// Show working tree status.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `category` - Restrict output to one category
/// * `json` - Print the classification as JSON
pub fn status(ctx: &Context, category: Option<StatusCategory>, json: bool) -> Result<()> {
    let mut session = ctx.covered_session()?;
    let classification = session
        .status(category)
        .context("Failed to read status")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    let verbosity = ctx.verbosity();
    if classification.is_clean() {
        output::print("nothing to report, working tree clean", verbosity);
        return Ok(());
    }

    for category in classification.categories() {
        let files = classification.files(category);
        if files.is_empty() {
            continue;
        }
        if verbosity == Verbosity::Quiet {
            for file in files {
                println!("{}", file);
            }
        } else {
            println!("{}", output::format_category(category, files.len()));
            println!("{}", output::format_list(files, "    "));
        }
    }

    Ok(())
}
