//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens a session (or an empty one for `clone` and `init`)
//! 2. Calls the session operation
//! 3. Formats and displays output
//!
//! Handlers hold no git logic of their own.

mod branches;
mod checkout;
mod clone;
mod init;
mod log_cmd;
mod status;
mod sync;

pub use branches::{branches, remote_for};
pub use checkout::checkout;
pub use clone::clone;
pub use init::init;
pub use log_cmd::log;
pub use status::status;
pub use sync::{pull_all, push_file, updates};

use super::args::Command;
use super::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Status { category, json } => status(ctx, category, json),
        Command::Branches => branches(ctx),
        Command::Checkout { name, from_initial } => checkout(ctx, &name, from_initial),
        Command::RemoteFor { branch } => remote_for(ctx, &branch),
        Command::Log { branch } => log(ctx, branch.as_deref()),
        Command::Updates { branch } => updates(ctx, branch.as_deref()),
        Command::PushFile {
            path,
            branch,
            remote,
            remove,
        } => push_file(ctx, &path, branch, remote, remove),
        Command::PullAll => pull_all(ctx),
        Command::Clone {
            url,
            path,
            reset,
            no_checkout,
        } => clone(ctx, &url, &path, reset, no_checkout),
        Command::Init {
            path,
            remote,
            remote_name,
        } => init(ctx, &path, remote, remote_name),
    }
}
