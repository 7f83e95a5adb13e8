//! gitcover - DWIM branch handling and status over a git working tree
//!
//! Run with `gitcover --help` for usage.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gitcover::cli::{self, Cli};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "GITCOVER_LOG";

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    setup_logging(cli.debug);
    cli::run(cli)
}
