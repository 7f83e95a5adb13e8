//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag. Results go
//! to stdout, diagnostics to stderr. Commands offering `--json` bypass these
//! helpers and print serialized values directly.

use std::fmt::Display;

use crate::core::types::StatusCategory;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format a branch name, marking the current one.
pub fn format_branch(name: &str, current: bool) -> String {
    if current {
        format!("* {}", name)
    } else {
        format!("  {}", name)
    }
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Heading line for one status category.
pub fn format_category(category: StatusCategory, count: usize) -> String {
    format!("{} ({}):", category, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_precedence() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn branch_marker() {
        assert_eq!(format_branch("master", true), "* master");
        assert_eq!(format_branch("dev", false), "  dev");
    }

    #[test]
    fn list_and_category() {
        assert_eq!(format_list(&["a", "b"], "  "), "  a\n  b");
        assert_eq!(format_category(StatusCategory::Deleted, 2), "deleted (2):");
    }
}
