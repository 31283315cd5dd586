//! Command-line interface
//!
//! Argument definitions and command handlers for the `showcase` binary.

pub mod args;
pub mod commands;

use crate::error::ExitCode;

/// Exit code for an argument parsing failure.
///
/// `--help` and `--version` surface as parse errors but are not failures.
#[must_use]
pub fn parse_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        ExitCode::USAGE_ERROR
    } else {
        ExitCode::SUCCESS
    }
}
