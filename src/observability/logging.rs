//! Logging setup.
//!
//! Everything goes to stderr through `tracing-subscriber`, leaving stdout
//! free for `showcase render`. Verbosity only raises this crate and the
//! request tracing layer; client and server internals (`hyper`, `reqwest`)
//! stay at `warn` unless `SHOWCASE_LOG_LEVEL` says otherwise.

use std::io::IsTerminal;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding a full `EnvFilter` directive.
pub const LOG_LEVEL_ENV: &str = "SHOWCASE_LOG_LEVEL";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines, colored when the terminal allows.
    #[default]
    Human,
    /// Newline-delimited JSON.
    Json,
}

/// Level name for a `-v` count. Saturates at `trace`.
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directive for a `-v` count.
///
/// `-v` turns on the render pipeline and request traces without also
/// enabling connection-level chatter from dependencies.
#[must_use]
pub fn default_filter(verbosity: u8) -> String {
    let level = verbosity_to_directive(verbosity);
    if verbosity == 0 {
        return level.to_string();
    }
    format!("warn,showcase={level},tower_http={level}")
}

/// Whether stderr output should carry ANSI escapes.
fn use_ansi(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Installs the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));
    let show_target = verbosity >= 2;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(show_target)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Human => builder.with_ansi(use_ansi(color)).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
