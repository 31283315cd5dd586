//! CLI argument definitions
//!
//! All Clap derive structs for `showcase` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::ConfigOverrides;
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Server-rendered portfolio page backed by remote JSON documents.
#[derive(Parser, Debug)]
#[command(name = "showcase", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "SHOWCASE_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the portfolio page over HTTP.
    Serve(ServeArgs),

    /// Render the page once and write it to stdout.
    Render(RenderArgs),

    /// Validate configuration files without fetching anything.
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

// ============================================================================
// Shared Source Arguments
// ============================================================================

/// Where the configuration and the two documents come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to YAML site configuration.
    #[arg(short, long, env = "SHOWCASE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the General Info document URL.
    #[arg(long, env = "SHOWCASE_GENERAL_INFO_URL")]
    pub general_info_url: Option<String>,

    /// Override the Portfolio Mapping document URL.
    #[arg(long, env = "SHOWCASE_PORTFOLIO_URL")]
    pub portfolio_url: Option<String>,
}

impl SourceArgs {
    /// Endpoint overrides carried by these arguments.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            general_info_url: self.general_info_url.clone(),
            portfolio_url: self.portfolio_url.clone(),
            bind: None,
        }
    }
}

// ============================================================================
// Serve / Render / Validate
// ============================================================================

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Configuration and document sources.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Bind the HTTP server on `[host:]port`.
    #[arg(short, long, env = "SHOWCASE_BIND")]
    pub bind: Option<String>,

    /// Expose Prometheus metrics on 127.0.0.1:<port>.
    #[arg(long, env = "SHOWCASE_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

/// Arguments for `render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Configuration and document sources.
    #[command(flatten)]
    pub source: SourceArgs,

    /// What to write to stdout.
    #[arg(short, long, default_value = "html")]
    pub format: RenderFormat,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: clap_complete::Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output of `render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderFormat {
    /// Complete HTML document.
    #[default]
    Html,
    /// The display tree as JSON.
    Json,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

// ============================================================================
// Tests
// ============================================================================
