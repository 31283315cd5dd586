//! Error types for `showcase`
//!
//! A single hierarchy covers the render pipeline (fetch, markup), the site
//! configuration, and the HTTP host, plus the exit codes the CLI maps them to.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `showcase` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// One of the remote documents could not be fetched
    pub const FETCH_ERROR: i32 = 4;

    /// The page markup could not be produced
    pub const RENDER_ERROR: i32 = 5;

    /// The HTTP host failed to bind or serve
    pub const SERVER_ERROR: i32 = 6;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `showcase` operations.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Remote document fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Markup serialization error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// HTTP host error
    #[error(transparent)]
    Server(#[from] ServerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShowcaseError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Fetch(_) => ExitCode::FETCH_ERROR,
            Self::Render(_) | Self::Json(_) => ExitCode::RENDER_ERROR,
            Self::Server(_) => ExitCode::SERVER_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Fetch Errors
// ============================================================================

/// The remote document a fetch was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// The profile record (`{"name": ...}`).
    GeneralInfo,
    /// The project name → URL mapping.
    Portfolio,
}

impl Resource {
    /// Stable label used in metrics and structured logs.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::GeneralInfo => "general_info",
            Self::Portfolio => "portfolio",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeneralInfo => f.write_str("general info"),
            Self::Portfolio => f.write_str("portfolio data"),
        }
    }
}

/// Failure to obtain one of the two remote documents.
///
/// A non-success status and a payload that does not match the expected
/// shape both abort the render. Transport failures keep the client's own
/// error and message.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The origin answered with a non-2xx status.
    #[error("failed to fetch {resource} (HTTP {status})")]
    Status {
        /// Which document was requested
        resource: Resource,
        /// HTTP status code returned by the origin
        status: u16,
    },

    /// The body was not the expected JSON shape.
    #[error("failed to fetch {resource}: invalid payload: {message}")]
    InvalidPayload {
        /// Which document was requested
        resource: Resource,
        /// Decoder message
        message: String,
    },

    /// Connection, DNS, TLS, or body read failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Returns the resource this error is about, when known.
    #[must_use]
    pub const fn resource(&self) -> Option<Resource> {
        match self {
            Self::Status { resource, .. } | Self::InvalidPayload { resource, .. } => {
                Some(*resource)
            }
            Self::Transport(_) => None,
        }
    }

    /// Short classification used as a metrics label.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::InvalidPayload { .. } => "invalid_payload",
            Self::Transport(_) => "transport",
        }
    }
}

// ============================================================================
// Render Errors
// ============================================================================

/// Failure to serialize a display tree into markup.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The page template failed to render
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}: {}", format_issues(.errors))]
    ValidationError {
        /// Path to the configuration file, or `<cli>` for flag overrides
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Environment variable referenced in configuration is not set
    #[error("environment variable '{var}' not set (referenced at {location})")]
    EnvVarNotSet {
        /// Name of the environment variable
        var: String,
        /// Location in the configuration where it was referenced
        location: String,
    },
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Dotted path to the problematic field (e.g., "endpoints.portfolio")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - validation failure that prevents configuration from being used
    Error,
    /// Warning - potential issue that does not prevent configuration loading
    Warning,
}

// ============================================================================
// Server Errors
// ============================================================================

/// HTTP host errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound
    #[error("bind failed on {addr}: {source}")]
    Bind {
        /// Address that was requested
        addr: String,
        /// Underlying socket error
        #[source]
        source: std::io::Error,
    },

    /// The bind address could not be parsed
    #[error("invalid bind address \"{input}\": {message}")]
    InvalidAddress {
        /// The raw input
        input: String,
        /// Parser message
        message: String,
    },

    /// The server loop terminated with an I/O error
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `showcase` operations.
pub type Result<T> = std::result::Result<T, ShowcaseError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::CONFIG_ERROR, 2);
        assert_eq!(ExitCode::IO_ERROR, 3);
        assert_eq!(ExitCode::FETCH_ERROR, 4);
        assert_eq!(ExitCode::RENDER_ERROR, 5);
        assert_eq!(ExitCode::SERVER_ERROR, 6);
        assert_eq!(ExitCode::USAGE_ERROR, 64);
        assert_eq!(ExitCode::INTERRUPTED, 130);
        assert_eq!(ExitCode::TERMINATED, 143);
    }

    #[test]
    fn test_fetch_error_exit_code() {
        let err: ShowcaseError = FetchError::Status {
            resource: Resource::GeneralInfo,
            status: 404,
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::FETCH_ERROR);
    }

    #[test]
    fn test_config_error_exit_code() {
        let err: ShowcaseError = ConfigError::MissingFile {
            path: PathBuf::from("/test"),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn test_server_error_exit_code() {
        let err: ShowcaseError = ServerError::InvalidAddress {
            input: "nope".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::SERVER_ERROR);
    }

    #[test]
    fn test_io_error_exit_code() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: ShowcaseError = io_err.into();
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn status_error_names_general_info() {
        let err = FetchError::Status {
            resource: Resource::GeneralInfo,
            status: 404,
        };
        assert_eq!(err.to_string(), "failed to fetch general info (HTTP 404)");
        assert_eq!(err.resource(), Some(Resource::GeneralInfo));
        assert_eq!(err.kind(), "status");
    }

    #[test]
    fn status_error_names_portfolio() {
        let err = FetchError::Status {
            resource: Resource::Portfolio,
            status: 500,
        };
        assert_eq!(err.to_string(), "failed to fetch portfolio data (HTTP 500)");
        assert_eq!(err.resource(), Some(Resource::Portfolio));
    }

    #[test]
    fn invalid_payload_is_a_fetch_failure() {
        let err = FetchError::InvalidPayload {
            resource: Resource::GeneralInfo,
            message: "missing field `name`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to fetch general info"));
        assert!(msg.contains("missing field `name`"));
        assert_eq!(err.kind(), "invalid_payload");
    }

    #[test]
    fn resource_labels() {
        assert_eq!(Resource::GeneralInfo.as_label(), "general_info");
        assert_eq!(Resource::Portfolio.as_label(), "portfolio");
    }

    #[test]
    fn test_validation_issue_display() {
        let issue = ValidationIssue {
            path: "endpoints.portfolio".to_string(),
            message: "not an absolute URL".to_string(),
            severity: Severity::Error,
        };
        assert_eq!(
            issue.to_string(),
            "error: not an absolute URL at endpoints.portfolio"
        );
    }

    #[test]
    fn test_validation_issue_warning_display() {
        let issue = ValidationIssue {
            path: "site.tagline".to_string(),
            message: "tagline is empty".to_string(),
            severity: Severity::Warning,
        };
        assert_eq!(issue.to_string(), "warning: tagline is empty at site.tagline");
    }

    #[test]
    fn validation_error_lists_issues() {
        let err = ConfigError::ValidationError {
            path: "site.yaml".to_string(),
            errors: vec![ValidationIssue {
                path: "server.bind".to_string(),
                message: "invalid socket address".to_string(),
                severity: Severity::Error,
            }],
        };
        let msg = err.to_string();
        assert!(msg.contains("site.yaml"));
        assert!(msg.contains("server.bind"));
    }

    #[test]
    fn test_config_error_env_var_display() {
        let err = ConfigError::EnvVarNotSet {
            var: "PORTFOLIO_URL".to_string(),
            location: "endpoints.portfolio".to_string(),
        };
        assert!(err.to_string().contains("PORTFOLIO_URL"));
        assert!(err.to_string().contains("endpoints.portfolio"));
    }
}
