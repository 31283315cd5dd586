//! Configuration validation
//!
//! Runs on the fully resolved `SiteConfig` (file, defaults, and CLI
//! overrides merged). Validation collects ALL issues instead of stopping at
//! the first one.

use reqwest::Url;

use crate::config::schema::SiteConfig;
use crate::error::{Severity, ValidationIssue};
use crate::server::parse_bind_addr;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns the result.
    pub fn validate(&mut self, config: &SiteConfig) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_endpoint("endpoints.general_info", &config.endpoints.general_info);
        self.validate_endpoint("endpoints.portfolio", &config.endpoints.portfolio);

        if let Err(e) = parse_bind_addr(&config.server.bind) {
            self.error("server.bind", e.to_string());
        }

        if config.site.tagline.trim().is_empty() {
            self.warning("site.tagline", "tagline is empty");
        }
        if config.site.title.trim().is_empty() {
            self.warning("site.title", "title is empty");
        }
        if config.site.link_label.trim().is_empty() {
            self.warning("site.link_label", "project cards will have an empty link");
        }

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_endpoint(&mut self, path: &str, value: &str) {
        match Url::parse(value) {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                self.error(
                    path,
                    format!("unsupported scheme '{}', expected http or https", url.scheme()),
                );
            }
            Ok(url) if url.host_str().is_none() => {
                self.error(path, "URL has no host");
            }
            Ok(_) => {}
            Err(e) => self.error(path, format!("not an absolute URL: {e}")),
        }
    }

    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.into(),
            severity: Severity::Error,
        });
    }

    fn warning(&mut self, path: &str, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.into(),
            severity: Severity::Warning,
        });
    }
}
