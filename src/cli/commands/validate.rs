//! `validate` command
//!
//! Checks configuration files without fetching any document.

use serde_json::json;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{ConfigLoader, LoadWarning};
use crate::error::{ConfigError, Severity, ShowcaseError, ValidationIssue};

/// Validate configuration files.
///
/// Every file is checked and reported before the first failure is returned.
///
/// # Errors
///
/// Returns the first configuration error encountered. With `--strict`,
/// warnings are reported as a validation error.
pub fn run(args: &ValidateArgs) -> Result<(), ShowcaseError> {
    let loader = ConfigLoader::default();
    let mut report = Vec::with_capacity(args.files.len());
    let mut first_error: Option<ConfigError> = None;

    for path in &args.files {
        tracing::info!(file = %path.display(), "validating configuration");

        let outcome = loader.load(path).and_then(|result| {
            if args.strict && !result.warnings.is_empty() {
                return Err(ConfigError::ValidationError {
                    path: path.display().to_string(),
                    errors: result.warnings.iter().map(warning_as_error).collect(),
                });
            }
            Ok(result.warnings)
        });

        match outcome {
            Ok(warnings) => {
                for warning in &warnings {
                    tracing::warn!(
                        location = warning.location.as_deref().unwrap_or("<unknown>"),
                        "{}",
                        warning.message
                    );
                }
                report.push(FileReport {
                    file: path.display().to_string(),
                    error: None,
                    warnings,
                });
            }
            Err(e) => {
                report.push(FileReport {
                    file: path.display().to_string(),
                    error: Some(e.to_string()),
                    warnings: Vec::new(),
                });
                first_error.get_or_insert(e);
            }
        }
    }

    print_report(&report, args.format);

    first_error.map_or(Ok(()), |e| Err(e.into()))
}

struct FileReport {
    file: String,
    error: Option<String>,
    warnings: Vec<LoadWarning>,
}

fn warning_as_error(warning: &LoadWarning) -> ValidationIssue {
    ValidationIssue {
        path: warning
            .location
            .clone()
            .unwrap_or_else(|| "<unknown>".to_string()),
        message: warning.message.clone(),
        severity: Severity::Error,
    }
}

fn print_report(report: &[FileReport], format: OutputFormat) {
    match format {
        OutputFormat::Human => {
            for entry in report {
                match &entry.error {
                    None if entry.warnings.is_empty() => println!("{}: ok", entry.file),
                    None => println!(
                        "{}: ok ({} warning(s))",
                        entry.file,
                        entry.warnings.len()
                    ),
                    Some(error) => println!("{}: {error}", entry.file),
                }
            }
        }
        OutputFormat::Json => {
            let files: Vec<_> = report
                .iter()
                .map(|entry| {
                    json!({
                        "file": entry.file,
                        "valid": entry.error.is_none(),
                        "error": entry.error,
                        "warnings": entry
                            .warnings
                            .iter()
                            .map(|w| json!({ "message": w.message, "location": w.location }))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
            println!("{}", json!({ "files": files }));
        }
    }
}
