//! Configuration loader
//!
//! This module implements the configuration loading pipeline:
//! 1. Size check
//! 2. Environment variable expansion (pre-parse, on raw text)
//! 3. YAML parsing
//! 4. Deserialization to typed config
//! 5. CLI overrides
//! 6. Validation
//! 7. Freeze with `Arc`

use std::path::Path;
use std::sync::Arc;

use serde_yaml::Value;

use crate::config::schema::SiteConfig;
use crate::config::validation::Validator;
use crate::error::ConfigError;

/// Source label used when no configuration file is involved.
const CLI_SOURCE: &str = "<cli>";

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_config_size: env_or("SHOWCASE_MAX_CONFIG_SIZE", 1024 * 1024),
        }
    }
}

/// Values supplied on the command line or through `SHOWCASE_*` variables.
///
/// Any `Some` field replaces the corresponding file/default value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replacement for `endpoints.general_info`.
    pub general_info_url: Option<String>,
    /// Replacement for `endpoints.portfolio`.
    pub portfolio_url: Option<String>,
    /// Replacement for `server.bind`.
    pub bind: Option<String>,
}

impl ConfigOverrides {
    /// Returns `true` if no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.general_info_url.is_none() && self.portfolio_url.is_none() && self.bind.is_none()
    }

    /// Writes every set override into `config`.
    pub fn apply(&self, config: &mut SiteConfig) {
        if let Some(url) = &self.general_info_url {
            config.endpoints.general_info.clone_from(url);
        }
        if let Some(url) = &self.portfolio_url {
            config.endpoints.portfolio.clone_from(url);
        }
        if let Some(bind) = &self.bind {
            config.server.bind.clone_from(bind);
        }
    }
}

/// Result of loading a configuration.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<SiteConfig>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
///
/// Handles the full loading pipeline from YAML file to frozen `SiteConfig`.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Loads a configuration file without overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, YAML parsing fails, or
    /// validation fails.
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        self.load_with(Some(path), &ConfigOverrides::default())
    }

    /// Resolves the effective configuration from an optional file plus
    /// overrides.
    ///
    /// With no file the built-in defaults are the base.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// merged configuration fails validation.
    pub fn load_with(
        &self,
        path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<LoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let mut config = match path {
            Some(path) => self.read_file(path, &mut warnings)?,
            None => SiteConfig::default(),
        };
        overrides.apply(&mut config);

        let source = path.map_or_else(|| CLI_SOURCE.to_string(), |p| p.display().to_string());
        finalize(config, &source, warnings)
    }

    /// Parses configuration text that did not come from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails.
    pub fn load_str(&self, raw: &str, source: &Path) -> Result<LoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let config = parse(raw, source, &mut warnings)?;
        finalize(config, &source.display().to_string(), warnings)
    }

    fn read_file(
        &self,
        path: &Path,
        warnings: &mut Vec<LoadWarning>,
    ) -> Result<SiteConfig, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let file_size = usize::try_from(metadata.len()).unwrap_or(self.options.max_config_size);
        if file_size > self.options.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {} bytes", self.options.max_config_size),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        parse(&raw, path, warnings)
    }
}

fn parse(
    raw: &str,
    path: &Path,
    warnings: &mut Vec<LoadWarning>,
) -> Result<SiteConfig, ConfigError> {
    // Handle UTF-8 BOM
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut env_sub = EnvSubstitution::new();
    let substituted = env_sub.substitute(raw, path)?;
    warnings.extend(env_sub.warnings);

    let root: Value = serde_yaml::from_str(&substituted).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })?;

    if root.is_null() {
        return Err(ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: "Configuration file is empty".to_string(),
        });
    }

    serde_yaml::from_value(root).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: None,
        message: format!("Failed to deserialize configuration: {e}"),
    })
}

fn finalize(
    config: SiteConfig,
    source: &str,
    mut warnings: Vec<LoadWarning>,
) -> Result<LoadResult, ConfigError> {
    let validation = Validator::new().validate(&config);
    if validation.has_errors() {
        return Err(ConfigError::ValidationError {
            path: source.to_string(),
            errors: validation.errors,
        });
    }

    warnings.extend(validation.warnings.into_iter().map(|issue| LoadWarning {
        message: issue.message,
        location: Some(issue.path),
    }));

    Ok(LoadResult {
        config: Arc::new(config),
        warnings,
    })
}

// ============================================================================
// Environment Variable Substitution
// ============================================================================

/// Pre-parse environment variable substitution.
///
/// Runs on raw YAML text BEFORE parsing so expanded values keep YAML typing.
struct EnvSubstitution {
    warnings: Vec<LoadWarning>,
}

impl EnvSubstitution {
    const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Substitutes environment variables in raw YAML text.
    ///
    /// Supports:
    /// - `${VAR}` - expand to value (empty string if unset with warning)
    /// - `${VAR:-default}` - expand to default if unset
    /// - `${VAR:?message}` - fail if unset
    /// - `$$` - literal `$`
    fn substitute(&mut self, raw_yaml: &str, source_path: &Path) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(raw_yaml.len());
        let mut chars = raw_yaml.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    chars.next();
                    result.push('$');
                }
                Some('{') => {
                    chars.next();
                    let spec = Self::parse_var_spec(&mut chars, source_path)?;
                    match std::env::var(&spec.name) {
                        Ok(value) => result.push_str(&value),
                        Err(_) => match spec.fallback {
                            Fallback::Default(default) => result.push_str(&default),
                            Fallback::Required(message) => {
                                return Err(ConfigError::EnvVarNotSet {
                                    var: spec.name,
                                    location: message,
                                });
                            }
                            Fallback::Empty => self.warnings.push(LoadWarning {
                                message: format!(
                                    "Environment variable '{}' is not set, using empty string",
                                    spec.name
                                ),
                                location: Some(source_path.display().to_string()),
                            }),
                        },
                    }
                }
                _ => result.push(c),
            }
        }

        Ok(result)
    }

    /// Parses a variable specification from `${...}`.
    fn parse_var_spec(
        chars: &mut std::iter::Peekable<std::str::Chars>,
        source_path: &Path,
    ) -> Result<VarSpec, ConfigError> {
        let mut name = String::new();

        while let Some(c) = chars.next() {
            match c {
                '}' => {
                    return Ok(VarSpec {
                        name,
                        fallback: Fallback::Empty,
                    });
                }
                ':' => match chars.peek() {
                    Some('-') => {
                        chars.next();
                        let default = Self::read_until_close(chars, source_path)?;
                        return Ok(VarSpec {
                            name,
                            fallback: Fallback::Default(default),
                        });
                    }
                    Some('?') => {
                        chars.next();
                        let message = Self::read_until_close(chars, source_path)?;
                        return Ok(VarSpec {
                            name,
                            fallback: Fallback::Required(message),
                        });
                    }
                    _ => name.push(':'),
                },
                _ => name.push(c),
            }
        }

        Err(ConfigError::ParseError {
            path: source_path.to_path_buf(),
            line: None,
            message: format!("Unclosed environment variable reference: ${{{name}"),
        })
    }

    /// Reads content until the closing `}`, handling nested braces.
    fn read_until_close(
        chars: &mut std::iter::Peekable<std::str::Chars>,
        source_path: &Path,
    ) -> Result<String, ConfigError> {
        let mut value = String::new();
        let mut depth = 1;

        for c in chars.by_ref() {
            match c {
                '{' => {
                    depth += 1;
                    value.push(c);
                }
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(value);
                    }
                    value.push(c);
                }
                _ => value.push(c),
            }
        }

        Err(ConfigError::ParseError {
            path: source_path.to_path_buf(),
            line: None,
            message: "Unclosed environment variable reference".to_string(),
        })
    }
}

struct VarSpec {
    name: String,
    fallback: Fallback,
}

enum Fallback {
    Empty,
    Default(String),
    Required(String),
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
