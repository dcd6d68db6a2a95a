//! Configuration file loading with precedence handling.
//!
//! The config file is line-oriented `key=value`:
//!
//! ```text
//! # comments and blank lines are ignored
//! wrap_indicator='-> '
//! text_attribute=bold:underline
//! ```
//!
//! Values may be wrapped in single quotes, which are stripped. Problems in the file are
//! collected as [`ConfigWarning`]s instead of failing the load, so the caller can ask
//! once whether to carry on.

use crate::model::{parse_attribute_list, DEFAULT_HIGHLIGHT_ATTRIBUTES};
use crate::view_state::DEFAULT_WRAP_INDICATOR;
use ratatui::style::Modifier;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// File name of the per-user config, relative to the home directory.
pub const CONFIG_FILE_NAME: &str = ".namedtail";

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "NAMEDTAIL_CONFIG";

/// Environment variable overriding the wrap indicator.
pub const WRAP_INDICATOR_ENV_VAR: &str = "NAMEDTAIL_WRAP_INDICATOR";

/// Environment variable overriding the log file path.
pub const LOG_FILE_ENV_VAR: &str = "NAMEDTAIL_LOG_FILE";

/// Config key for the continuation-row prefix.
pub const KEY_WRAP_INDICATOR: &str = "wrap_indicator";

/// Config key for the highlight attribute list.
pub const KEY_TEXT_ATTRIBUTE: &str = "text_attribute";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a regular file, bad UTF-8).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },
}

/// A config problem that can be ignored if the user chooses to continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A key other than `wrap_indicator` or `text_attribute`.
    UnknownKey {
        /// 1-based line number in the config file.
        line: usize,
        /// The key as written, trimmed.
        key: String,
    },
    /// A non-comment line without `=`.
    MalformedLine {
        /// 1-based line number in the config file.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },
    /// A `text_attribute` token other than `bold`, `reverse`, `underline`.
    UnknownAttribute {
        /// The unrecognised token.
        token: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::UnknownKey { line, key } => {
                write!(f, "line {}: unrecognized config key '{}'", line, key)
            }
            ConfigWarning::MalformedLine { line, text } => {
                write!(f, "line {}: expected key=value, got '{}'", line, text)
            }
            ConfigWarning::UnknownAttribute { token } => {
                write!(
                    f,
                    "unrecognized text attribute '{}' (expected bold, reverse or underline)",
                    token
                )
            }
        }
    }
}

/// Values read from a config file. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// Prefix for wrapped continuation rows.
    pub wrap_indicator: Option<String>,
    /// Colon-separated attribute list, unparsed.
    pub text_attribute: Option<String>,
}

/// A config file plus the problems found while reading it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedConfig {
    /// Recognised keys.
    pub file: ConfigFile,
    /// Lines that were skipped, with the reason.
    pub warnings: Vec<ConfigWarning>,
}

/// Parse the contents of a config file.
///
/// Later assignments to the same key win.
pub fn parse_config(contents: &str) -> ParsedConfig {
    let mut parsed = ParsedConfig::default();

    for (index, raw) in contents.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            parsed.warnings.push(ConfigWarning::MalformedLine {
                line: line_number,
                text: line.to_string(),
            });
            continue;
        };

        let key = key.trim();
        let value = strip_quotes(value.trim()).to_string();
        match key {
            KEY_WRAP_INDICATOR => parsed.file.wrap_indicator = Some(value),
            KEY_TEXT_ATTRIBUTE => parsed.file.text_attribute = Some(value),
            other => parsed.warnings.push(ConfigWarning::UnknownKey {
                line: line_number,
                key: other.to_string(),
            }),
        }
    }

    parsed
}

/// Remove one pair of surrounding single quotes.
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value)
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but cannot be read.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ParsedConfig>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(parse_config(&contents)))
}

/// Resolve default config file path: `~/.namedtail`.
///
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config_file`)
/// 2. `NAMEDTAIL_CONFIG` environment variable
/// 3. Default path `~/.namedtail`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ParsedConfig>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Prefix for continuation rows.
    pub wrap_indicator: String,
    /// Attribute mask for highlighted segments.
    pub highlight: Modifier,
    /// Wrap long lines (disabled with `--no_wrap`).
    pub line_wrap: bool,
    /// Append the host name to the title (`--name`).
    pub show_host: bool,
    /// Search Set (`--search`).
    pub search: Vec<String>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            wrap_indicator: DEFAULT_WRAP_INDICATOR.to_string(),
            highlight: DEFAULT_HIGHLIGHT_ATTRIBUTES,
            line_wrap: true,
            show_host: false,
            search: Vec::new(),
            log_file_path: default_log_path(),
        }
    }
}

/// Configuration together with every warning raised while producing it.
///
/// Offending entries have already been skipped in `config`; the caller decides once,
/// for all warnings, whether to continue with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOutcome {
    /// Settings after the file layer, with offending entries skipped.
    pub config: ResolvedConfig,
    /// Problems found in the file, in the order they were found.
    pub warnings: Vec<ConfigWarning>,
}

impl ConfigOutcome {
    /// No warnings: the config can be used without asking.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/namedtail/namedtail.log` on Linux, the temp directory
/// elsewhere when no state directory exists.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("namedtail").join("namedtail.log"),
        None => std::env::temp_dir().join("namedtail.log"),
    }
}

/// Merge a parsed config file into defaults.
///
/// `text_attribute` tokens that are not recognised become warnings; if none of the
/// tokens is recognised the default mask is kept so highlights stay visible.
pub fn merge_config(parsed: Option<ParsedConfig>) -> ConfigOutcome {
    let defaults = ResolvedConfig::default();

    let Some(ParsedConfig { file, mut warnings }) = parsed else {
        return ConfigOutcome {
            config: defaults,
            warnings: Vec::new(),
        };
    };

    let highlight = match file.text_attribute {
        Some(value) => {
            let attributes = parse_attribute_list(&value);
            warnings.extend(
                attributes
                    .unknown
                    .into_iter()
                    .map(|token| ConfigWarning::UnknownAttribute { token }),
            );
            if attributes.mask.is_empty() {
                defaults.highlight
            } else {
                attributes.mask
            }
        }
        None => defaults.highlight,
    };

    ConfigOutcome {
        config: ResolvedConfig {
            wrap_indicator: file.wrap_indicator.unwrap_or(defaults.wrap_indicator),
            highlight,
            ..defaults
        },
        warnings,
    }
}

/// Record config warnings in the log.
///
/// Call after logging is initialized; events emitted before that have no subscriber
/// and are lost.
pub fn log_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        warn!(%warning, "Config warning");
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `NAMEDTAIL_WRAP_INDICATOR`: Override wrap indicator
/// - `NAMEDTAIL_LOG_FILE`: Override log file path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(indicator) = std::env::var(WRAP_INDICATOR_ENV_VAR) {
        config.wrap_indicator = indicator;
    }

    if let Ok(path) = std::env::var(LOG_FILE_ENV_VAR) {
        config.log_file_path = PathBuf::from(path);
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Boolean flags only ever turn their behaviour
/// on (`--no_wrap` disables wrapping, `--name` shows the host), so an absent flag leaves
/// the config untouched.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    no_wrap: bool,
    show_host: bool,
    search: Vec<String>,
) -> ResolvedConfig {
    if no_wrap {
        config.line_wrap = false;
    }

    if show_host {
        config.show_host = true;
    }

    if !search.is_empty() {
        config.search = search;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
