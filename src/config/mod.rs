//! Configuration module.
//!
//! Settings resolve in layers: built-in defaults, then the config file, then
//! environment variables, then command-line flags.

pub mod loader;
pub mod prompt;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, log_warnings, merge_config, parse_config,
    ConfigError, ConfigFile, ConfigOutcome, ConfigWarning, ParsedConfig, ResolvedConfig,
};
pub use prompt::{confirm_warnings, is_abort_answer, PromptDecision, ABORT_ANSWERS};
