//! namedtail - Entry Point

use clap::{ArgAction, Parser};
use namedtail::config::{self, PromptDecision};
use namedtail::model::AppError;
use namedtail::view::{self, SessionOptions};
use std::io;
use std::path::PathBuf;
use tracing::info;

/// namedtail - follow a growing file under a fixed title row
#[derive(Parser, Debug)]
#[command(name = "namedtail")]
#[command(version)]
#[command(about = "Follow a text file like tail -f, with a title row, line wrapping and highlights")]
pub struct Args {
    /// File to follow
    pub file: PathBuf,

    /// Append this machine's host name to the title
    #[arg(short = 'n', long = "name")]
    pub name: bool,

    /// Truncate long lines instead of wrapping them
    #[arg(short = 'w', long = "no_wrap")]
    pub no_wrap: bool,

    /// Path to configuration file
    #[arg(short = 'c', long = "config_file")]
    pub config_file: Option<PathBuf>,

    /// Highlight lines containing any of these terms
    #[arg(short = 's', long = "search", num_args = 0.., action = ArgAction::Append)]
    pub search: Vec<String>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let outcome = {
        let config_file = config::load_config_with_precedence(args.config_file.clone())?;
        config::merge_config(config_file)
    };

    // Config warnings are reported once, before the terminal is taken over
    if !outcome.is_clean() {
        let stdin = io::stdin();
        let decision =
            config::confirm_warnings(&outcome.warnings, &mut stdin.lock(), &mut io::stderr())?;
        if decision == PromptDecision::Abort {
            return Ok(());
        }
    }

    let config = config::apply_env_overrides(outcome.config);
    let config = config::apply_cli_overrides(config, args.no_wrap, args.name, args.search);

    namedtail::logging::init(&config.log_file_path)?;
    config::log_warnings(&outcome.warnings);

    info!(
        config = ?config,
        file = %args.file.display(),
        "Configuration loaded and resolved"
    );

    let host = config.show_host.then(view::host_name);
    let options = SessionOptions {
        line_wrap: config.line_wrap,
        wrap_indicator: config.wrap_indicator,
        search: config.search,
        highlight: config.highlight,
        ..SessionOptions::new(view::compose_title(&args.file, host.as_deref()))
    };

    view::run_session(&args.file, options)?;

    info!("Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        // Help returns Err with DisplayHelp, which is success
        let result = Args::try_parse_from(["namedtail", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["namedtail", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_file_is_required() {
        let result = Args::try_parse_from(["namedtail"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_file_only_defaults() {
        let args = Args::parse_from(["namedtail", "app.log"]);
        assert_eq!(args.file, PathBuf::from("app.log"));
        assert!(!args.name);
        assert!(!args.no_wrap);
        assert_eq!(args.config_file, None);
        assert!(args.search.is_empty());
    }

    #[test]
    fn test_name_flag_short() {
        let args = Args::parse_from(["namedtail", "-n", "app.log"]);
        assert!(args.name);
    }

    #[test]
    fn test_name_flag_long() {
        let args = Args::parse_from(["namedtail", "--name", "app.log"]);
        assert!(args.name);
    }

    #[test]
    fn test_no_wrap_flag_short() {
        let args = Args::parse_from(["namedtail", "-w", "app.log"]);
        assert!(args.no_wrap);
    }

    #[test]
    fn test_no_wrap_flag_long_uses_underscore() {
        let args = Args::parse_from(["namedtail", "--no_wrap", "app.log"]);
        assert!(args.no_wrap);

        let result = Args::try_parse_from(["namedtail", "--no-wrap", "app.log"]);
        assert!(result.is_err(), "--no-wrap is not an accepted spelling");
    }

    #[test]
    fn test_config_file_short() {
        let args = Args::parse_from(["namedtail", "-c", "/tmp/nt.conf", "app.log"]);
        assert_eq!(args.config_file, Some(PathBuf::from("/tmp/nt.conf")));
    }

    #[test]
    fn test_config_file_long() {
        let args = Args::parse_from(["namedtail", "--config_file", "/tmp/nt.conf", "app.log"]);
        assert_eq!(args.config_file, Some(PathBuf::from("/tmp/nt.conf")));
    }

    #[test]
    fn test_search_single_term() {
        let args = Args::parse_from(["namedtail", "app.log", "-s", "ERROR"]);
        assert_eq!(args.search, vec!["ERROR"]);
    }

    #[test]
    fn test_search_multiple_values_per_occurrence() {
        let args = Args::parse_from(["namedtail", "app.log", "--search", "ERROR", "WARN"]);
        assert_eq!(args.search, vec!["ERROR", "WARN"]);
    }

    #[test]
    fn test_search_is_repeatable() {
        let args = Args::parse_from(["namedtail", "-s", "ERROR", "-s", "WARN", "--", "app.log"]);
        assert_eq!(args.search, vec!["ERROR", "WARN"]);
        assert_eq!(args.file, PathBuf::from("app.log"));
    }

    #[test]
    fn test_bare_search_flag_gives_empty_set() {
        let args = Args::parse_from(["namedtail", "app.log", "-s"]);
        assert_eq!(args.file, PathBuf::from("app.log"));
        assert!(args.search.is_empty());

        let args = Args::parse_from(["namedtail", "--search", "--", "app.log"]);
        assert_eq!(args.file, PathBuf::from("app.log"));
        assert!(args.search.is_empty());
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from(["namedtail", "-nw", "-c", "cfg", "app.log", "-s", "x"]);
        assert!(args.name);
        assert!(args.no_wrap);
        assert_eq!(args.config_file, Some(PathBuf::from("cfg")));
        assert_eq!(args.search, vec!["x"]);
    }
}
