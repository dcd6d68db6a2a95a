//! Error types for namedtail.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions up to [`AppError`], which `main` reports before exiting.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from the binary's startup and session code
//!   - [`InputError`] - Failures opening or reading the followed file
//!   - [`WrapError`] - Wrap indicator that cannot fit the viewport
//!   - [`ConfigError`](crate::config::ConfigError) - Config file that exists but cannot be read
//!   - [`TuiError`](crate::view::TuiError) - Terminal acquisition and drawing failures
//!
//! # Recovery Strategy
//!
//! Configuration *warnings* (unknown keys, unknown attributes) are not errors; they are
//! collected into a [`ConfigOutcome`](crate::config::ConfigOutcome) and resolved by a single
//! prompt. Everything in this module is fatal: it propagates to `main` after the terminal
//! guard has restored the terminal.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// # Examples
///
/// ```no_run
/// use namedtail::model::error::{AppError, InputError};
///
/// fn start() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     open_followed_file()?;
///     Ok(())
/// }
/// # fn open_followed_file() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// The config file exists but could not be read.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The followed file could not be opened or read.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Terminal session failure (acquisition, drawing, teardown).
    #[error("{0}")]
    Tui(#[from] crate::view::TuiError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Raw I/O failure outside of the terminal session (e.g. the config prompt).
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered while opening or tailing the followed file.
///
/// Truncation of the file is *not* an error: the follower keeps its stale offset and
/// stalls until the file grows past it again.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file to follow does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use namedtail::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/var/log/missing.log"),
    /// };
    /// assert!(err.to_string().contains("/var/log/missing.log"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path as given on the command line.
        path: PathBuf,
    },

    /// Any other I/O failure: permission denied, the file vanishing mid-read, disk errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wrap settings that cannot be honoured for the current viewport.
///
/// Checked once at startup. Continuation chunks are `width - indicator_width` cells wide,
/// and that difference must hold the widest glyph (two cells) so nothing is cut off.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WrapError {
    /// The viewport has no columns to wrap into.
    #[error("Cannot wrap lines into a zero-width viewport")]
    ZeroWidth,

    /// The wrap indicator leaves fewer than two cells for content on continuation rows.
    #[error(
        "Wrap indicator is {indicator_width} columns wide but the viewport is only {width} columns; continuation rows need at least 2 columns of text"
    )]
    IndicatorTooWide {
        /// Display width of the configured indicator.
        indicator_width: usize,
        /// Viewport width.
        width: usize,
    },
}
