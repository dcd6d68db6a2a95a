//! namedtail
//!
//! Follows a growing text file in a full-screen terminal view, like `tail -f` with a
//! fixed title row, soft-wrapped long lines and highlighting of lines that contain a
//! search term.
//!
//! The pure parts (line wrapping, highlighting, config parsing) live in
//! [`view_state`], [`model`] and [`config`]; the terminal and the file are only
//! touched by [`view`] and [`source`].

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod view;
pub mod view_state;
