//! View-state layer - pure line processing between the follower and the renderer.
//!
//! # Module Structure
//!
//! - `wrap`: LineWrapper / LineLayout - splits logical lines into display segments
//! - `highlighter`: Highlighter - decides which segments get the attribute mask

pub mod highlighter;
pub mod wrap;

pub use highlighter::Highlighter;
pub use wrap::{
    sanitize, split_at_width, LineLayout, LineWrapper, Segments, DEFAULT_WRAP_INDICATOR,
    MIN_CONTINUATION_WIDTH, TAB_WIDTH,
};
