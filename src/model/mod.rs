//! Domain model types (pure).
//!
//! All types in this module are plain data with no terminal or file access.

pub mod attribute;
pub mod error;
pub mod segment;

// Re-export for convenience
pub use attribute::{
    parse_attribute_list, AttributeList, TextAttribute, DEFAULT_HIGHLIGHT_ATTRIBUTES,
    TITLE_ATTRIBUTES,
};
pub use error::{AppError, InputError, WrapError};
pub use segment::DisplaySegment;
