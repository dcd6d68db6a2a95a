//! Text emphasis attributes and the attribute mask.
//!
//! The mask is a `ratatui` [`Modifier`], which is already a bitflag set, so combining
//! attributes is a plain bitwise OR.

use ratatui::style::Modifier;
use std::fmt;
use std::str::FromStr;

/// Separator between attribute names in the `text_attribute` config value.
pub const ATTRIBUTE_SEPARATOR: char = ':';

/// Attributes used for the title row, independent of the highlight mask.
pub const TITLE_ATTRIBUTES: Modifier = Modifier::UNDERLINED.union(Modifier::BOLD);

/// Attribute mask used for highlighted segments when the config does not set one.
pub const DEFAULT_HIGHLIGHT_ATTRIBUTES: Modifier = Modifier::REVERSED;

/// A single emphasis flag that can appear in the `text_attribute` config value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAttribute {
    /// `bold`
    Bold,
    /// `reverse`
    Reverse,
    /// `underline`
    Underline,
}

impl TextAttribute {
    /// The ratatui modifier bit for this attribute.
    pub fn modifier(self) -> Modifier {
        match self {
            TextAttribute::Bold => Modifier::BOLD,
            TextAttribute::Reverse => Modifier::REVERSED,
            TextAttribute::Underline => Modifier::UNDERLINED,
        }
    }
}

impl fmt::Display for TextAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextAttribute::Bold => "bold",
            TextAttribute::Reverse => "reverse",
            TextAttribute::Underline => "underline",
        };
        f.write_str(name)
    }
}

/// Attribute name that is not one of `bold`, `reverse`, `underline`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAttribute(pub String);

impl FromStr for TextAttribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bold" => Ok(TextAttribute::Bold),
            "reverse" => Ok(TextAttribute::Reverse),
            "underline" => Ok(TextAttribute::Underline),
            other => Err(UnknownAttribute(other.to_string())),
        }
    }
}

/// Result of parsing a colon-separated attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeList {
    /// OR of every recognised attribute.
    pub mask: Modifier,
    /// Tokens that were not recognised, in order of appearance.
    pub unknown: Vec<String>,
}

impl Default for AttributeList {
    fn default() -> Self {
        Self {
            mask: Modifier::empty(),
            unknown: Vec::new(),
        }
    }
}

/// Parse a `text_attribute` value such as `bold:underline`.
///
/// Empty tokens (e.g. from a trailing `:`) are skipped silently; unknown tokens are
/// collected so the caller can warn about them.
pub fn parse_attribute_list(value: &str) -> AttributeList {
    value
        .split(ATTRIBUTE_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .fold(AttributeList::default(), |mut list, token| {
            match token.parse::<TextAttribute>() {
                Ok(attribute) => list.mask |= attribute.modifier(),
                Err(UnknownAttribute(name)) => list.unknown.push(name),
            }
            list
        })
}
