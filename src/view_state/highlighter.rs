//! Search-term highlighting for display segments.
//!
//! A segment is highlighted when any search term occurs in it as a case-sensitive
//! substring. The decision is per segment: a term split across a wrap boundary matches
//! neither fragment, and the wrap indicator itself is never searched.

use crate::model::{DisplaySegment, DEFAULT_HIGHLIGHT_ATTRIBUTES};
use ratatui::style::{Modifier, Style};
use tracing::warn;

/// Search Set plus the attribute mask applied to matching segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighter {
    terms: Vec<String>,
    mask: Modifier,
}

impl Highlighter {
    /// Build a highlighter from the search terms given at startup.
    ///
    /// Empty terms are dropped: every string contains the empty string, so keeping one
    /// would highlight the whole file.
    pub fn new(terms: impl IntoIterator<Item = String>, mask: Modifier) -> Self {
        let terms = terms
            .into_iter()
            .filter(|term| {
                if term.is_empty() {
                    warn!("Ignoring empty search term");
                }
                !term.is_empty()
            })
            .collect();
        Self { terms, mask }
    }

    /// Highlighter that never matches.
    pub fn disabled() -> Self {
        Self {
            terms: Vec::new(),
            mask: DEFAULT_HIGHLIGHT_ATTRIBUTES,
        }
    }

    /// Search terms, empty ones dropped.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Attributes applied to matching segments.
    pub fn mask(&self) -> Modifier {
        self.mask
    }

    /// Whether `text` contains any search term.
    pub fn is_highlighted(&self, text: &str) -> bool {
        self.terms.iter().any(|term| text.contains(term.as_str()))
    }

    /// Style for a segment: the attribute mask if it matches, plain otherwise.
    pub fn style_for(&self, segment: &DisplaySegment<'_>) -> Style {
        if self.is_highlighted(segment.text()) {
            Style::default().add_modifier(self.mask)
        } else {
            Style::default()
        }
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::disabled()
    }
}
