//! Line wrapping into viewport-sized display segments.
//!
//! Widths are measured in terminal cells with `unicode-width`, so wide glyphs take two
//! columns and combining marks take none. For ASCII input a cell is a character.
//!
//! A line of `L` cells in a viewport `W` wide with an indicator `I` wide becomes:
//! - a head segment with the first `W` cells, then
//! - continuation segments of `W - I` cells each, drawn behind the indicator.

use crate::model::{DisplaySegment, WrapError};
use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Tab stops every this many columns when expanding `\t`.
pub const TAB_WIDTH: usize = 8;

/// Cells a continuation row must offer: the widest terminal glyph.
pub const MIN_CONTINUATION_WIDTH: usize = 2;

/// Default indicator drawn at the start of continuation rows.
pub const DEFAULT_WRAP_INDICATOR: &str = "> ";

/// Expand tabs to spaces and drop other control characters.
///
/// The renderer places text cell by cell, so a raw `\t` or escape byte would either be
/// dropped or corrupt the row. Returns the input unchanged when it is already clean.
pub fn sanitize(line: &str) -> Cow<'_, str> {
    if !line.chars().any(char::is_control) {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else if !ch.is_control() {
            out.push(ch);
            column += ch.width().unwrap_or(0);
        }
    }
    Cow::Owned(out)
}

/// Split `text` after at most `max_width` cells.
///
/// Always takes at least one character from non-empty input so repeated splitting makes
/// progress even when a single glyph is wider than `max_width`.
pub fn split_at_width(text: &str, max_width: usize) -> (&str, &str) {
    let mut used = 0;
    for (index, ch) in text.char_indices() {
        let width = ch.width().unwrap_or(0);
        if used + width > max_width && index > 0 {
            return text.split_at(index);
        }
        used += width;
    }
    (text, "")
}

/// Validated wrap settings for one viewport width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineWrapper {
    width: usize,
    indicator: String,
    indicator_width: usize,
}

impl LineWrapper {
    /// Build a wrapper for a viewport `width` cells wide.
    ///
    /// # Errors
    ///
    /// `WrapError::ZeroWidth` if `width` is 0, `WrapError::IndicatorTooWide` if the
    /// indicator leaves fewer than [`MIN_CONTINUATION_WIDTH`] cells on continuation rows.
    pub fn new(width: usize, indicator: impl Into<String>) -> Result<Self, WrapError> {
        let indicator = indicator.into();
        let indicator_width = indicator.width();

        if width == 0 {
            return Err(WrapError::ZeroWidth);
        }
        if indicator_width + MIN_CONTINUATION_WIDTH > width {
            return Err(WrapError::IndicatorTooWide {
                indicator_width,
                width,
            });
        }

        Ok(Self {
            width,
            indicator,
            indicator_width,
        })
    }

    /// Viewport width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Prefix drawn on continuation rows.
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// Cells available for content on a continuation row.
    pub fn continuation_width(&self) -> usize {
        self.width - self.indicator_width
    }

    /// Segments for one logical line: the head first, then continuations in order.
    pub fn segments<'a>(&'a self, line: &'a str) -> Segments<'a> {
        Segments {
            wrapper: self,
            rest: line,
            started: false,
        }
    }
}

/// Iterator over the display segments of one line. Created by [`LineWrapper::segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    wrapper: &'a LineWrapper,
    rest: &'a str,
    started: bool,
}

impl<'a> Iterator for Segments<'a> {
    type Item = DisplaySegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let width = self.wrapper.width;

        if !self.started {
            self.started = true;
            let (head, rest) = split_at_width(self.rest, width);
            self.rest = rest;
            return Some(DisplaySegment::head(head, width));
        }

        if self.rest.is_empty() {
            return None;
        }

        let (chunk, rest) = split_at_width(self.rest, self.wrapper.continuation_width());
        self.rest = rest;
        Some(DisplaySegment::continuation(
            &self.wrapper.indicator,
            chunk,
            width,
        ))
    }
}

/// How logical lines map onto screen rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineLayout {
    /// Long lines continue on following rows behind an indicator.
    Wrap(LineWrapper),
    /// Long lines are cut at the viewport edge.
    Truncate {
        /// Viewport width in cells.
        width: usize,
    },
}

impl LineLayout {
    /// Pick a layout for a viewport `width` cells wide.
    ///
    /// # Errors
    ///
    /// Propagates [`LineWrapper::new`] validation when wrapping is enabled.
    pub fn new(width: usize, wrap: bool, indicator: &str) -> Result<Self, WrapError> {
        if wrap {
            Ok(LineLayout::Wrap(LineWrapper::new(width, indicator)?))
        } else {
            Ok(LineLayout::Truncate { width })
        }
    }

    /// Segments for `line` under this layout.
    pub fn segments<'a>(&'a self, line: &'a str) -> Vec<DisplaySegment<'a>> {
        match self {
            LineLayout::Wrap(wrapper) => wrapper.segments(line).collect(),
            LineLayout::Truncate { width } => {
                let (visible, _) = split_at_width(line, *width);
                vec![DisplaySegment::head(visible, *width)]
            }
        }
    }
}
