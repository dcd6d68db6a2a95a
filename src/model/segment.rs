//! Display segments: the unit of work handed from the wrapper to the renderer.

/// A logical line, or one wrapped fragment of it, ready to be placed on a screen row.
///
/// Segments borrow from the line they were cut from and live for a single render call.
/// Every segment starts at column 0; `max_width` bounds the total cells drawn, indicator
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySegment<'a> {
    indicator: Option<&'a str>,
    text: &'a str,
    max_width: usize,
}

impl<'a> DisplaySegment<'a> {
    /// The first segment of a line: no indicator.
    pub fn head(text: &'a str, max_width: usize) -> Self {
        Self {
            indicator: None,
            text,
            max_width,
        }
    }

    /// A wrapped continuation, drawn behind the wrap indicator.
    pub fn continuation(indicator: &'a str, text: &'a str, max_width: usize) -> Self {
        Self {
            indicator: Some(indicator),
            text,
            max_width,
        }
    }

    /// Start column on the screen row.
    pub fn column(&self) -> u16 {
        0
    }

    /// Content of the segment, without the wrap indicator.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The wrap indicator, for continuation segments.
    pub fn indicator(&self) -> Option<&'a str> {
        self.indicator
    }

    /// True for every segment after the first.
    pub fn is_continuation(&self) -> bool {
        self.indicator.is_some()
    }

    /// Upper bound, in terminal cells, for what the renderer may draw.
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// Indicator and text as they appear on screen.
    pub fn to_display_string(&self) -> String {
        match self.indicator {
            Some(indicator) => format!("{}{}", indicator, self.text),
            None => self.text.to_string(),
        }
    }
}
