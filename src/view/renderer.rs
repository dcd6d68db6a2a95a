//! Viewport renderer: owns the visible screen and the write cursor.
//!
//! Drawing goes to an off-screen [`Buffer`] first, the way curses keeps a virtual screen.
//! `refresh` pushes that buffer through the ratatui [`Terminal`], which only emits the
//! cells that changed since the last flush.
//!
//! # Screen layout
//!
//! ```text
//! row 0             title (underline + bold)
//! row 1             first content row   ┐
//! ...                                   │ scroll region [1, height-1]
//! row height-2      last content row    │
//! row height-1      margin, kept blank  ┘
//! ```

use super::TuiError;
use crate::model::{DisplaySegment, TITLE_ATTRIBUTES};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
    Terminal,
};
use tracing::trace;

/// Row holding the title bar.
pub const TITLE_ROW: u16 = 0;

/// First row of the scroll region.
pub const FIRST_CONTENT_ROW: u16 = 1;

/// Smallest terminal that still has one content row between title and margin.
pub const MIN_HEIGHT: u16 = 3;

/// Smallest terminal width: the title is truncated to `width - 1`.
pub const MIN_WIDTH: u16 = 2;

/// The terminal's visible region plus the row cursor.
///
/// Generic over backend so tests can render into `TestBackend`.
pub struct Viewport<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    screen: Buffer,
    width: u16,
    height: u16,
    current_row: u16,
    rows_since_scroll: u16,
    scroll_count: u64,
}

impl<B> Viewport<B>
where
    B: Backend,
{
    /// Take ownership of the terminal and read its dimensions.
    ///
    /// Dimensions are fixed for the lifetime of the viewport.
    ///
    /// # Errors
    ///
    /// `TuiError::TerminalTooSmall` if there is no room for a content row,
    /// `TuiError::Io` if the size cannot be queried.
    pub fn new(terminal: Terminal<B>) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        if size.height < MIN_HEIGHT || size.width < MIN_WIDTH {
            return Err(TuiError::TerminalTooSmall {
                width: size.width,
                height: size.height,
            });
        }

        Ok(Self {
            terminal,
            screen: Buffer::empty(Rect::new(0, 0, size.width, size.height)),
            width: size.width,
            height: size.height,
            current_row: FIRST_CONTENT_ROW,
            rows_since_scroll: 0,
            scroll_count: 0,
        })
    }

    /// Columns, fixed at creation.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Rows, title and margin included.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Next row `write_segment` will draw on.
    pub fn current_row(&self) -> u16 {
        self.current_row
    }

    /// Last row content may be written to; the row below it is the margin.
    pub fn last_content_row(&self) -> u16 {
        self.height - 2
    }

    /// Number of content rows visible at once.
    pub fn content_rows(&self) -> u16 {
        self.height - 2
    }

    /// Rows written since the last scroll (or since the screen was cleared).
    pub fn rows_since_scroll(&self) -> u16 {
        self.rows_since_scroll
    }

    /// Times the content region has scrolled.
    pub fn scroll_count(&self) -> u64 {
        self.scroll_count
    }

    /// The off-screen buffer, as it will look after the next refresh.
    pub fn screen(&self) -> &Buffer {
        &self.screen
    }

    /// The backing terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Text of one screen row with trailing blanks removed.
    pub fn row_text(&self, row: u16) -> String {
        let mut line: String = (0..self.width)
            .filter_map(|x| self.screen.cell((x, row)))
            .map(|cell| cell.symbol())
            .collect();
        line.truncate(line.trim_end().len());
        line
    }

    /// Blank the whole screen and move the cursor back to the first content row.
    pub fn clear(&mut self) {
        self.screen.reset();
        self.current_row = FIRST_CONTENT_ROW;
        self.rows_since_scroll = 0;
    }

    /// Clear the screen and draw `text` on the title row.
    ///
    /// The title is cut to `width - 1` cells and always drawn underlined and bold,
    /// regardless of the highlight mask.
    pub fn write_title(&mut self, text: &str) {
        self.clear();
        self.screen.set_stringn(
            0,
            TITLE_ROW,
            text,
            usize::from(self.width - 1),
            Style::default().add_modifier(TITLE_ATTRIBUTES),
        );
    }

    /// Draw `segment` at the start of the current row.
    ///
    /// Does not move the cursor: the caller advances once the row is final.
    pub fn write_segment(&mut self, segment: &DisplaySegment<'_>, style: Style) {
        let max_width = segment.max_width().min(usize::from(self.width));
        trace!(row = self.current_row, text = segment.text(), "write segment");
        self.screen.set_stringn(
            segment.column(),
            self.current_row,
            segment.to_display_string(),
            max_width,
            style,
        );
    }

    /// Move the cursor to the next row.
    pub fn advance(&mut self) {
        debug_assert!(
            self.current_row <= self.last_content_row(),
            "advance past the margin row: {}",
            self.current_row
        );
        self.current_row += 1;
        self.rows_since_scroll += 1;
    }

    /// Whether the next write would land on the margin row.
    pub fn needs_scroll(&self) -> bool {
        self.current_row > self.last_content_row()
    }

    /// Shift the scroll region up one row.
    ///
    /// Row 1 is discarded, every row below moves up, and a blank row appears at
    /// `height - 1`. The title row is untouched. The cursor lands on the last content
    /// row.
    pub fn scroll_up(&mut self) {
        let row_len = usize::from(self.width);
        let top = usize::from(FIRST_CONTENT_ROW) * row_len;
        let bottom = usize::from(self.height) * row_len;

        let region = &mut self.screen.content[top..bottom];
        region.rotate_left(row_len);
        let len = region.len();
        region[len - row_len..].iter_mut().for_each(|cell| {
            cell.reset();
        });

        self.current_row = self.last_content_row();
        self.rows_since_scroll = 0;
        self.scroll_count += 1;
    }

    /// Flush the off-screen buffer to the terminal.
    ///
    /// # Errors
    ///
    /// `TuiError::Io` if drawing to the backend fails.
    pub fn refresh(&mut self) -> Result<(), TuiError> {
        let screen = &self.screen;
        self.terminal
            .draw(|frame| frame.render_widget(ScreenSnapshot(screen), frame.area()))?;
        Ok(())
    }
}

/// Copies the off-screen buffer into a ratatui frame.
struct ScreenSnapshot<'a>(&'a Buffer);

impl Widget for ScreenSnapshot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(self.0.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let (Some(src), Some(dst)) = (self.0.cell((x, y)), buf.cell_mut((x, y))) {
                    *dst = src.clone();
                }
            }
        }
    }
}
