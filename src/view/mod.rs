//! Terminal session: rendering engine and its lifecycle (impure shell)
//!
//! [`TailSession`] drives the state machine
//!
//! ```text
//! Init ──prime──▶ Primed ──follow──▶ Following ──interrupt──▶ Terminated
//! ```
//!
//! feeding follower output through the wrapper and highlighter into the [`Viewport`].
//! [`run_session`] wires it to the real terminal behind a [`TerminalGuard`].

mod interrupt;
pub mod renderer;
mod signal;
pub mod title;

pub use interrupt::{is_interrupt_key, CtrlC, Interrupt, SIGNAL_CHECK_INTERVAL};
pub use renderer::{Viewport, FIRST_CONTENT_ROW, MIN_HEIGHT, MIN_WIDTH, TITLE_ROW};
pub use title::{compose_title, host_name};

use crate::model::{InputError, WrapError, DEFAULT_HIGHLIGHT_ATTRIBUTES};
use crate::source::{Follower, RETRY_INTERVAL};
use crate::view_state::{sanitize, Highlighter, LineLayout, DEFAULT_WRAP_INDICATOR};
use crossterm::{
    cursor::Show,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::Backend, backend::CrosstermBackend, style::Modifier, Terminal};
use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Followed file could not be read
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Wrap indicator does not fit the terminal
    #[error("Invalid wrap configuration: {0}")]
    Wrap(#[from] WrapError),

    /// Terminal has no room for a content row
    #[error("Terminal is too small ({width}x{height}); need at least 2 columns and 3 rows")]
    TerminalTooSmall {
        /// Columns available.
        width: u16,
        /// Rows available.
        height: u16,
    },
}

/// Lifecycle of a [`TailSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Terminal acquired, nothing drawn yet.
    Init,
    /// Title and initial tail painted.
    Primed,
    /// Live-following appended lines.
    Following,
    /// Screen cleared after an interrupt.
    Terminated,
}

/// When the renderer flushes to the terminal while painting a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshPolicy {
    /// Once per logical line (initial paint favours throughput).
    PerLine,
    /// After every fragment (live tail favours latency).
    PerSegment,
}

/// Everything a session needs besides the terminal and the file.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    /// Text of the title row.
    pub title: String,
    /// Wrap long lines instead of truncating them.
    pub line_wrap: bool,
    /// Prefix for continuation rows.
    pub wrap_indicator: String,
    /// Search Set for highlighting.
    pub search: Vec<String>,
    /// Attribute mask for highlighted segments.
    pub highlight: Modifier,
    /// Delay between reads when the file has no new complete line.
    pub retry_interval: Duration,
}

impl SessionOptions {
    /// Defaults for everything but the title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            line_wrap: true,
            wrap_indicator: DEFAULT_WRAP_INDICATOR.to_string(),
            search: Vec::new(),
            highlight: DEFAULT_HIGHLIGHT_ATTRIBUTES,
            retry_interval: RETRY_INTERVAL,
        }
    }
}

/// The rendering engine for one followed file.
///
/// Generic over backend to support testing with TestBackend
pub struct TailSession<B>
where
    B: Backend,
{
    viewport: Viewport<B>,
    layout: LineLayout,
    highlighter: Highlighter,
    title: String,
    retry_interval: Duration,
    state: SessionState,
    lines_rendered: u64,
}

impl<B> TailSession<B>
where
    B: Backend,
{
    /// Read the terminal dimensions and validate the layout against them.
    ///
    /// # Errors
    ///
    /// `TuiError::TerminalTooSmall` for terminals without a content row,
    /// `TuiError::Wrap` if the wrap indicator does not fit the width.
    pub fn new(terminal: Terminal<B>, options: SessionOptions) -> Result<Self, TuiError> {
        let viewport = Viewport::new(terminal)?;
        let layout = LineLayout::new(
            usize::from(viewport.width()),
            options.line_wrap,
            &options.wrap_indicator,
        )?;
        let highlighter = Highlighter::new(options.search, options.highlight);

        info!(
            width = viewport.width(),
            height = viewport.height(),
            wrap = options.line_wrap,
            search_terms = highlighter.terms().len(),
            "Session initialized"
        );

        Ok(Self {
            viewport,
            layout,
            highlighter,
            title: options.title,
            retry_interval: options.retry_interval,
            state: SessionState::Init,
            lines_rendered: 0,
        })
    }

    /// Where the session is in its lifecycle.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The screen model, for inspection.
    pub fn viewport(&self) -> &Viewport<B> {
        &self.viewport
    }

    /// Logical lines painted so far, priming included.
    pub fn lines_rendered(&self) -> u64 {
        self.lines_rendered
    }

    /// Draw the title and paint the last lines that fit.
    ///
    /// Reads every complete line currently in the file but keeps only the most recent
    /// `height - 2`; the follower is left just past the last line painted.
    ///
    /// # Errors
    ///
    /// `TuiError::Input` if the file cannot be read, `TuiError::Io` on draw failure.
    pub fn prime(&mut self, follower: &mut Follower) -> Result<(), TuiError> {
        debug_assert_eq!(self.state, SessionState::Init);

        self.viewport.write_title(&self.title);
        self.viewport.refresh()?;

        let capacity = usize::from(self.viewport.content_rows());
        let mut tail: VecDeque<String> = VecDeque::with_capacity(capacity);
        let mut skipped = 0usize;
        while let Some(line) = follower.next_line()? {
            if tail.len() == capacity {
                tail.pop_front();
                skipped += 1;
            }
            tail.push_back(line);
        }

        for line in &tail {
            self.render_line(line, RefreshPolicy::PerLine)?;
        }

        self.state = SessionState::Primed;
        info!(
            painted = tail.len(),
            skipped,
            position = follower.position(),
            "Initial tail painted"
        );
        Ok(())
    }

    /// Follow the file until `interrupt` fires, then tear down.
    ///
    /// The interrupt is waited on for one retry interval whenever the file has no new
    /// line, and polled without waiting after each line that is painted.
    ///
    /// # Errors
    ///
    /// Read and draw failures end the loop without teardown; the caller's
    /// [`TerminalGuard`] still restores the terminal.
    pub fn follow<I>(&mut self, follower: &mut Follower, interrupt: &mut I) -> Result<(), TuiError>
    where
        I: Interrupt,
    {
        debug_assert!(matches!(
            self.state,
            SessionState::Primed | SessionState::Following
        ));

        loop {
            let painted = self.poll_once(follower)?;
            let timeout = if painted {
                Duration::ZERO
            } else {
                self.retry_interval
            };
            if interrupt.wait(timeout)? {
                break;
            }
        }

        info!(lines = self.lines_rendered, "Interrupt received");
        self.teardown()
    }

    /// One step of the follow loop: paint the next appended line if there is one.
    ///
    /// Returns whether a line was painted. Each fragment is flushed as soon as it is
    /// written.
    ///
    /// # Errors
    ///
    /// `TuiError::Input` if the file cannot be read, `TuiError::Io` on draw failure.
    pub fn poll_once(&mut self, follower: &mut Follower) -> Result<bool, TuiError> {
        if self.state == SessionState::Primed {
            self.state = SessionState::Following;
            info!(path = %follower.path().display(), "Following");
        }

        match follower.next_line()? {
            Some(line) => {
                self.render_line(&line, RefreshPolicy::PerSegment)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Clear the screen and flush. Only the first call has any effect.
    ///
    /// # Errors
    ///
    /// `TuiError::Io` if the final flush fails.
    pub fn teardown(&mut self) -> Result<(), TuiError> {
        if self.state == SessionState::Terminated {
            return Ok(());
        }
        self.state = SessionState::Terminated;
        self.viewport.clear();
        self.viewport.refresh()
    }

    /// Wrap, highlight and place one logical line, scrolling as rows run out.
    fn render_line(&mut self, line: &str, policy: RefreshPolicy) -> Result<(), TuiError> {
        let line = sanitize(line);
        for segment in self.layout.segments(&line) {
            let style = self.highlighter.style_for(&segment);
            if self.viewport.needs_scroll() {
                self.viewport.scroll_up();
                debug!(scrolls = self.viewport.scroll_count(), "Scrolled viewport");
            }
            self.viewport.write_segment(&segment, style);
            self.viewport.advance();
            if policy == RefreshPolicy::PerSegment {
                self.viewport.refresh()?;
            }
        }
        if policy == RefreshPolicy::PerLine {
            self.viewport.refresh()?;
        }
        self.lines_rendered += 1;
        Ok(())
    }
}

/// Raw mode plus alternate screen, released exactly once.
///
/// Dropping the guard restores the terminal, so error paths that skip the explicit
/// [`release`](TerminalGuard::release) still leave the shell usable.
#[derive(Debug)]
pub struct TerminalGuard {
    released: bool,
}

impl TerminalGuard {
    /// Put the terminal into raw mode and switch to the alternate screen.
    ///
    /// # Errors
    ///
    /// `TuiError::Io` if the terminal cannot be configured; raw mode is undone first.
    pub fn acquire() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        if let Err(e) = io::stdout().execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        Ok(Self { released: false })
    }

    /// Restore the terminal now and report any failure.
    ///
    /// # Errors
    ///
    /// `TuiError::Io` if leaving raw mode or the alternate screen fails.
    pub fn release(mut self) -> Result<(), TuiError> {
        self.released = true;
        restore_terminal()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            if let Err(e) = restore_terminal() {
                warn!(error = %e, "Failed to restore terminal");
            }
        }
    }
}

/// Restore terminal to normal state
///
/// Disables raw mode, shows the cursor and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(Show)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Follow `path` on the controlling terminal until Ctrl+C or a termination signal.
///
/// The file is opened before the terminal is touched, so a bad path is reported on the
/// normal screen. The terminal is restored on every exit path, including a signal.
///
/// Note: Logging must be initialized by caller before calling this function.
///
/// # Errors
///
/// Any [`TuiError`]; an interrupt is not an error.
pub fn run_session(path: &Path, options: SessionOptions) -> Result<(), TuiError> {
    let mut follower = Follower::open(path)?;
    signal::install()?;

    let guard = TerminalGuard::acquire()?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut session = TailSession::new(terminal, options)?;

    session.prime(&mut follower)?;
    session.follow(&mut follower, &mut CtrlC)?;

    guard.release()
}
