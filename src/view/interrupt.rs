//! Interrupt delivery for the follow loop.
//!
//! With the terminal in raw mode, Ctrl+C typed on the terminal arrives as a key event
//! rather than SIGINT, so it is read from the crossterm event queue. SIGINT or SIGTERM
//! sent by another process sets a flag that is checked between polls. The follow loop
//! waits on the interrupt instead of sleeping, so the retry delay and the cancellation
//! check are one suspension point.

use super::signal;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::{Duration, Instant};

/// Longest single event poll, bounding how late a signal is noticed.
pub const SIGNAL_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Source of the cancellation notice that ends a session.
pub trait Interrupt {
    /// Block for up to `timeout` waiting for an interrupt.
    ///
    /// Returns `Ok(true)` as soon as one arrives, `Ok(false)` once the timeout elapses.
    /// A zero timeout checks without blocking.
    fn wait(&mut self, timeout: Duration) -> io::Result<bool>;
}

impl<F> Interrupt for F
where
    F: FnMut(Duration) -> io::Result<bool>,
{
    fn wait(&mut self, timeout: Duration) -> io::Result<bool> {
        self(timeout)
    }
}

/// Ctrl+C on the controlling terminal, or SIGINT/SIGTERM from elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct CtrlC;

impl Interrupt for CtrlC {
    fn wait(&mut self, timeout: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if signal::received() {
                return Ok(true);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            match event::poll(remaining.min(SIGNAL_CHECK_INTERVAL)) {
                Ok(true) => {}
                Ok(false) if remaining <= SIGNAL_CHECK_INTERVAL => {
                    return Ok(signal::received());
                }
                Ok(false) => continue,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
            // Resize and other keys are consumed and ignored: dimensions are fixed.
            if let Event::Key(key) = event::read()? {
                if is_interrupt_key(&key) {
                    return Ok(true);
                }
            }
        }
    }
}

/// Whether `key` is a Ctrl+C press.
pub fn is_interrupt_key(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && key.code == KeyCode::Char('c')
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
