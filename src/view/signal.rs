//! SIGINT and SIGTERM delivered by `kill` rather than typed on the terminal.
//!
//! The handler only sets a flag. [`CtrlC`](super::CtrlC) checks it between event polls,
//! so the follow loop ends through its normal path and the terminal guard restores the
//! screen.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

static RECEIVED: AtomicBool = AtomicBool::new(false);

/// Route SIGINT and SIGTERM to the interrupt flag.
///
/// # Errors
///
/// The OS error if a handler cannot be installed.
#[cfg(unix)]
pub fn install() -> io::Result<()> {
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

    extern "C" fn record(_: std::ffi::c_int) {
        RECEIVED.store(true, Ordering::SeqCst);
    }

    let action = SigAction::new(
        SigHandler::Handler(record),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    for signal in [Signal::SIGINT, Signal::SIGTERM] {
        // SAFETY: `record` only stores to an atomic, which is async-signal-safe.
        unsafe { sigaction(signal, &action) }.map_err(io::Error::from)?;
    }
    Ok(())
}

/// Signals are not routed on this platform; Ctrl+C still arrives as a key event.
///
/// # Errors
///
/// Never fails.
#[cfg(not(unix))]
pub fn install() -> io::Result<()> {
    Ok(())
}

/// Whether a termination signal has arrived since the handlers were installed.
pub fn received() -> bool {
    RECEIVED.load(Ordering::SeqCst)
}

#[cfg(all(test, unix))]
fn reset() {
    RECEIVED.store(false, Ordering::SeqCst);
}
