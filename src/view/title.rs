//! Title bar text.

use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Host name used when no lookup succeeds.
pub const FALLBACK_HOST: &str = "localhost";

/// Title for the followed file, with the host name appended when given.
pub fn compose_title(file: &Path, host: Option<&str>) -> String {
    match host {
        Some(host) => format!("{} @ {}", file.display(), host),
        None => file.display().to_string(),
    }
}

/// Resolve this machine's host name.
///
/// # Resolution Order
///
/// 1. `HOSTNAME` environment variable
/// 2. `/etc/hostname`
/// 3. `hostname` command
/// 4. [`FALLBACK_HOST`]
pub fn host_name() -> String {
    if let Some(host) = std::env::var("HOSTNAME").ok().and_then(non_empty) {
        debug!("Using host name from HOSTNAME");
        return host;
    }

    if let Some(host) = std::fs::read_to_string("/etc/hostname")
        .ok()
        .and_then(non_empty)
    {
        debug!("Using host name from /etc/hostname");
        return host;
    }

    if let Ok(output) = Command::new("hostname").output() {
        if output.status.success() {
            if let Some(host) = String::from_utf8(output.stdout).ok().and_then(non_empty) {
                debug!("Using host name from hostname command");
                return host;
            }
        }
    }

    FALLBACK_HOST.to_string()
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
