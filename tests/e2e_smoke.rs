//! E2E smoke tests for the namedtail binary
//!
//! These tests drive the compiled binary through a pseudo-terminal.
//! They are gated behind the `e2e-tests` feature flag.
//!
//! Run with: `cargo test --features e2e-tests`

#![cfg(feature = "e2e-tests")]

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use expectrl::{spawn, ControlCode, Eof, Regex};

/// Helper to find the namedtail binary in target directory
fn find_binary() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let debug_binary = manifest_dir.join("target/debug/namedtail");
    if debug_binary.exists() {
        return debug_binary;
    }

    let release_binary = manifest_dir.join("target/release/namedtail");
    if release_binary.exists() {
        return release_binary;
    }

    panic!("namedtail binary not found - run `cargo build` first");
}

fn fixture(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("namedtail_e2e_{}_{}", std::process::id(), name));
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

#[test]
fn smoke_help_flag() {
    let binary = find_binary();

    let mut session =
        spawn(format!("{} --help", binary.display())).expect("Failed to spawn namedtail");

    let _ = session
        .expect(Regex("Usage:"))
        .expect("Failed to find help output");
    let _ = session
        .expect(Regex("--no_wrap"))
        .expect("Help should list --no_wrap");

    let _ = session.expect(Eof).expect("Process should exit");
}

#[test]
fn smoke_follows_and_exits_on_ctrl_c() {
    let binary = find_binary();
    let log = fixture("follow.log", "first line\n");
    let missing_config = std::env::temp_dir().join("namedtail_e2e_no_such_config");

    let mut session = spawn(format!(
        "{} -c {} {}",
        binary.display(),
        missing_config.display(),
        log.display()
    ))
    .expect("Failed to spawn namedtail");

    let _ = session
        .expect(Regex("first line"))
        .expect("Initial tail should be painted");

    fs::write(&log, "first line\nsecond line\n").expect("Failed to append");
    let _ = session
        .expect(Regex("second line"))
        .expect("Appended line should be painted");

    let is_alive = session.is_alive().expect("Failed to check process status");
    assert!(is_alive, "Process should keep following");

    session
        .send(ControlCode::EndOfText)
        .expect("Failed to send Ctrl+C");

    let _ = session.expect(Eof).expect("Process should exit");
    let _ = fs::remove_file(log);
}

#[cfg(unix)]
#[test]
fn smoke_sigint_restores_terminal_and_exits() {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let binary = find_binary();
    let log = fixture("signal.log", "waiting for signal\n");
    let missing_config = std::env::temp_dir().join("namedtail_e2e_no_such_config");

    let mut session = spawn(format!(
        "{} -c {} {}",
        binary.display(),
        missing_config.display(),
        log.display()
    ))
    .expect("Failed to spawn namedtail");

    let _ = session
        .expect(Regex("waiting for signal"))
        .expect("Initial tail should be painted");

    let pid = Pid::from_raw(session.get_process().pid().as_raw());
    kill(pid, Signal::SIGINT).expect("Failed to send SIGINT");

    let _ = session
        .expect(Regex(r"\x1b\[\?1049l"))
        .expect("Alternate screen should be left on SIGINT");
    let _ = session.expect(Eof).expect("Process should exit");
    let _ = fs::remove_file(log);
}

#[test]
fn smoke_missing_file_fails_before_taking_terminal() {
    let binary = find_binary();
    let missing = std::env::temp_dir().join("namedtail_e2e_no_such_file.log");

    let mut session = spawn(format!("{} {}", binary.display(), missing.display()))
        .expect("Failed to spawn namedtail");

    let _ = session
        .expect(Regex("FileNotFound"))
        .expect("Missing file should be reported");
    let _ = session.expect(Eof).expect("Process should exit");
}

#[test]
fn smoke_config_warning_prompt_aborts_on_yes() {
    let binary = find_binary();
    let config = fixture("bogus.conf", "bogus=1\n");
    let log = fixture("prompt.log", "never shown\n");

    let mut session = spawn(format!(
        "{} -c {} {}",
        binary.display(),
        config.display(),
        log.display()
    ))
    .expect("Failed to spawn namedtail");

    let _ = session
        .expect(Regex(r"quit \[y/N\]\?"))
        .expect("Prompt should be shown");
    session.send_line("y").expect("Failed to answer prompt");

    std::thread::sleep(Duration::from_millis(200));
    let _ = session.expect(Eof).expect("Process should exit after abort");

    let _ = fs::remove_file(config);
    let _ = fs::remove_file(log);
}
