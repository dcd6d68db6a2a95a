//! File follower: yields lines appended to a file, like `tail -f`.
//!
//! The follower polls instead of subscribing to filesystem notifications. An empty read
//! rewinds to the last complete line and the caller waits one retry interval before
//! trying again, so new data is seen at most one interval after it lands.
//!
//! Truncation and rotation are not detected. If the file shrinks, the recorded offset
//! points past the end and the follower yields nothing until the file grows past that
//! offset again.

use crate::model::error::InputError;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

/// Delay between attempts to read when no complete line is available.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the open file and the offset just past the last complete line returned.
#[derive(Debug)]
pub struct Follower {
    path: PathBuf,
    position: u64,
    reader: BufReader<File>,
    buffer: Vec<u8>,
}

impl Follower {
    /// Open `path` for following, positioned at the start of the file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        debug!(path = %path.display(), "Opened file for following");

        Ok(Self {
            path: path.to_path_buf(),
            position: 0,
            reader: BufReader::new(file),
            buffer: Vec::new(),
        })
    }

    /// Path the follower was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset just past the last complete line returned.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read the next complete line without blocking.
    ///
    /// Returns `Ok(None)` when the file has no complete line past the current position;
    /// a trailing partial line is left for a later call. The returned line has its `\n`
    /// (and a preceding `\r`) removed. Invalid UTF-8 is replaced, not rejected.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if seeking or reading fails.
    pub fn next_line(&mut self) -> Result<Option<String>, InputError> {
        let start = self.position;
        self.buffer.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;

        if bytes_read == 0 || self.buffer.last() != Some(&b'\n') {
            // Nothing new, or a partial line: rewind so it is re-read once complete.
            self.reader.seek(SeekFrom::Start(start))?;
            if bytes_read > 0 {
                trace!(bytes = bytes_read, "Partial line pending");
            }
            return Ok(None);
        }

        self.position = start + bytes_read as u64;

        let mut content = &self.buffer[..self.buffer.len() - 1];
        if let Some(stripped) = content.strip_suffix(b"\r") {
            content = stripped;
        }
        Ok(Some(String::from_utf8_lossy(content).into_owned()))
    }

    /// Read every complete line currently in the file past the current position.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if reading fails.
    pub fn drain(&mut self) -> Result<Vec<String>, InputError> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line()? {
            lines.push(line);
        }
        Ok(lines)
    }

    /// Turn the follower into an endless, blocking line iterator.
    ///
    /// Each call to `next` returns the next complete line, sleeping `retry_interval`
    /// between empty reads. The iterator only ends if the caller stops pulling from it.
    pub fn follow(self, retry_interval: Duration) -> FollowLines {
        FollowLines {
            follower: self,
            retry_interval,
        }
    }
}

/// Blocking iterator over lines appended to a followed file.
///
/// Created by [`Follower::follow`]. Never returns `None`; read errors are yielded as
/// `Some(Err(_))` and the caller decides whether to keep going.
#[derive(Debug)]
pub struct FollowLines {
    follower: Follower,
    retry_interval: Duration,
}

impl Iterator for FollowLines {
    type Item = Result<String, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.follower.next_line() {
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => thread::sleep(self.retry_interval),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
