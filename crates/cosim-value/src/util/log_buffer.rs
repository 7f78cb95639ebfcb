//! Buffered, append-only log file.
//!
//! Lines are kept in memory and written out on [`LogBuffer::flush`]. The file
//! is opened in append mode for every flush, so several buffers (or runs) can
//! share one file.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::LogBufferError;

/// Collects log lines and appends them to a file on flush.
#[derive(Debug)]
pub struct LogBuffer {
    path: PathBuf,
    lines: Vec<String>,
}

impl LogBuffer {
    /// Creates an empty buffer for `path`. The file is not touched until the
    /// first flush.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Buffers one line. The text should not contain its own newline.
    pub fn append_line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Number of buffered lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends every non-empty buffered line to the file, each followed by
    /// `\n`, and clears the buffer.
    ///
    /// Lines are dropped from the buffer as soon as they are written. A failed
    /// flush keeps the line being written and everything after it.
    pub fn flush(&mut self) -> Result<(), LogBufferError> {
        if self.lines.is_empty() {
            return Ok(());
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LogBufferError::Open {
                path: self.path.clone(),
                source,
            })?;

        let count = self.lines.len();
        write_lines(&mut self.lines, file).map_err(|source| LogBufferError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path().display(), lines = count, "flushed log buffer");
        Ok(())
    }

    /// Flushes and consumes the buffer.
    pub fn close(mut self) -> Result<(), LogBufferError> {
        self.flush()
    }
}

/// Writes each non-empty line with its newline in one call, removing lines
/// from `lines` once they are written.
fn write_lines<W: Write>(lines: &mut Vec<String>, mut out: W) -> io::Result<()> {
    let mut written = 0;
    let mut record = Vec::new();
    let result: io::Result<()> = lines.iter().try_for_each(|line| {
        if !line.is_empty() {
            record.clear();
            record.extend_from_slice(line.as_bytes());
            record.push(b'\n');
            out.write_all(&record)?;
        }
        written += 1;
        Ok(())
    });
    lines.drain(..written);
    result?;
    out.flush()
}

impl Drop for LogBuffer {
    fn drop(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        if let Err(err) = self.flush() {
            warn!(
                error = %err,
                lines = self.lines.len(),
                "dropping log buffer with unwritten lines"
            );
        }
    }
}
