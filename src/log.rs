//! Buffered reading log with periodic flush to disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PersistError;
use crate::status::Reading;

/// In-memory buffer of readings, flushed to a JSON file.
///
/// Readings accumulate in arrival order for the lifetime of a run. Every
/// `batch_size` appends the whole buffer is rewritten to the log file;
/// flushing does not clear the buffer, so each flush persists the full
/// history so far. A failed flush keeps the buffer intact and the next
/// flush retries the whole write.
#[derive(Debug)]
pub struct ReadingLog {
    path: PathBuf,
    buffer: Vec<Reading>,
    batch_size: usize,
}

impl ReadingLog {
    /// Create a log that writes to `path`, flushing every `batch_size`
    /// readings. A batch size of zero disables automatic flushes.
    pub fn new(path: impl Into<PathBuf>, batch_size: usize) -> Self {
        Self {
            path: path.into(),
            buffer: Vec::new(),
            batch_size,
        }
    }

    /// Append a reading, flushing if the buffer has reached a batch
    /// boundary.
    pub fn append(&mut self, reading: Reading) -> Result<(), PersistError> {
        self.buffer.push(reading);
        if self.batch_size > 0 && self.buffer.len() % self.batch_size == 0 {
            self.flush()?;
        }
        Ok(())
    }

    /// Write the entire buffer to the log file, replacing any prior
    /// contents.
    pub fn flush(&self) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(&self.buffer)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Number of buffered readings.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether no readings have been appended yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
