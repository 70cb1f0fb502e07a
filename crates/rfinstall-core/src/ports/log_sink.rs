//! Build log sink port.
//!
//! This port abstracts the destination for build output lines, allowing
//! different implementations for the CLI (stdout), embedding hosts, and tests.

use std::sync::{Mutex, PoisonError};

/// Port for appending lines to a build log.
///
/// Implementations must be thread-safe. Lines arrive without a trailing
/// newline and in the order they were produced.
pub trait LogSinkPort: Send + Sync {
    /// Append one line to the log.
    fn append(&self, line: String);
}

/// A sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogSink;

impl LogSinkPort for NoopLogSink {
    fn append(&self, _line: String) {}
}

/// A sink that keeps every line in memory.
#[derive(Debug, Default)]
pub struct BufferedLogSink {
    lines: Mutex<Vec<String>>,
}

impl BufferedLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all lines received so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether any received line equals `line` exactly.
    pub fn contains_line(&self, line: &str) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|l| l == line)
    }
}

impl LogSinkPort for BufferedLogSink {
    fn append(&self, line: String) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }
}
