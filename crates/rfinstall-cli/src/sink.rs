//! Build log sink that writes to stdout.

use std::io::Write;

use rfinstall_core::LogSinkPort;

/// Writes each line to stdout and flushes, so CI consoles show output live.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutLogSink;

impl LogSinkPort for StdoutLogSink {
    fn append(&self, line: String) {
        let mut out = std::io::stdout().lock();
        // A closed stdout must not abort the installation.
        if writeln!(out, "{line}").and_then(|()| out.flush()).is_err() {
            tracing::debug!("stdout closed; dropping build log line");
        }
    }
}
