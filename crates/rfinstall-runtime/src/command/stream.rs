//! Line forwarding for process output (non-UTF8-safe).
//!
//! Installer scripts and the tools they call can emit non-UTF8 bytes.
//! `BufReader::lines()` would stop at the first invalid sequence, so lines
//! are read as bytes and decoded lossily.

use rfinstall_core::LogSinkPort;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::debug;

/// Read `stream` to EOF, appending each line to `sink` as soon as it is
/// complete. Returns the number of lines forwarded.
pub async fn forward_lines(
    stream: impl AsyncRead + Unpin,
    sink: &dyn LogSinkPort,
) -> std::io::Result<usize> {
    let mut reader = BufReader::new(stream);
    let mut buf: Vec<u8> = Vec::with_capacity(1024);
    let mut forwarded = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break; // EOF
        }

        // Trim trailing newline(s)
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let line = String::from_utf8_lossy(&buf).into_owned();
        debug!(target: "rfinstall::output", "{line}");
        sink.append(line);
        forwarded += 1;
    }

    Ok(forwarded)
}
