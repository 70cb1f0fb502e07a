//! Command runner port.

use async_trait::async_trait;
use rfinstall_core::LogSinkPort;
use thiserror::Error;

use super::CommandLine;

/// Errors that prevent a command from running to completion.
///
/// A command that runs and exits non-zero is not an error; see
/// [`CommandRunnerPort::run`].
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed while reading output of `{command}`: {source}")]
    Output {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Port for executing one command and mirroring its output.
#[async_trait]
pub trait CommandRunnerPort: Send + Sync {
    /// Echo the command line to `sink`, run it, forward every output line
    /// to `sink` as it is produced, and wait for exit.
    ///
    /// Returns `Ok(true)` iff the exit code is 0. A non-zero exit is logged
    /// and reported as `Ok(false)`; the caller decides whether that fails
    /// the build.
    async fn run(&self, command: &CommandLine, sink: &dyn LogSinkPort)
    -> Result<bool, RunnerError>;
}
