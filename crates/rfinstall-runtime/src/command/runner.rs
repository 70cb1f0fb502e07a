//! Process-backed command runner.
//!
//! stdout and stderr of the child share one pipe, so the build log sees the
//! output interleaved exactly as the process wrote it. Draining happens
//! inline on the caller's task; no reader tasks are spawned.

use std::os::fd::OwnedFd;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use rfinstall_core::LogSinkPort;
use tokio::net::unix::pipe;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::port::{CommandRunnerPort, RunnerError};
use super::stream::forward_lines;
use super::CommandLine;

/// Runs commands as child processes of the current process.
#[derive(Debug, Clone, Default)]
pub struct ProcessCommandRunner {
    timeout: Option<Duration>,
}

impl ProcessCommandRunner {
    pub const fn new() -> Self {
        Self { timeout: None }
    }

    /// Kill commands that run longer than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CommandRunnerPort for ProcessCommandRunner {
    async fn run(
        &self,
        command: &CommandLine,
        sink: &dyn LogSinkPort,
    ) -> Result<bool, RunnerError> {
        let rendered = command.to_string();
        sink.append(format!("Running command: {rendered}"));
        info!(command = %rendered, "running command");

        let spawn_err = |source| RunnerError::Spawn {
            command: rendered.clone(),
            source,
        };
        let output_err = |source| RunnerError::Output {
            command: rendered.clone(),
            source,
        };

        let (reader, writer) = std::io::pipe().map_err(spawn_err)?;

        let mut cmd = Command::new(command.program());
        cmd.args(command.exposed_args())
            .stdin(Stdio::null())
            .stdout(writer.try_clone().map_err(spawn_err)?)
            .stderr(writer)
            .kill_on_drop(true);
        if let Some(dir) = command.working_dir() {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(spawn_err)?;
        // The command still owns both write ends; EOF only arrives once they
        // are closed on our side.
        drop(cmd);

        let receiver = pipe::Receiver::from_owned_fd(OwnedFd::from(reader)).map_err(output_err)?;

        let drained = async {
            let lines = forward_lines(receiver, sink).await?;
            debug!(command = %rendered, lines, "output drained");
            child.wait().await
        };

        let status = match self.timeout {
            None => drained.await.map_err(output_err)?,
            Some(limit) => {
                let outcome = tokio::time::timeout(limit, drained).await;
                match outcome {
                    Ok(status) => status.map_err(output_err)?,
                    Err(_) => {
                        if let Err(e) = child.kill().await {
                            warn!(command = %rendered, error = %e, "failed to kill timed out command");
                        }
                        sink.append(format!("Command timed out after {limit:?}"));
                        return Ok(false);
                    }
                }
            }
        };

        if status.success() {
            return Ok(true);
        }

        match status.code() {
            Some(code) => sink.append(format!("Command failed with exit code {code}")),
            None => sink.append("Command terminated by a signal".to_string()),
        }
        warn!(command = %rendered, ?status, "command failed");
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfinstall_core::BufferedLogSink;
    use std::time::Instant;

    fn sh(script: &str) -> CommandLine {
        CommandLine::new("sh").arg("-c").arg(script)
    }

    #[tokio::test]
    async fn test_success_echoes_command_then_output() {
        let sink = BufferedLogSink::new();
        let ok = ProcessCommandRunner::new()
            .run(&sh("echo hello"), &sink)
            .await
            .unwrap();
        assert!(ok);
        assert_eq!(
            sink.lines(),
            vec!["Running command: sh -c \"echo hello\"", "hello"]
        );
    }

    #[tokio::test]
    async fn test_nonzero_exit_returns_false_and_logs_code() {
        let sink = BufferedLogSink::new();
        let ok = ProcessCommandRunner::new()
            .run(&sh("echo boom; exit 3"), &sink)
            .await
            .unwrap();
        assert!(!ok);
        assert!(sink.contains_line("boom"));
        assert!(sink.contains_line("Command failed with exit code 3"));
    }

    #[tokio::test]
    async fn test_stderr_is_merged_in_order() {
        let sink = BufferedLogSink::new();
        ProcessCommandRunner::new()
            .run(&sh("echo one; echo two 1>&2; echo three"), &sink)
            .await
            .unwrap();
        let lines = sink.lines();
        assert_eq!(&lines[1..], &["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let sink = BufferedLogSink::new();
        let err = ProcessCommandRunner::new()
            .run(&CommandLine::new("definitely_not_a_real_command_12345"), &sink)
            .await
            .unwrap_err();
        assert!(matches!(err, RunnerError::Spawn { .. }));
        // The command is still echoed before the attempt.
        assert_eq!(sink.lines().len(), 1);
    }

    #[tokio::test]
    async fn test_runs_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let sink = BufferedLogSink::new();
        let ok = ProcessCommandRunner::new()
            .run(&sh("pwd").current_dir(dir.path()), &sink)
            .await
            .unwrap();
        assert!(ok);
        let reported = std::path::PathBuf::from(&sink.lines()[1]);
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn test_timeout_kills_command() {
        let sink = BufferedLogSink::new();
        let started = Instant::now();
        let ok = ProcessCommandRunner::new()
            .with_timeout(Some(Duration::from_millis(300)))
            .run(&sh("sleep 5"), &sink)
            .await
            .unwrap();
        assert!(!ok);
        assert!(started.elapsed() < Duration::from_secs(4));
        assert!(sink.contains_line("Command timed out after 300ms"));
    }
}
