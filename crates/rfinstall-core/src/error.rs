//! Error types for installation and login.
//!
//! Every variant is terminal for the current attempt. Messages are shown to
//! operators verbatim and must never carry a credential secret.

use std::path::PathBuf;
use thiserror::Error;

use crate::paths::WorkspaceError;
use crate::steps::{InstallStep, TransitionError};

/// Errors from the login phase.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The credential pair is missing or incomplete.
    #[error("Credentials unavailable: {reason}")]
    CredentialsUnavailable { reason: String },

    /// The login command ran and exited unsuccessfully.
    #[error("{command} failed. Stopping the build.")]
    LoginFailed { command: String },

    /// The login command could not be started.
    #[error("Failed to run {command}: {reason}")]
    CommandFailed { command: String, reason: String },
}

impl LoginError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::CredentialsUnavailable {
            reason: reason.into(),
        }
    }
}

/// Errors from the installation workflow.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The workspace path is unusable.
    #[error("Invalid workspace: {0}")]
    Workspace(#[from] WorkspaceError),

    /// A host tool needed by the installer is not on `PATH`.
    #[error("'{tool}' command not found. Please install '{tool}' on the agent.")]
    DependencyMissing { tool: String },

    /// The installer download failed (non-200 status or transport error).
    #[error("Failed to download {url}: {reason}")]
    DownloadFailed {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// The requested embedded script is not bundled in this build.
    #[error("Embedded installer script '{name}' is not bundled in this build")]
    ResourceMissing { name: String },

    /// A shell step exited non-zero or could not be started.
    #[error("Step '{step}' failed: {detail}. Stopping the build.")]
    CommandFailed { step: InstallStep, detail: String },

    /// Local file operation failed.
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        step: InstallStep,
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Login phase failed.
    #[error(transparent)]
    Login(#[from] LoginError),

    /// Steps were driven out of order.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl InstallError {
    /// The workflow step this error belongs to.
    pub const fn step(&self) -> InstallStep {
        match self {
            Self::DependencyMissing { .. } => InstallStep::CheckingDependency,
            Self::Workspace(_) | Self::DownloadFailed { .. } | Self::ResourceMissing { .. } => {
                InstallStep::Fetching
            }
            Self::CommandFailed { step, .. } | Self::Io { step, .. } => *step,
            Self::Login(LoginError::CredentialsUnavailable { .. }) => {
                InstallStep::ResolvingCredentials
            }
            Self::Login(_) => InstallStep::LoggingIn,
            Self::Transition(err) => err.to,
        }
    }

    /// Whether the failure came from a missing host dependency.
    pub const fn is_dependency_missing(&self) -> bool {
        matches!(self, Self::DependencyMissing { .. })
    }
}

/// Result alias for installation operations.
pub type InstallResult<T> = Result<T, InstallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_name_their_step() {
        let err = InstallError::DependencyMissing {
            tool: "curl".into(),
        };
        assert_eq!(err.step(), InstallStep::CheckingDependency);
        assert_eq!(
            err.to_string(),
            "'curl' command not found. Please install 'curl' on the agent."
        );

        let err = InstallError::CommandFailed {
            step: InstallStep::Executing,
            detail: "exited with code 3".into(),
        };
        assert_eq!(err.step(), InstallStep::Executing);
        assert!(err.to_string().contains("executing installer"));

        let err = InstallError::from(LoginError::unavailable("RF_ACCESS_ID is not set"));
        assert_eq!(err.step(), InstallStep::ResolvingCredentials);

        let err = InstallError::from(LoginError::LoginFailed {
            command: "rflogin".into(),
        });
        assert_eq!(err.to_string(), "rflogin failed. Stopping the build.");
        assert_eq!(err.step(), InstallStep::LoggingIn);
    }

    #[test]
    fn test_download_error_carries_status() {
        let err = InstallError::DownloadFailed {
            url: "https://us01.rapidfort.com/cli/".into(),
            status: Some(404),
            reason: "HTTP Response Code: 404".into(),
        };
        assert!(err.to_string().contains("404"));
        assert_eq!(err.step(), InstallStep::Fetching);
    }
}
