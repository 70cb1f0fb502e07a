//! CLI-specific error types and mappings.
//!
//! Maps library errors to exit codes and user-facing messages.

use rfinstall_core::{ConfigError, InstallError, LoginError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Installation or login ran and failed.
    #[error("{0}")]
    Failed(String),

    /// Invalid arguments or workspace.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// A required host tool is missing.
    #[error("Missing dependency: {0}")]
    Dependency(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration or credential error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Failed(_) => 1,
            Self::Arguments(_) => 2,   // EX_USAGE
            Self::Dependency(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,         // EX_IOERR
            Self::Config(_) => 78,     // EX_CONFIG
        }
    }
}

impl From<InstallError> for CliError {
    fn from(err: InstallError) -> Self {
        match err {
            InstallError::Workspace(_) => Self::Arguments(err.to_string()),
            InstallError::DependencyMissing { .. } => Self::Dependency(err.to_string()),
            InstallError::Io { .. } => Self::Io(err.to_string()),
            InstallError::Login(login) => login.into(),
            InstallError::DownloadFailed { .. }
            | InstallError::ResourceMissing { .. }
            | InstallError::CommandFailed { .. }
            | InstallError::Transition(_) => Self::Failed(err.to_string()),
        }
    }
}

impl From<LoginError> for CliError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::CredentialsUnavailable { .. } => Self::Config(err.to_string()),
            LoginError::LoginFailed { .. } | LoginError::CommandFailed { .. } => {
                Self::Failed(err.to_string())
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
