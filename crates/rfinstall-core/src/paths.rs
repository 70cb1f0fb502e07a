//! Workspace path handling.
//!
//! The workspace is owned by the caller. The only file the installer ever
//! creates inside it is [`INSTALLER_FILE_NAME`].

use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the installer script inside the workspace.
pub const INSTALLER_FILE_NAME: &str = "rf_installer.sh";

/// Errors raised while validating a workspace directory.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    /// An empty path was provided.
    #[error("Workspace path cannot be empty")]
    EmptyPath,

    /// The path is relative.
    #[error("Workspace path must be absolute: {0}")]
    NotAbsolute(PathBuf),

    /// The directory does not exist.
    #[error("Workspace {0} does not exist")]
    NotFound(PathBuf),

    /// The path exists but is not a directory.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),
}

/// Validate that `workspace` is an existing absolute directory.
pub fn validate_workspace(workspace: &Path) -> Result<(), WorkspaceError> {
    if workspace.as_os_str().is_empty() {
        return Err(WorkspaceError::EmptyPath);
    }
    if !workspace.is_absolute() {
        return Err(WorkspaceError::NotAbsolute(workspace.to_path_buf()));
    }
    if !workspace.exists() {
        return Err(WorkspaceError::NotFound(workspace.to_path_buf()));
    }
    if !workspace.is_dir() {
        return Err(WorkspaceError::NotADirectory(workspace.to_path_buf()));
    }
    Ok(())
}

/// Deterministic location of the installer script for a workspace.
pub fn installer_script_path(workspace: &Path) -> PathBuf {
    workspace.join(INSTALLER_FILE_NAME)
}
