#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod credentials;
pub mod error;
pub mod paths;
pub mod ports;
pub mod steps;

// Re-export commonly used types for convenience
pub use config::{
    ConfigError, CredentialSource, DEFAULT_ACCESS_ID_VAR, DEFAULT_ACCESS_PASSWORD_VAR,
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LOGIN_COMMAND, DEFAULT_SCRIPT_URL, InstallConfig,
    ScriptSource,
};
pub use credentials::{Credentials, process_env, resolve_credentials};
pub use error::{InstallError, InstallResult, LoginError};
pub use paths::{INSTALLER_FILE_NAME, WorkspaceError, installer_script_path, validate_workspace};
pub use ports::{
    BufferedLogSink, CredentialStoreError, CredentialStorePort, InMemoryCredentialStore,
    LogSinkPort, NoopLogSink,
};
pub use steps::{InstallProgress, InstallState, InstallStep, TransitionError};
