#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

#[cfg(not(unix))]
compile_error!("rfinstall-runtime only supports Unix hosts");

pub mod command;
mod credential_store;
pub mod deps;
pub mod installer;
mod provisioner;

// Re-export the orchestrator
pub use provisioner::{EnvLookup, Provisioner};

// Re-export command execution
pub use command::{CommandLine, CommandRunnerPort, ProcessCommandRunner, RunnerError};

// Re-export host tool probing
pub use deps::{
    DependencyProbePort, PathDependencyProbe, ToolStatus, check_required_tools, tool_report,
};

// Re-export script acquisition
pub use installer::{ScriptFetcher, embedded_script};

// Re-export credential store adapter
pub use credential_store::JsonCredentialStore;
