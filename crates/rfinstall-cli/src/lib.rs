#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary target only
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod sink;

// Re-export primary types for convenient access
pub use commands::{Commands, CredentialArgs, InstallArgs};
pub use error::CliError;
pub use parser::Cli;
pub use sink::StdoutLogSink;
