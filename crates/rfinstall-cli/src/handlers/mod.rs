//! Command handlers.
//!
//! Handlers are thin: build the provisioner from arguments, run one
//! operation, and map the outcome to a [`CliError`](crate::CliError).

pub mod check_deps;
pub mod install;
pub mod login;
