//! Port definitions (trait abstractions) for external collaborators.
//!
//! The host build system supplies a log sink for the build output and,
//! optionally, a credential store. Both are expressed here as traits so the
//! runtime never depends on a concrete host.

pub mod credential_store;
pub mod log_sink;

pub use credential_store::{CredentialStoreError, CredentialStorePort, InMemoryCredentialStore};
pub use log_sink::{BufferedLogSink, LogSinkPort, NoopLogSink};
