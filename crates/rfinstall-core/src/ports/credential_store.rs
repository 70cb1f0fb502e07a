//! Credential store port.
//!
//! Looks up a username/password pair by an opaque identifier. Listing the
//! available identifiers is a host UI concern and not part of this port.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::credentials::Credentials;

/// Errors reported by a credential store backend.
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    /// The store could not be read.
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),

    /// The store content is malformed.
    #[error("Credential store is malformed: {0}")]
    Malformed(String),
}

/// Port for resolving credentials by identifier.
pub trait CredentialStorePort: Send + Sync {
    /// Return the pair stored under `id`, or `None` when no entry exists.
    fn lookup(&self, id: &str) -> Result<Option<Credentials>, CredentialStoreError>;
}

/// A fixed, in-process credential store.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    entries: HashMap<String, (String, SecretString)>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    #[must_use]
    pub fn with_entry(
        mut self,
        id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.insert(id, username, password);
        self
    }

    pub fn insert(
        &mut self,
        id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) {
        self.entries.insert(
            id.into(),
            (username.into(), SecretString::from(password.into())),
        );
    }
}

impl CredentialStorePort for InMemoryCredentialStore {
    fn lookup(&self, id: &str) -> Result<Option<Credentials>, CredentialStoreError> {
        Ok(self
            .entries
            .get(id)
            .map(|(user, secret)| Credentials::new(user.clone(), secret.expose_secret())))
    }
}
