//! JSON file credential store.
//!
//! File layout:
//!
//! ```json
//! { "rf-prod": { "username": "rf-id", "password": "rf-secret" } }
//! ```
//!
//! The file is re-read on every lookup so rotated secrets are picked up
//! without restarting the host.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rfinstall_core::{CredentialStoreError, CredentialStorePort, Credentials};
use serde::Deserialize;

#[derive(Deserialize)]
struct StoredEntry {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Credential store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonCredentialStore {
    path: PathBuf,
}

impl JsonCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, StoredEntry>, CredentialStoreError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            CredentialStoreError::Unavailable(format!("{}: {e}", self.path.display()))
        })?;
        // Only position and category are reported: serde_json messages can
        // quote the offending value, which may be a password.
        serde_json::from_str(&raw).map_err(|e| {
            CredentialStoreError::Malformed(format!(
                "{}: {:?} error at line {} column {}",
                self.path.display(),
                e.classify(),
                e.line(),
                e.column()
            ))
        })
    }
}

impl CredentialStorePort for JsonCredentialStore {
    fn lookup(&self, id: &str) -> Result<Option<Credentials>, CredentialStoreError> {
        let mut entries = self.load()?;
        Ok(entries
            .remove(id)
            .map(|entry| Credentials::new(entry.username, entry.password)))
    }
}
