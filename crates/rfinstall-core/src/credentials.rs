//! Credential pair and resolution strategies.
//!
//! SECURITY: the secret half of a [`Credentials`] is held in a
//! [`SecretString`] and is never rendered by `Debug`. Error messages only
//! ever name the missing piece, never its value.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::config::CredentialSource;
use crate::error::LoginError;
use crate::ports::CredentialStorePort;

/// An `(identifier, secret)` pair used to authenticate the installed CLI.
pub struct Credentials {
    username: String,
    secret: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub const fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// Both halves are present and non-blank.
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.secret.expose_secret().trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Read a variable from the process environment, treating blank as unset.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve credentials according to `source`.
///
/// Returns `Ok(None)` when the strategy legitimately yields nothing (no
/// strategy configured, or neither environment variable set). An incomplete
/// pair, a blank store identifier or an unknown store entry fail closed.
///
/// `env` is the variable lookup; blank values must be reported as `None`.
pub fn resolve_credentials(
    source: &CredentialSource,
    store: Option<&dyn CredentialStorePort>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Option<Credentials>, LoginError> {
    match source {
        CredentialSource::None => Ok(None),
        CredentialSource::Environment {
            id_var,
            password_var,
        } => match (env(id_var), env(password_var)) {
            (None, None) => Ok(None),
            (Some(id), Some(password)) => Ok(Some(Credentials::new(id, password))),
            (Some(_), None) => Err(LoginError::unavailable(format!("{password_var} is not set"))),
            (None, Some(_)) => Err(LoginError::unavailable(format!("{id_var} is not set"))),
        },
        CredentialSource::Store { id } => {
            if id.trim().is_empty() {
                return Err(LoginError::unavailable(
                    "No credentials ID provided. Please select a valid credential.",
                ));
            }
            let store = store.ok_or_else(|| {
                LoginError::unavailable(format!(
                    "No credential store configured to look up ID: {id}"
                ))
            })?;
            let found = store
                .lookup(id)
                .map_err(|e| LoginError::unavailable(e.to_string()))?;
            match found {
                Some(credentials) if credentials.is_complete() => Ok(Some(credentials)),
                Some(_) => Err(LoginError::unavailable(format!(
                    "Credentials with ID {id} are incomplete"
                ))),
                None => Err(LoginError::unavailable(format!(
                    "Could not find credentials with ID: {id}"
                ))),
            }
        }
    }
}
