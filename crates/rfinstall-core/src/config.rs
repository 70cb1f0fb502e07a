//! Installation configuration.
//!
//! One configuration object covers every variant of the provisioning
//! workflow: where the installer script comes from, whether login is
//! mandatory, and whether the script is removed afterwards. All fields have
//! defaults so a partial JSON file (or none at all) is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::INSTALLER_FILE_NAME;

/// Default location of the RapidFort CLI installer script.
pub const DEFAULT_SCRIPT_URL: &str = "https://us01.rapidfort.com/cli/";

/// Default connect and read timeout for the installer download.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Environment variable holding the access identifier.
pub const DEFAULT_ACCESS_ID_VAR: &str = "RF_ACCESS_ID";

/// Environment variable holding the access password.
pub const DEFAULT_ACCESS_PASSWORD_VAR: &str = "RF_ACCESS_PASSWORD";

/// Command installed by the CLI that authenticates it.
pub const DEFAULT_LOGIN_COMMAND: &str = "rflogin";

/// Where the installer script bytes come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptSource {
    /// Download the script over HTTP(S).
    Url { url: String },
    /// Extract a script bundled into the binary.
    Embedded { name: String },
}

impl ScriptSource {
    /// The default download source.
    pub fn default_url() -> Self {
        Self::Url {
            url: DEFAULT_SCRIPT_URL.to_string(),
        }
    }

    /// The default bundled script.
    pub fn default_embedded() -> Self {
        Self::Embedded {
            name: INSTALLER_FILE_NAME.to_string(),
        }
    }
}

impl Default for ScriptSource {
    fn default() -> Self {
        Self::default_url()
    }
}

/// How the credential pair for login is obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    /// Never resolve credentials; login is skipped.
    None,
    /// Read the pair from two environment variables.
    Environment {
        #[serde(default = "default_id_var")]
        id_var: String,
        #[serde(default = "default_password_var")]
        password_var: String,
    },
    /// Look the pair up in a credential store by identifier.
    Store { id: String },
}

fn default_id_var() -> String {
    DEFAULT_ACCESS_ID_VAR.to_string()
}

fn default_password_var() -> String {
    DEFAULT_ACCESS_PASSWORD_VAR.to_string()
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::Environment {
            id_var: default_id_var(),
            password_var: default_password_var(),
        }
    }
}

/// Configuration for one installation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Where the installer script comes from.
    pub script_source: ScriptSource,

    /// Fail the installation when no credentials can be resolved.
    /// When false, missing credentials only skip the login phase.
    pub require_login: bool,

    /// Remove the installer script once the run is over.
    pub cleanup_after_install: bool,

    /// Host tools the installer script needs on `PATH`.
    pub required_tools: Vec<String>,

    /// Credential resolution strategy.
    pub credentials: CredentialSource,

    /// Program invoked to authenticate the installed CLI.
    pub login_command: String,

    /// Download connect timeout.
    pub connect_timeout_secs: u64,

    /// Download read timeout.
    pub read_timeout_secs: u64,

    /// Optional upper bound on each spawned command. `None` waits forever.
    pub command_timeout_secs: Option<u64>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            script_source: ScriptSource::default(),
            require_login: false,
            cleanup_after_install: false,
            required_tools: vec!["curl".to_string()],
            credentials: CredentialSource::default(),
            login_command: DEFAULT_LOGIN_COMMAND.to_string(),
            connect_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            command_timeout_secs: None,
        }
    }
}

/// Errors loading or validating an [`InstallConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl InstallConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded install config");
        Ok(config)
    }

    /// Check field-level constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.script_source {
            ScriptSource::Url { url } => {
                let url = url.trim();
                if url.is_empty() {
                    return Err(ConfigError::Invalid("script URL cannot be empty".into()));
                }
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(ConfigError::Invalid(format!(
                        "script URL must use http or https: {url}"
                    )));
                }
            }
            ScriptSource::Embedded { name } => {
                if name.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "embedded script name cannot be empty".into(),
                    ));
                }
            }
        }

        if self.connect_timeout_secs == 0 || self.read_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "download timeouts must be greater than zero".into(),
            ));
        }

        if self.command_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "command timeout must be greater than zero".into(),
            ));
        }

        if self.login_command.trim().is_empty() {
            return Err(ConfigError::Invalid("login command cannot be empty".into()));
        }

        if self.required_tools.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "required tool names cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = InstallConfig::default();
        assert_eq!(config.script_source, ScriptSource::default_url());
        assert!(!config.require_login);
        assert!(!config.cleanup_after_install);
        assert_eq!(config.required_tools, vec!["curl".to_string()]);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.read_timeout_secs, 10);
        assert_eq!(config.command_timeout_secs, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: InstallConfig = serde_json::from_str(
            r#"{"script_source": {"type": "embedded", "name": "rf_installer.sh"}, "cleanup_after_install": true}"#,
        )
        .unwrap();
        assert_eq!(config.script_source, ScriptSource::default_embedded());
        assert!(config.cleanup_after_install);
        assert_eq!(config.login_command, "rflogin");
    }

    #[test]
    fn test_environment_source_defaults_variable_names() {
        let source: CredentialSource = serde_json::from_str(r#"{"type": "environment"}"#).unwrap();
        assert_eq!(source, CredentialSource::default());
    }

    #[test]
    fn test_store_source_parses() {
        let source: CredentialSource =
            serde_json::from_str(r#"{"type": "store", "id": "rf-prod"}"#).unwrap();
        assert_eq!(
            source,
            CredentialSource::Store {
                id: "rf-prod".into()
            }
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = InstallConfig {
            script_source: ScriptSource::Url {
                url: "ftp://example.com/cli".into(),
            },
            ..InstallConfig::default()
        };
        assert!(config.validate().is_err());

        config.script_source = ScriptSource::Embedded { name: "  ".into() };
        assert!(config.validate().is_err());

        config.script_source = ScriptSource::default_embedded();
        config.read_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.read_timeout_secs = 10;
        config.command_timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.command_timeout_secs = Some(600);
        config.login_command = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rfinstall.json");
        std::fs::write(
            &path,
            r#"{"require_login": true, "credentials": {"type": "none"}}"#,
        )
        .unwrap();

        let config = InstallConfig::load(&path).unwrap();
        assert!(config.require_login);
        assert_eq!(config.credentials, CredentialSource::None);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = InstallConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = InstallConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
