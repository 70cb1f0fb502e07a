//! Composition root: turns parsed arguments into a configured
//! [`Provisioner`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rfinstall_core::{CredentialSource, InstallConfig, ScriptSource};
use rfinstall_runtime::{JsonCredentialStore, Provisioner};
use tracing::debug;

use crate::commands::{CredentialArgs, InstallArgs};
use crate::error::CliError;

/// Load the configuration file, or defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<InstallConfig, CliError> {
    match path {
        Some(path) => Ok(InstallConfig::load(path)?),
        None => {
            debug!("no config file given; using defaults");
            Ok(InstallConfig::default())
        }
    }
}

/// Apply `install` flags on top of `config`.
pub fn apply_install_args(config: &mut InstallConfig, args: &InstallArgs) {
    if let Some(url) = &args.url {
        config.script_source = ScriptSource::Url { url: url.clone() };
    } else if args.embedded {
        config.script_source = ScriptSource::default_embedded();
    }
    if args.require_login {
        config.require_login = true;
    }
    if args.cleanup {
        config.cleanup_after_install = true;
    }
}

/// Apply credential flags on top of `config`.
pub fn apply_credential_args(config: &mut InstallConfig, args: &CredentialArgs) {
    if let Some(id) = &args.credentials_id {
        config.credentials = CredentialSource::Store { id: id.clone() };
    }
}

/// Absolute form of `workspace`. An empty path is passed through so the
/// provisioner can reject it.
pub fn resolve_workspace(workspace: &Path) -> Result<PathBuf, CliError> {
    if workspace.as_os_str().is_empty() {
        return Ok(PathBuf::new());
    }
    Ok(std::path::absolute(workspace)?)
}

/// Wire a provisioner with real adapters. Fails if `config` is invalid.
pub fn build_provisioner(
    config: InstallConfig,
    credentials: &CredentialArgs,
) -> Result<Provisioner, CliError> {
    let mut provisioner = Provisioner::new(config)?;
    if let Some(path) = &credentials.credentials_file {
        debug!(path = %path.display(), "using JSON credential store");
        provisioner = provisioner.with_credential_store(Arc::new(JsonCredentialStore::new(path)));
    }
    Ok(provisioner)
}
