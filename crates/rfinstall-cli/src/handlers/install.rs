//! `rfinstall install`.

use std::path::Path;

use rfinstall_core::LogSinkPort;

use crate::bootstrap::{
    apply_credential_args, apply_install_args, build_provisioner, load_config, resolve_workspace,
};
use crate::commands::InstallArgs;
use crate::error::CliError;

/// Run a full installation into the requested workspace.
pub async fn execute(
    config_path: Option<&Path>,
    args: &InstallArgs,
    sink: &dyn LogSinkPort,
) -> Result<(), CliError> {
    let mut config = load_config(config_path)?;
    apply_install_args(&mut config, args);
    apply_credential_args(&mut config, &args.credentials);

    let workspace = resolve_workspace(&args.workspace)?;
    let provisioner = build_provisioner(config, &args.credentials)?;

    if let Err(err) = provisioner.install(&workspace, sink).await {
        sink.append("Installation failed.".to_string());
        return Err(err.into());
    }
    Ok(())
}
