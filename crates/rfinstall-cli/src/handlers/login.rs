//! `rfinstall login`.

use std::path::Path;

use rfinstall_core::LogSinkPort;

use crate::bootstrap::{apply_credential_args, build_provisioner, load_config};
use crate::commands::CredentialArgs;
use crate::error::CliError;

pub async fn execute(
    config_path: Option<&Path>,
    args: &CredentialArgs,
    sink: &dyn LogSinkPort,
) -> Result<(), CliError> {
    let mut config = load_config(config_path)?;
    apply_credential_args(&mut config, args);

    let provisioner = build_provisioner(config, args)?;
    provisioner.login_configured(sink).await?;
    Ok(())
}
