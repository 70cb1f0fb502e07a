//! Installer scripts bundled into the binary.

use std::path::Path;

use rfinstall_core::{INSTALLER_FILE_NAME, InstallError, InstallResult, LogSinkPort};
use tokio::io::AsyncWriteExt;

use super::{discard_partial, finish_file, io_error};

/// Every bundled script, by name.
pub static EMBEDDED_SCRIPTS: &[(&str, &[u8])] = &[(
    INSTALLER_FILE_NAME,
    include_bytes!("../../assets/rf_installer.sh"),
)];

/// Bytes of the bundled script called `name`.
pub fn embedded_script(name: &str) -> Option<&'static [u8]> {
    EMBEDDED_SCRIPTS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, bytes)| *bytes)
}

pub(super) async fn extract_script(
    name: &str,
    target: &Path,
    sink: &dyn LogSinkPort,
) -> InstallResult<()> {
    let bytes = embedded_script(name).ok_or_else(|| InstallError::ResourceMissing {
        name: name.to_string(),
    })?;

    sink.append(format!("Extracting {name} from bundled resources to the workspace..."));

    let mut file = tokio::fs::File::create(target)
        .await
        .map_err(|e| io_error("create", target, e))?;
    if let Err(e) = file.write_all(bytes).await {
        drop(file);
        discard_partial(target).await;
        return Err(io_error("write", target, e));
    }
    finish_file(file, target).await?;

    sink.append(format!(
        "Successfully extracted {name} to {}",
        target.display()
    ));
    Ok(())
}
