//! Installer script acquisition.
//!
//! The script is either downloaded or extracted from the binary, and always
//! lands at `<workspace>/rf_installer.sh`. Whatever the source, the file is
//! fully written, flushed, synced and closed before this module returns.

mod download;
mod embedded;

use std::path::{Path, PathBuf};
use std::time::Duration;

use rfinstall_core::{
    InstallConfig, InstallError, InstallResult, InstallStep, LogSinkPort, ScriptSource,
    installer_script_path,
};
use tokio::io::AsyncWriteExt;

pub use embedded::{EMBEDDED_SCRIPTS, embedded_script};

/// Fetches the installer script into a workspace.
#[derive(Debug, Clone)]
pub struct ScriptFetcher {
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl ScriptFetcher {
    pub const fn new(connect_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            read_timeout,
        }
    }

    /// Fetcher with the download timeouts from `config`.
    pub const fn from_config(config: &InstallConfig) -> Self {
        Self::new(
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.read_timeout_secs),
        )
    }

    /// Materialize the script from `source` and return its path.
    pub async fn fetch(
        &self,
        source: &ScriptSource,
        workspace: &Path,
        sink: &dyn LogSinkPort,
    ) -> InstallResult<PathBuf> {
        match source {
            ScriptSource::Url { url } => self.fetch_by_download(url, workspace, sink).await,
            ScriptSource::Embedded { name } => {
                self.fetch_by_extraction(name, workspace, sink).await
            }
        }
    }

    /// Download the script from `url`. Only a 200 response is accepted.
    pub async fn fetch_by_download(
        &self,
        url: &str,
        workspace: &Path,
        sink: &dyn LogSinkPort,
    ) -> InstallResult<PathBuf> {
        let target = installer_script_path(workspace);
        download::download_script(url, &target, self.connect_timeout, self.read_timeout, sink)
            .await?;
        Ok(target)
    }

    /// Copy the bundled script called `name`.
    pub async fn fetch_by_extraction(
        &self,
        name: &str,
        workspace: &Path,
        sink: &dyn LogSinkPort,
    ) -> InstallResult<PathBuf> {
        let target = installer_script_path(workspace);
        embedded::extract_script(name, &target, sink).await?;
        Ok(target)
    }
}

impl Default for ScriptFetcher {
    fn default() -> Self {
        Self::from_config(&InstallConfig::default())
    }
}

fn io_error(action: &'static str, path: &Path, source: std::io::Error) -> InstallError {
    InstallError::Io {
        step: InstallStep::Fetching,
        action,
        path: path.to_path_buf(),
        source,
    }
}

/// Flush, sync and close `file`.
async fn finish_file(mut file: tokio::fs::File, path: &Path) -> InstallResult<()> {
    file.flush()
        .await
        .map_err(|e| io_error("flush", path, e))?;
    file.sync_all()
        .await
        .map_err(|e| io_error("sync", path, e))?;
    drop(file);
    Ok(())
}

/// Best-effort removal of a partially written script.
async fn discard_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove partial installer script");
        }
    }
}
