//! Streaming HTTP download of the installer script.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use rfinstall_core::{INSTALLER_FILE_NAME, InstallError, InstallResult, LogSinkPort};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::{discard_partial, finish_file, io_error};

fn download_failed(url: &str, status: Option<u16>, reason: impl Into<String>) -> InstallError {
    InstallError::DownloadFailed {
        url: url.to_string(),
        status,
        reason: reason.into(),
    }
}

/// GET `url` and stream the body into `target`.
///
/// `target` is only created after a 200 response. If the body stream breaks
/// part way, the partial file is removed.
pub(super) async fn download_script(
    url: &str,
    target: &Path,
    connect_timeout: Duration,
    read_timeout: Duration,
    sink: &dyn LogSinkPort,
) -> InstallResult<()> {
    sink.append(format!(
        "Downloading {INSTALLER_FILE_NAME} from URL to the workspace..."
    ));
    info!(url, "downloading installer script");

    let client = Client::builder()
        .connect_timeout(connect_timeout)
        .read_timeout(read_timeout)
        .build()
        .map_err(|e| download_failed(url, None, format!("HTTP client setup failed: {e}")))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| download_failed(url, None, e.to_string()))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(download_failed(
            url,
            Some(status.as_u16()),
            format!("HTTP Response Code: {}", status.as_u16()),
        ));
    }

    let mut file = tokio::fs::File::create(target)
        .await
        .map_err(|e| io_error("create", target, e))?;

    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                drop(file);
                discard_partial(target).await;
                return Err(download_failed(
                    url,
                    Some(status.as_u16()),
                    format!("Error reading download stream: {e}"),
                ));
            }
        };
        if let Err(e) = file.write_all(&chunk).await {
            drop(file);
            discard_partial(target).await;
            return Err(io_error("write", target, e));
        }
        written += chunk.len() as u64;
    }

    finish_file(file, target).await?;
    debug!(url, bytes = written, "installer script written");

    sink.append(format!(
        "Successfully downloaded {INSTALLER_FILE_NAME} to {}",
        target.display()
    ));
    Ok(())
}
