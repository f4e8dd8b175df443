//! Streaming file download
//!
//! Writes response bodies to disk chunk by chunk as they arrive; the
//! whole body is never buffered in memory. No content-type or size
//! validation is performed — callers pre-filter (e.g. by resolution).

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use crate::client::DdgImageClient;
use crate::error::{DdgImageError, Result};
use crate::url::filename_from_url;

/// Streams a URL's body to a file inside `output_dir`
///
/// The directory is created if absent. Without an explicit `filename`
/// the name is derived from the URL's last path segment (query string
/// stripped, sanitized to a single path component), falling back to a
/// fixed name when that yields nothing.
///
/// Returns the path of the written file.
pub(crate) async fn download_to_dir(
    client: &DdgImageClient,
    url: &str,
    output_dir: &Path,
    filename: Option<&str>,
) -> Result<PathBuf> {
    let filename = match filename {
        Some(name) => name.to_string(),
        None => filename_from_url(url),
    };
    let output_path = output_dir.join(&filename);

    fs::create_dir_all(output_dir)
        .await
        .map_err(|e| DdgImageError::io(output_dir.to_path_buf(), e))?;

    debug!(url, path = %output_path.display(), "starting download");
    let response = client.get_response(url).await?;

    let file = File::create(&output_path)
        .await
        .map_err(|e| DdgImageError::io(output_path.clone(), e))?;
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DdgImageError::io(output_path.clone(), e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DdgImageError::io(output_path.clone(), e))?;

    info!(path = %output_path.display(), bytes = bytes_written, "download complete");
    Ok(output_path)
}
