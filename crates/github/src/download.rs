//! Release asset downloads.

use reqwest::Client;
use setup_applanga_core::{Error, Result, Settings};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::http::{DEFAULT_USER_AGENT, build_client, describe};

/// Downloads release assets to local files.
#[derive(Debug, Clone)]
pub struct AssetDownloader {
    client: Client,
}

impl AssetDownloader {
    /// Create a downloader using the configured download timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: build_client(DEFAULT_USER_AGENT, settings.download_timeout)?,
        })
    }

    /// Download `url` to `dest`, creating parent directories.
    ///
    /// Redirects are followed. On failure nothing is written to `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] for transport failures and non-success
    /// statuses, and [`Error::Io`] if the file cannot be written.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<PathBuf> {
        debug!(%url, ?dest, "Downloading release asset");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network(url, describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(
                url,
                format!("Unexpected HTTP response: {}", status.as_u16()),
            ));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| Error::network(url, describe(&e)))?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, &data).await?;

        info!(%url, bytes = data.len(), "Downloaded release asset");
        Ok(dest.to_path_buf())
    }
}
