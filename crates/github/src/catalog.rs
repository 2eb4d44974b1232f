//! Release catalog fetcher.
//!
//! Lists every published release of the tool's repository. Each call issues
//! exactly one request; nothing is cached between calls and failures are not
//! retried.

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use setup_applanga_core::settings::USER_AGENT;
use setup_applanga_core::{Error, Release, Result, Settings};
use tracing::{debug, info};

use crate::http::{build_client, describe};

/// Client for the release listing endpoint.
#[derive(Debug, Clone)]
pub struct ReleaseCatalog {
    client: Client,
    url: String,
}

impl ReleaseCatalog {
    /// Create a catalog client for the configured repository.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: build_client(USER_AGENT, settings.catalog_timeout)?,
            url: settings.releases_url(),
        })
    }

    /// The release listing URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the releases in the order the endpoint returns them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the endpoint is unreachable, times out or
    /// answers with anything but `200 OK`, and [`Error::Parse`] if the body is
    /// not a JSON array of release objects.
    pub async fn fetch_releases(&self) -> Result<Vec<Release>> {
        debug!(url = %self.url, "Fetching release catalog");

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| Error::network(&self.url, describe(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(&self.url, describe(&e)))?;

        if status != StatusCode::OK {
            return Err(Error::network(
                &self.url,
                format!("Failed to get releases: {}", status.as_u16()),
            ));
        }

        let releases: Vec<Release> =
            serde_json::from_str(&body).map_err(|e| Error::parse(&self.url, e.to_string()))?;

        info!(count = releases.len(), "Fetched release catalog");
        Ok(releases)
    }
}
