//! Endpoints, names and timeouts for one installation run.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::platform::Os;

/// Name of the installed tool, also used as the tool-cache key.
pub const TOOL_NAME: &str = "applanga";

/// Organisation publishing the releases.
pub const RELEASE_ORG: &str = "applanga";

/// Repository publishing the releases.
pub const RELEASE_REPO: &str = "applanga-cli";

/// Default GitHub REST API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default base for release asset downloads.
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://github.com";

/// Default base for the subscription check.
pub const DEFAULT_SUBSCRIPTION_BASE: &str = "https://agent.api.stepsecurity.io";

/// User agent sent to the release listing endpoint.
pub const USER_AGENT: &str = "Node.js";

/// Settings shared by the fetcher, downloader and subscription gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL for the release listing (`{api_base}/repos/...`).
    pub api_base: String,
    /// Base URL for asset downloads (`{download_base}/{org}/{repo}/releases/download/...`).
    pub download_base: String,
    /// Base URL for the subscription check.
    pub subscription_base: String,
    /// Organisation publishing the releases.
    pub org: String,
    /// Repository publishing the releases.
    pub repo: String,
    /// Tool name used for the cache key and the binary name.
    pub tool: String,
    /// Subscription check timeout.
    #[serde(with = "duration_millis")]
    pub subscription_timeout: Duration,
    /// Release listing timeout.
    #[serde(with = "duration_millis")]
    pub catalog_timeout: Duration,
    /// Archive download timeout.
    #[serde(with = "duration_millis")]
    pub download_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
            subscription_base: DEFAULT_SUBSCRIPTION_BASE.to_string(),
            org: RELEASE_ORG.to_string(),
            repo: RELEASE_REPO.to_string(),
            tool: TOOL_NAME.to_string(),
            subscription_timeout: Duration::from_millis(3000),
            catalog_timeout: Duration::from_secs(30),
            download_timeout: Duration::from_secs(300),
        }
    }
}

impl Settings {
    /// Create settings pointing at the production endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the release listing base URL.
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Override the asset download base URL.
    #[must_use]
    pub fn with_download_base(mut self, base: impl Into<String>) -> Self {
        self.download_base = base.into();
        self
    }

    /// Override the subscription check base URL.
    #[must_use]
    pub fn with_subscription_base(mut self, base: impl Into<String>) -> Self {
        self.subscription_base = base.into();
        self
    }

    /// Override the subscription check timeout.
    #[must_use]
    pub fn with_subscription_timeout(mut self, timeout: Duration) -> Self {
        self.subscription_timeout = timeout;
        self
    }

    /// Override the release listing timeout.
    #[must_use]
    pub fn with_catalog_timeout(mut self, timeout: Duration) -> Self {
        self.catalog_timeout = timeout;
        self
    }

    /// Override the download timeout.
    #[must_use]
    pub fn with_download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }

    /// URL of the release listing.
    #[must_use]
    pub fn releases_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            trim_base(&self.api_base),
            self.org,
            self.repo
        )
    }

    /// URL of the archive for `version` on `os`.
    ///
    /// The version is embedded verbatim.
    #[must_use]
    pub fn download_url(&self, version: &str, os: Os) -> String {
        format!(
            "{}/{}/{}/releases/download/{}/{}",
            trim_base(&self.download_base),
            self.org,
            self.repo,
            version,
            os.archive_name()
        )
    }

    /// URL of the subscription check for `repository` (`owner/name`).
    #[must_use]
    pub fn subscription_url(&self, repository: &str) -> String {
        format!(
            "{}/v1/github/{}/actions/subscription",
            trim_base(&self.subscription_base),
            repository
        )
    }
}

fn trim_base(base: &str) -> &str {
    base.trim_end_matches('/')
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
