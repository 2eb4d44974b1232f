//! Installation flow.
//!
//! 1. Check the subscription.
//! 2. Resolve the requested version, fetching the release catalog only for
//!    wildcards.
//! 3. On a tool-cache hit, expose the cached directory and stop.
//! 4. Otherwise download the platform archive, extract it, store it in the
//!    cache and expose the cached directory.
//!
//! Every step after the subscription check waits for the previous one. Any
//! error ends the run; the single exception is setting the executable bit,
//! which only produces a warning.

use setup_applanga_core::{Error, Os, Result, Settings, VersionPattern, current_arch};
use setup_applanga_github::{AssetDownloader, ReleaseCatalog, SubscriptionGate};
use setup_applanga_toolcache::{ToolCache, extract, mark_executable};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::actions::Runner;

/// What the caller asked to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Version token: an exact tag or a wildcard pattern.
    pub version: String,
    /// Repository running the workflow, for the subscription check.
    pub repository: String,
}

impl InstallRequest {
    /// Create a request.
    #[must_use]
    pub fn new(version: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            repository: repository.into(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// The concrete version installed.
    pub version: String,
    /// Directory added to the search path.
    pub path: PathBuf,
    /// Whether the tool cache already held this version.
    pub cache_hit: bool,
}

/// Drives one installation run.
#[derive(Debug, Clone)]
pub struct Installer {
    settings: Settings,
    cache: ToolCache,
    temp_root: PathBuf,
    host_os: String,
    arch: String,
}

impl Installer {
    /// Create an installer for the current host.
    #[must_use]
    pub fn new(settings: Settings, cache: ToolCache, temp_root: PathBuf) -> Self {
        Self {
            settings,
            cache,
            temp_root,
            host_os: std::env::consts::OS.to_string(),
            arch: current_arch(),
        }
    }

    /// Install for a different host operating system.
    #[must_use]
    pub fn with_host_os(mut self, os: impl Into<String>) -> Self {
        self.host_os = os.into();
        self
    }

    /// Install for a different architecture (runner naming).
    #[must_use]
    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    /// Run the whole flow.
    ///
    /// # Errors
    ///
    /// Propagates the first failure. [`Error::SubscriptionRejected`] must be
    /// handled by aborting the process.
    pub async fn run(&self, request: &InstallRequest, runner: &mut dyn Runner) -> Result<InstallOutcome> {
        SubscriptionGate::new(&self.settings, &request.repository)?
            .check()
            .await?;

        let version = self.resolve(&request.version).await?;
        let tool = self.settings.tool.as_str();

        if let Some(path) = self.cache.find(tool, &version, &self.arch) {
            info!(%version, ?path, "Found cached installation");
            runner.add_path(&path)?;
            return Ok(InstallOutcome {
                version,
                path,
                cache_hit: true,
            });
        }

        let os = Os::parse(&self.host_os).ok_or_else(|| Error::unsupported_platform(&self.host_os))?;
        let path = self.fetch(&version, os).await?;
        runner.add_path(&path)?;

        if os.needs_executable_bit() {
            let binary = path.join(tool);
            if let Err(e) = mark_executable(&binary) {
                warn!(?binary, error = %e, "Failed to mark binary executable");
                runner.warning(&format!(
                    "Failed to mark {} executable: {e}",
                    binary.display()
                ));
            }
        }

        info!(%version, ?path, "Installed {}", tool);
        Ok(InstallOutcome {
            version,
            path,
            cache_hit: false,
        })
    }

    /// Turn the requested token into a concrete version.
    async fn resolve(&self, token: &str) -> Result<String> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::config("Input required and not supplied: version"));
        }

        let pattern = VersionPattern::parse(token)?;
        if !pattern.is_wildcard() {
            debug!(version = %token, "Using exact version");
            return pattern.resolve(&[]);
        }

        let releases = ReleaseCatalog::new(&self.settings)?.fetch_releases().await?;
        let version = pattern.resolve(&releases)?;
        info!(%pattern, %version, "Resolved version");
        Ok(version)
    }

    /// Download, extract and cache `version`, returning the cached directory.
    async fn fetch(&self, version: &str, os: Os) -> Result<PathBuf> {
        let url = self.settings.download_url(version, os);
        info!(%url, "Downloading {}", os.archive_name());

        let workdir = self.workdir()?;
        let archive = workdir.path().join(os.archive_name());
        AssetDownloader::new(&self.settings)?
            .download(&url, &archive)
            .await?;

        let extracted = extract::extract(&archive, os.archive_kind(), &workdir.path().join("extracted"))?;
        self.cache
            .cache_dir(&extracted, &self.settings.tool, version, &self.arch)
    }

    fn workdir(&self) -> Result<tempfile::TempDir> {
        std::fs::create_dir_all(&self.temp_root)?;
        let dir = tempfile::Builder::new()
            .prefix("setup-applanga-")
            .tempdir_in(&self.temp_root)?;
        debug!(path = ?dir.path(), "Created download directory");
        Ok(dir)
    }
}

/// Download root from `RUNNER_TEMP`, falling back to the system temp directory.
#[must_use]
pub fn default_temp_root(configured: Option<&Path>) -> PathBuf {
    configured
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(std::env::temp_dir, Path::to_path_buf)
}
