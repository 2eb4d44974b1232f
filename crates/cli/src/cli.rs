//! Command-line and environment inputs.

use clap::Parser;
use setup_applanga_core::Settings;
use setup_applanga_core::settings::{
    DEFAULT_API_BASE, DEFAULT_DOWNLOAD_BASE, DEFAULT_SUBSCRIPTION_BASE,
};
use std::path::PathBuf;

use crate::install::InstallRequest;
use crate::tracing::{LogLevel, TracingConfig, TracingFormat};

/// Step inputs, read from the runner environment with flag overrides.
#[derive(Parser, Debug)]
#[command(name = "setup-applanga")]
#[command(about = "Install the Applanga CLI and add it to the PATH of later steps")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Exact tag or wildcard (*, x.*.*, x.y.*) to install
    #[arg(long = "tool-version", env = "INPUT_VERSION")]
    pub tool_version: Option<String>,

    /// Repository running the workflow (owner/name)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Tool cache root (defaults to the user cache directory)
    #[arg(long, env = "RUNNER_TOOL_CACHE")]
    pub tool_cache: Option<PathBuf>,

    /// Directory for downloads (defaults to the system temp directory)
    #[arg(long, env = "RUNNER_TEMP")]
    pub temp_dir: Option<PathBuf>,

    /// Release listing API base
    #[arg(long, env = "SETUP_APPLANGA_API_URL", default_value = DEFAULT_API_BASE, hide = true)]
    pub api_url: String,

    /// Release asset download base
    #[arg(long, env = "SETUP_APPLANGA_DOWNLOAD_URL", default_value = DEFAULT_DOWNLOAD_BASE, hide = true)]
    pub download_url: String,

    /// Subscription check base
    #[arg(long, env = "SETUP_APPLANGA_SUBSCRIPTION_URL", default_value = DEFAULT_SUBSCRIPTION_BASE, hide = true)]
    pub subscription_url: String,

    /// Set logging level
    #[arg(short = 'l', long, default_value = "info", value_enum)]
    pub level: LogLevel,

    /// Output logs in JSON format
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Endpoint settings for this run.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings::new()
            .with_api_base(&self.api_url)
            .with_download_base(&self.download_url)
            .with_subscription_base(&self.subscription_url)
    }

    /// The installation request described by the inputs.
    #[must_use]
    pub fn request(&self) -> InstallRequest {
        InstallRequest::new(
            self.tool_version.clone().unwrap_or_default(),
            self.repository.clone(),
        )
    }

    /// Tracing configuration from `--level` and `--json`.
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig {
            format: if self.json {
                TracingFormat::Json
            } else {
                TracingFormat::Compact
            },
            level: self.level.into(),
        }
    }
}
