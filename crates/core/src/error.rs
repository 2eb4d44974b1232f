//! Error types shared by every setup-applanga crate.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for setup-applanga operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, fetching or installing the tool.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// An endpoint could not be reached or answered with a non-success status.
    #[error("Network error for {url}: {message}")]
    #[diagnostic(
        code(setup_applanga::network),
        help("Re-run the step; transient network failures are not retried")
    )]
    Network {
        /// The requested URL
        url: String,
        /// What went wrong
        message: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("Failed to parse response from {url}: {message}")]
    #[diagnostic(code(setup_applanga::parse))]
    Parse {
        /// The requested URL
        url: String,
        /// The decoder message
        message: String,
    },

    /// The version token contains a wildcard but matches no supported shape.
    #[error("Invalid version pattern: {pattern}. Accepted patterns: *, x.*.*, x.y.*")]
    #[diagnostic(
        code(setup_applanga::invalid_pattern),
        help("Use an exact tag such as 1.2.3, or one of the wildcards *, 1.*.* or 1.2.*")
    )]
    InvalidPattern {
        /// The pattern as supplied
        pattern: String,
    },

    /// The pattern is well formed but no eligible release qualifies.
    #[error("No matching version found for: {pattern}")]
    #[diagnostic(
        code(setup_applanga::no_match),
        help("Drafts and prereleases are never selected by a wildcard")
    )]
    NoMatch {
        /// The pattern as supplied
        pattern: String,
    },

    /// The host operating system has no published archive.
    #[error("Unsupported OS system: {os}")]
    #[diagnostic(
        code(setup_applanga::unsupported_platform),
        help("Archives are published for windows, macos and linux only")
    )]
    UnsupportedPlatform {
        /// The host OS identifier
        os: String,
    },

    /// The subscription endpoint explicitly rejected this repository.
    #[error("Subscription is not valid (HTTP {status})")]
    #[diagnostic(code(setup_applanga::subscription_rejected))]
    SubscriptionRejected {
        /// The HTTP status returned by the endpoint
        status: u16,
    },

    /// A downloaded archive could not be unpacked.
    #[error("Failed to extract {}: {message}", .archive.display())]
    #[diagnostic(code(setup_applanga::extraction))]
    Extraction {
        /// The archive being extracted
        archive: PathBuf,
        /// What went wrong
        message: String,
    },

    /// A tool cache operation failed.
    #[error("Tool cache error: {message}")]
    #[diagnostic(code(setup_applanga::cache))]
    Cache {
        /// What went wrong
        message: String,
        /// The cache path involved, if any
        path: Option<PathBuf>,
    },

    /// Invalid or missing configuration.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(setup_applanga::config))]
    Config {
        /// What went wrong
        message: String,
    },

    /// Wrapped I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(setup_applanga::io))]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a network error.
    #[must_use]
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
        }
    }

    /// Create a no-match error.
    #[must_use]
    pub fn no_match(pattern: impl Into<String>) -> Self {
        Self::NoMatch {
            pattern: pattern.into(),
        }
    }

    /// Create an unsupported platform error.
    #[must_use]
    pub fn unsupported_platform(os: impl Into<String>) -> Self {
        Self::UnsupportedPlatform { os: os.into() }
    }

    /// Create an extraction error.
    #[must_use]
    pub fn extraction(archive: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Extraction {
            archive: archive.into(),
            message: message.into(),
        }
    }

    /// Create a cache error.
    #[must_use]
    pub fn cache(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Cache {
            message: message.into(),
            path,
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this is the explicit subscription rejection that aborts the run.
    #[must_use]
    pub fn is_subscription_rejection(&self) -> bool {
        matches!(self, Self::SubscriptionRejected { .. })
    }
}
