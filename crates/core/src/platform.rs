//! Host platform detection and archive selection.
//!
//! Each supported operating system maps to exactly one published archive:
//!
//! | OS      | Archive                 | Format |
//! |---------|-------------------------|--------|
//! | windows | `applanga_windows.zip`  | zip    |
//! | macOS   | `applanga_osx.tar.gz`   | tar.gz |
//! | linux   | `applanga_linux.tar.gz` | tar.gz |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Operating systems with a published archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    /// Windows (`applanga_windows.zip`)
    Windows,
    /// macOS (`applanga_osx.tar.gz`)
    Darwin,
    /// Linux (`applanga_linux.tar.gz`)
    Linux,
}

impl Os {
    /// Detect the host operating system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] on any other host.
    pub fn current() -> Result<Self> {
        Self::parse(std::env::consts::OS)
            .ok_or_else(|| Error::unsupported_platform(std::env::consts::OS))
    }

    /// Parse from string, accepting Rust and Node.js platform names.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "windows" | "win32" => Some(Self::Windows),
            "darwin" | "macos" | "osx" => Some(Self::Darwin),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }

    /// File name of the release asset for this OS.
    #[must_use]
    pub fn archive_name(self) -> &'static str {
        match self {
            Self::Windows => "applanga_windows.zip",
            Self::Darwin => "applanga_osx.tar.gz",
            Self::Linux => "applanga_linux.tar.gz",
        }
    }

    /// Archive format of the release asset for this OS.
    #[must_use]
    pub fn archive_kind(self) -> ArchiveKind {
        match self {
            Self::Windows => ArchiveKind::Zip,
            Self::Darwin | Self::Linux => ArchiveKind::TarGz,
        }
    }

    /// Whether extracted binaries need their executable bit set.
    #[must_use]
    pub fn needs_executable_bit(self) -> bool {
        !matches!(self, Self::Windows)
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::Darwin => write!(f, "darwin"),
            Self::Linux => write!(f, "linux"),
        }
    }
}

/// Archive formats used by the published assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveKind {
    /// Zip archive
    Zip,
    /// Gzip-compressed tarball
    TarGz,
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zip => write!(f, "zip"),
            Self::TarGz => write!(f, "tar.gz"),
        }
    }
}

/// Host architecture in runner tool-cache naming (`x64`, `arm64`, ...).
#[must_use]
pub fn current_arch() -> String {
    runner_arch(std::env::consts::ARCH)
}

/// Map a Rust architecture name to the runner tool-cache naming.
///
/// Unknown architectures pass through unchanged.
#[must_use]
pub fn runner_arch(arch: &str) -> String {
    match arch {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "ia32",
        other => other,
    }
    .to_string()
}
