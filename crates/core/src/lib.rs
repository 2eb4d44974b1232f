//! Core types for setup-applanga.
//!
//! This crate holds everything that does not touch the network or the
//! filesystem:
//!
//! - [`Release`] - a published release as listed by the release endpoint
//! - [`VersionPattern`] - an exact tag or a wildcard, and its resolution
//! - [`Os`] and [`ArchiveKind`] - host platform to archive mapping
//! - [`Settings`] - endpoints, names and timeouts
//! - [`Error`] - the error taxonomy shared by every crate
//!
//! # Example
//!
//! ```
//! use setup_applanga_core::{Release, resolve_version};
//!
//! let catalog = vec![Release::new("2.1.0"), Release::new("2.1.5"), Release::new("2.2.0")];
//! assert_eq!(resolve_version("2.1.*", &catalog).unwrap(), "2.1.5");
//! ```

mod error;
pub mod platform;
mod release;
pub mod settings;
pub mod version;

pub use error::{Error, Result};
pub use platform::{ArchiveKind, Os, current_arch};
pub use release::Release;
pub use settings::{Settings, TOOL_NAME};
pub use version::{VersionPattern, compare_tags, is_wildcard, resolve_version};
