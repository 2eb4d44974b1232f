//! Install the Applanga CLI on a GitHub Actions runner.
//!
//! - [`cli`] - inputs read from flags and the runner environment
//! - [`install`] - the installation flow
//! - [`actions`] - workflow commands and `GITHUB_PATH` handling
//! - [`tracing`] - log output setup

pub mod actions;
pub mod cli;
pub mod install;
pub mod tracing;

pub use actions::{GitHubActions, Runner};
pub use install::{InstallOutcome, InstallRequest, Installer};
