//! GitHub-facing endpoints for setup-applanga.
//!
//! - [`ReleaseCatalog`] - lists published releases of the tool
//! - [`SubscriptionGate`] - checks the action subscription before a run
//! - [`AssetDownloader`] - downloads release archives
//!
//! Every client takes its endpoint and timeout from
//! [`setup_applanga_core::Settings`].

mod catalog;
mod download;
pub mod http;
pub mod subscription;

pub use catalog::ReleaseCatalog;
pub use download::AssetDownloader;
pub use subscription::{REJECTION_MESSAGE, SubscriptionGate, SubscriptionStatus};
