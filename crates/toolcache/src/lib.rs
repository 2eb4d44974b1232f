//! Tool cache and archive handling for setup-applanga.
//!
//! - [`ToolCache`] - runner tool cache lookups and stores
//! - [`extract`] - zip and tar.gz extraction, executable-bit marking

mod cache;
pub mod extract;

pub use cache::{TOOL_CACHE_ENV, ToolCache, default_root};
pub use extract::{extract_tar_gz, extract_zip, mark_executable};
