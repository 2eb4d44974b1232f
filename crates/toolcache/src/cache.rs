//! Runner tool cache keyed by tool name, version and architecture.
//!
//! The layout matches the one used by other setup actions so that a runner
//! shares installs between them:
//!
//! ```text
//! $RUNNER_TOOL_CACHE/
//! └── applanga/
//!     └── 1.0.87/
//!         ├── x64/            # Extracted archive contents
//!         │   └── applanga
//!         └── x64.complete    # Written once the directory is fully populated
//! ```
//!
//! An entry without its `.complete` marker is treated as absent and is
//! replaced by the next store.

use setup_applanga_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Environment variable naming the runner tool cache root.
pub const TOOL_CACHE_ENV: &str = "RUNNER_TOOL_CACHE";

/// Tool cache rooted at a directory.
#[derive(Debug, Clone)]
pub struct ToolCache {
    root: PathBuf,
}

impl Default for ToolCache {
    fn default() -> Self {
        Self::new(default_root())
    }
}

impl ToolCache {
    /// Create a cache at the specified root directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the installed contents of one entry.
    #[must_use]
    pub fn entry_dir(&self, tool: &str, version: &str, arch: &str) -> PathBuf {
        self.root.join(tool).join(version).join(arch)
    }

    /// Marker file written once an entry is complete.
    #[must_use]
    pub fn marker_path(&self, tool: &str, version: &str, arch: &str) -> PathBuf {
        self.root
            .join(tool)
            .join(version)
            .join(format!("{arch}.complete"))
    }

    /// Look up a complete entry.
    #[must_use]
    pub fn find(&self, tool: &str, version: &str, arch: &str) -> Option<PathBuf> {
        if validate_key(tool, version, arch).is_err() {
            trace!(tool, version, arch, "Invalid cache key");
            return None;
        }

        let dir = self.entry_dir(tool, version, arch);
        if dir.is_dir() && self.marker_path(tool, version, arch).is_file() {
            debug!(tool, version, ?dir, "Cache hit");
            Some(dir)
        } else {
            debug!(tool, version, arch, "Cache miss");
            None
        }
    }

    /// Copy the contents of `source` into the cache and mark the entry complete.
    ///
    /// Any stale entry for the same key is removed first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if the key is invalid or `source` is not a
    /// directory, and [`Error::Io`] if copying fails.
    pub fn cache_dir(&self, source: &Path, tool: &str, version: &str, arch: &str) -> Result<PathBuf> {
        validate_key(tool, version, arch)?;
        if !source.is_dir() {
            return Err(Error::cache(
                "source is not a directory",
                Some(source.to_path_buf()),
            ));
        }

        let dest = self.entry_dir(tool, version, arch);
        let marker = self.marker_path(tool, version, arch);

        if marker.exists() {
            std::fs::remove_file(&marker)?;
        }
        if dest.exists() {
            std::fs::remove_dir_all(&dest)?;
        }
        std::fs::create_dir_all(&dest)?;

        copy_tree(source, &dest)?;
        std::fs::write(&marker, b"")?;

        debug!(tool, version, arch, ?dest, "Stored entry in tool cache");
        Ok(dest)
    }
}

/// Cache root from `RUNNER_TOOL_CACHE`, falling back to the user cache directory.
#[must_use]
pub fn default_root() -> PathBuf {
    std::env::var_os(TOOL_CACHE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from(".cache"))
                .join("setup-applanga")
                .join("tool-cache")
        })
}

/// Key components become path segments, so each must be a single plain segment.
fn validate_key(tool: &str, version: &str, arch: &str) -> Result<()> {
    for (name, value) in [("tool", tool), ("version", version), ("arch", arch)] {
        let plain = !value.is_empty()
            && value != "."
            && value != ".."
            && !value.contains(['/', '\\']);
        if !plain {
            return Err(Error::cache(format!("invalid {name} '{value}'"), None));
        }
    }
    Ok(())
}

fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.map_err(|e| {
            Error::cache(
                format!("failed to walk source directory: {e}"),
                Some(source.to_path_buf()),
            )
        })?;

        let relative = entry.path().strip_prefix(source).map_err(|e| {
            Error::cache(format!("unexpected path: {e}"), Some(entry.path().to_path_buf()))
        })?;
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            std::fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
        trace!(?target, "Copied into cache");
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let points_to = std::fs::read_link(link)?;
    std::os::unix::fs::symlink(points_to, target)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    std::fs::copy(link, target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populated_source(temp: &TempDir) -> PathBuf {
        let source = temp.path().join("extracted");
        std::fs::create_dir_all(source.join("lib")).unwrap();
        std::fs::write(source.join("applanga"), b"binary").unwrap();
        std::fs::write(source.join("lib").join("support.dat"), b"data").unwrap();
        source
    }

    #[test]
    fn test_cache_paths() {
        let cache = ToolCache::new(PathBuf::from("/tmp/cache"));
        assert_eq!(
            cache.entry_dir("applanga", "1.0.87", "x64"),
            PathBuf::from("/tmp/cache/applanga/1.0.87/x64")
        );
        assert_eq!(
            cache.marker_path("applanga", "1.0.87", "x64"),
            PathBuf::from("/tmp/cache/applanga/1.0.87/x64.complete")
        );
    }

    #[test]
    fn test_find_missing() {
        let temp = TempDir::new().unwrap();
        let cache = ToolCache::new(temp.path().to_path_buf());
        assert!(cache.find("applanga", "1.0.87", "x64").is_none());
    }

    #[test]
    fn test_store_and_find() -> Result<()> {
        let temp = TempDir::new()?;
        let source = populated_source(&temp);
        let cache = ToolCache::new(temp.path().join("cache"));

        let stored = cache.cache_dir(&source, "applanga", "1.0.87", "x64")?;

        assert_eq!(stored, cache.entry_dir("applanga", "1.0.87", "x64"));
        assert_eq!(cache.find("applanga", "1.0.87", "x64"), Some(stored.clone()));
        assert_eq!(std::fs::read(stored.join("applanga"))?, b"binary");
        assert_eq!(std::fs::read(stored.join("lib").join("support.dat"))?, b"data");
        assert!(cache.find("applanga", "1.0.88", "x64").is_none());
        assert!(cache.find("applanga", "1.0.87", "arm64").is_none());
        Ok(())
    }

    #[test]
    fn test_entry_without_marker_is_absent() -> Result<()> {
        let temp = TempDir::new()?;
        let cache = ToolCache::new(temp.path().to_path_buf());
        std::fs::create_dir_all(cache.entry_dir("applanga", "1.0.0", "x64"))?;
        assert!(cache.find("applanga", "1.0.0", "x64").is_none());
        Ok(())
    }

    #[test]
    fn test_store_replaces_stale_entry() -> Result<()> {
        let temp = TempDir::new()?;
        let source = populated_source(&temp);
        let cache = ToolCache::new(temp.path().join("cache"));

        let stale = cache.entry_dir("applanga", "1.0.87", "x64");
        std::fs::create_dir_all(&stale)?;
        std::fs::write(stale.join("leftover"), b"old")?;

        let stored = cache.cache_dir(&source, "applanga", "1.0.87", "x64")?;
        assert!(!stored.join("leftover").exists());
        assert!(stored.join("applanga").exists());

        // Storing the same key again is idempotent.
        let again = cache.cache_dir(&source, "applanga", "1.0.87", "x64")?;
        assert_eq!(stored, again);
        assert!(cache.find("applanga", "1.0.87", "x64").is_some());
        Ok(())
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let temp = TempDir::new().unwrap();
        let source = populated_source(&temp);
        let cache = ToolCache::new(temp.path().join("cache"));

        for version in ["", ".", "..", "../escape", "1.0/2"] {
            assert!(
                matches!(
                    cache.cache_dir(&source, "applanga", version, "x64"),
                    Err(Error::Cache { .. })
                ),
                "{version:?} should be rejected"
            );
            assert!(cache.find("applanga", version, "x64").is_none());
        }
    }

    #[test]
    fn test_source_must_be_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        std::fs::write(&file, b"x").unwrap();
        let cache = ToolCache::new(temp.path().join("cache"));
        assert!(matches!(
            cache.cache_dir(&file, "applanga", "1.0.0", "x64"),
            Err(Error::Cache { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_store_preserves_permissions() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new()?;
        let source = populated_source(&temp);
        std::fs::set_permissions(source.join("applanga"), std::fs::Permissions::from_mode(0o755))?;
        let cache = ToolCache::new(temp.path().join("cache"));

        let stored = cache.cache_dir(&source, "applanga", "1.0.87", "x64")?;
        let mode = std::fs::metadata(stored.join("applanga"))?.permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        Ok(())
    }

    #[test]
    fn test_default_root_uses_runner_tool_cache() {
        temp_env::with_var(TOOL_CACHE_ENV, Some("/opt/hostedtoolcache"), || {
            assert_eq!(default_root(), PathBuf::from("/opt/hostedtoolcache"));
        });
    }

    #[test]
    fn test_default_root_fallback() {
        temp_env::with_var_unset(TOOL_CACHE_ENV, || {
            assert!(default_root().ends_with("setup-applanga/tool-cache"));
        });
    }
}
