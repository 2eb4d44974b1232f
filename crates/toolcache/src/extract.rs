//! Archive extraction for downloaded release assets.

use flate2::read::GzDecoder;
use setup_applanga_core::{ArchiveKind, Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, trace};

/// Extract `archive` into `dest` using the extractor for `kind`.
///
/// # Errors
///
/// Returns [`Error::Extraction`] if the archive is corrupt and [`Error::Io`]
/// if files cannot be written.
pub fn extract(archive: &Path, kind: ArchiveKind, dest: &Path) -> Result<PathBuf> {
    match kind {
        ArchiveKind::Zip => extract_zip(archive, dest),
        ArchiveKind::TarGz => extract_tar_gz(archive, dest),
    }
}

/// Extract every entry of a zip archive into `dest`.
///
/// Entries whose names would escape `dest` are skipped. Unix modes stored in
/// the archive are applied to the extracted files.
///
/// # Errors
///
/// Returns [`Error::Extraction`] if the archive cannot be read.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<PathBuf> {
    debug!(?archive, ?dest, "Extracting zip archive");

    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| Error::extraction(archive, format!("failed to open zip: {e}")))?;

    std::fs::create_dir_all(dest)?;

    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| Error::extraction(archive, format!("failed to read zip entry: {e}")))?;

        let Some(relative) = entry.enclosed_name() else {
            trace!(name = entry.name(), "Skipping unsafe zip entry");
            continue;
        };
        let outpath = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath)?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&outpath)?;
        std::io::copy(&mut entry, &mut out)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
        }
    }

    Ok(dest.to_path_buf())
}

/// Extract a gzip-compressed tarball into `dest`.
///
/// # Errors
///
/// Returns [`Error::Extraction`] if the archive cannot be unpacked.
pub fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<PathBuf> {
    debug!(?archive, ?dest, "Extracting tar.gz archive");

    let file = File::open(archive)?;
    let mut tar = Archive::new(GzDecoder::new(BufReader::new(file)));
    tar.set_preserve_permissions(true);

    std::fs::create_dir_all(dest)?;
    tar.unpack(dest)
        .map_err(|e| Error::extraction(archive, format!("failed to extract tar: {e}")))?;

    Ok(dest.to_path_buf())
}

/// Set mode `0o755` on `path`. Does nothing on non-unix hosts.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file is missing or its mode cannot be changed.
#[cfg(unix)]
pub fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms)?;
    trace!(?path, "Marked executable");
    Ok(())
}

/// Set mode `0o755` on `path`. Does nothing on non-unix hosts.
///
/// # Errors
///
/// Never fails on non-unix hosts.
#[cfg(not(unix))]
pub fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}
