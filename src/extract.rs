//! Archive extraction
//!
//! Release archives are gzip-compressed tarballs holding the executable,
//! either at the root or below a single top-level directory.

use crate::error::{LauncherError, LauncherResult};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

/// Extract a tar.gz archive into `dest`, returning the extracted file paths
/// relative to `dest`
pub fn extract_tar_gz(archive_path: &Path, dest: &Path) -> LauncherResult<Vec<PathBuf>> {
    fs::create_dir_all(dest)
        .map_err(|e| LauncherError::io(format!("creating {}", dest.display()), e))?;

    let file = File::open(archive_path)
        .map_err(|e| LauncherError::io(format!("opening {}", archive_path.display()), e))?;
    let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
    archive.set_preserve_permissions(true);

    let fail = |reason: String| LauncherError::extraction(archive_path, reason);

    let mut extracted = Vec::new();
    for entry in archive.entries().map_err(|e| fail(e.to_string()))? {
        let mut entry = entry.map_err(|e| fail(e.to_string()))?;
        let relative: PathBuf = entry.path().map_err(|e| fail(e.to_string()))?.into_owned();

        // Reject entries that would land outside the destination
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
        {
            return Err(fail(format!("invalid path in archive: {}", relative.display())));
        }

        let is_dir = entry.header().entry_type().is_dir();
        entry
            .unpack_in(dest)
            .map_err(|e| fail(format!("{}: {}", relative.display(), e)))?;

        if !is_dir {
            trace!("Extracted {}", relative.display());
            extracted.push(relative);
        }
    }

    debug!(
        files = extracted.len(),
        "Extracted {} into {}",
        archive_path.display(),
        dest.display()
    );
    Ok(extracted)
}

/// Find a regular file named `file_name` anywhere below `dir`.
///
/// Entries are visited depth-first in name order so the result is stable.
pub fn find_binary(dir: &Path, file_name: &str, archive_name: &str) -> LauncherResult<PathBuf> {
    search(dir, file_name)?.ok_or_else(|| LauncherError::BinaryNotFound {
        name: file_name.to_string(),
        archive: archive_name.to_string(),
    })
}

fn search(dir: &Path, file_name: &str) -> LauncherResult<Option<PathBuf>> {
    let read = fs::read_dir(dir)
        .map_err(|e| LauncherError::io(format!("reading {}", dir.display()), e))?;

    let mut entries = read
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LauncherError::io(format!("reading {}", dir.display()), e))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| LauncherError::io(format!("inspecting {}", path.display()), e))?;

        if file_type.is_file() && entry.file_name() == file_name {
            return Ok(Some(path));
        }
        if file_type.is_dir() {
            if let Some(found) = search(&path, file_name)? {
                return Ok(Some(found));
            }
        }
    }

    Ok(None)
}
