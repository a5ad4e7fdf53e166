//! Locating raw scans and metadata records on disk
//!
//! The export tree is expected to be extracted already; these helpers only
//! walk it.

use crate::error::{OctcatError, Result};
use crate::types::AcquisitionType;
use log::{debug, info};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Marker in the names of per-visit subdirectories
pub const DATA_DIRECTORY_MARKER: &str = "RIDE_";

/// Finds the single raw scan file for an acquisition type
///
/// # Errors
///
/// Returns [`OctcatError::NoMatchFound`] if no file matches and
/// [`OctcatError::AmbiguousSourceFile`] if more than one does.
pub fn find_raw_volume(directory: &Path, acquisition: AcquisitionType) -> Result<PathBuf> {
    let mut candidates = Vec::new();
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| acquisition.matches_raw_file_name(name));
        if matches {
            candidates.push(entry.into_path());
        }
    }

    match candidates.len() {
        0 => Err(OctcatError::NoMatchFound {
            acquisition,
            directory: directory.to_path_buf(),
        }),
        1 => {
            let path = candidates.remove(0);
            debug!("Raw data for {}: {}", acquisition, path.display());
            Ok(path)
        }
        _ => Err(OctcatError::AmbiguousSourceFile {
            acquisition,
            candidates,
        }),
    }
}

/// Collects every DICOM file (`.dcm`, any case) below a directory
pub fn find_metadata_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_dicom_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    debug!("Found {} DICOM files in {}", files.len(), directory.display());
    Ok(files)
}

/// Lists the data directories to process
///
/// Without `recursive` the root itself is the only data directory. With it,
/// every subdirectory whose name contains `RIDE_` is returned instead.
pub fn discover_data_directories(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !recursive {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut directories = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let is_data_dir = entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.contains(DATA_DIRECTORY_MARKER));
        if is_data_dir {
            directories.push(entry.into_path());
        }
    }
    info!(
        "Found {} data directories below {}",
        directories.len(),
        root.display()
    );
    Ok(directories)
}

fn is_dicom_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dcm"))
}
