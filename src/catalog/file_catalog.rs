use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::{MigrationError, Result};

/// A regular file found in the migration location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub file_name: String,
    pub path: PathBuf,
}

/// Lists the regular files in `location`. Subdirectories and names that are
/// not valid UTF-8 are skipped.
pub fn list(location: &Path) -> Result<Vec<CatalogEntry>> {
    let metadata =
        std::fs::metadata(location).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => MigrationError::NotADirectory(location.to_path_buf()),
            _ => MigrationError::io(location, e),
        })?;
    if !metadata.is_dir() {
        return Err(MigrationError::NotADirectory(location.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(location).map_err(|e| MigrationError::io(location, e))? {
        let entry = entry.map_err(|e| MigrationError::io(location, e))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| MigrationError::io(&path, e))?;
        if file_type.is_dir() {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(file_name) => entries.push(CatalogEntry { file_name, path }),
            Err(raw) => warn!("Skipping non UTF-8 file name {:?}", raw),
        }
    }

    debug!(
        "Found {} file(s) in {}",
        entries.len(),
        location.display()
    );
    Ok(entries)
}

/// Keeps the entries whose lowercased name ends with the lowercased `suffix`.
pub fn filter(entries: Vec<CatalogEntry>, suffix: &str) -> Vec<CatalogEntry> {
    let suffix = suffix.to_lowercase();
    entries
        .into_iter()
        .filter(|e| e.file_name.to_lowercase().ends_with(&suffix))
        .collect()
}
