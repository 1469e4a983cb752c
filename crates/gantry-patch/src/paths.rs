//! Repository path helpers

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PatchError, Result};

/// Resolve `path` against `root`. Absolute paths are returned as they are.
pub fn to_repo_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    root.join(path)
}

/// Files under `directory` matching the glob `pattern`, sorted
pub fn find_files(directory: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = directory.join(pattern);
    let full = full.to_string_lossy();
    let entries = glob::glob(&full).map_err(|e| PatchError::InvalidPattern {
        pattern: full.to_string(),
        message: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                debug!(error = %e, "skipping unreadable glob entry");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}
