use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use crate::utils::{AssetResult, PathError};

/// Only files with exactly this extension are rasterized.
pub const SOURCE_EXTENSION: &str = "svg";

/// Lists the immediate entries of `dir`, files and subdirectories alike.
///
/// Entries are sorted by name so planning is deterministic.
pub async fn list_entries(dir: impl AsRef<Path>) -> AssetResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut reader = fs::read_dir(dir)
        .await
        .map_err(|e| PathError::read_dir(dir, e))?;

    let mut entries = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|e| PathError::read_dir(dir, e))?
    {
        entries.push(entry.path());
    }
    entries.sort();

    debug!("Found {} entries in {}", entries.len(), dir.display());
    Ok(entries)
}

/// Case-sensitive check for the `.svg` extension.
pub fn is_svg_source(path: impl AsRef<Path>) -> bool {
    path.as_ref().extension() == Some(OsStr::new(SOURCE_EXTENSION))
}

/// Removes `dir` recursively if present, then creates it again.
///
/// The parent must already exist.
pub async fn recreate_dir(dir: impl AsRef<Path>) -> AssetResult<PathBuf> {
    let dir = dir.as_ref();
    let exists = fs::try_exists(dir)
        .await
        .map_err(|e| PathError::prepare(dir, e))?;
    if exists {
        debug!("Removing previous output folder {}", dir.display());
        fs::remove_dir_all(dir)
            .await
            .map_err(|e| PathError::prepare(dir, e))?;
    }
    fs::create_dir(dir)
        .await
        .map_err(|e| PathError::prepare(dir, e))?;
    Ok(dir.to_path_buf())
}
