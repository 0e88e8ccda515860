//! Guarded rename

use crate::Result;
use std::fs;
use std::path::Path;

/// Rename `from` to `to` if the source still exists.
///
/// Returns `false` when the source is already gone; a file deleted externally
/// between listing and rename is treated as already handled, not as an error.
pub fn rename_if_present(from: &Path, to: &Path) -> Result<bool> {
    if !from.exists() {
        tracing::debug!("Skipping rename of missing file: {}", from.display());
        return Ok(false);
    }

    fs::rename(from, to)?;
    tracing::info!("Renamed: {} -> {}", from.display(), to.display());

    Ok(true)
}
