//! Document text read/write

use crate::{FsError, Result};
use std::fs;
use std::path::Path;

/// Read a UTF-8 text document.
///
/// A missing document fails loudly; callers treat this as an abort of the
/// whole operation.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FsError::NotFound(path.display().to_string()));
    }

    Ok(fs::read_to_string(path)?)
}

/// Write a UTF-8 text document in place.
///
/// A direct, non-atomic write. The document and the filesystem are only
/// consistent with each other when the whole operation runs to completion.
pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();

    fs::write(path, text)?;
    tracing::debug!("Wrote {} bytes to {}", text.len(), path.display());

    Ok(())
}
