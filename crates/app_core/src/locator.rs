//! Asset locator
//!
//! Maps a logical group name to a concrete asset folder and resolves preview
//! references for the UI.

use std::path::{Path, PathBuf};

/// URI scheme the UI uses to load previews through its custom protocol
/// handler instead of base64 payloads.
pub const PREVIEW_SCHEME: &str = "local-image://";

/// Select the asset folder for a group: first candidate whose path contains
/// the group name as a substring, or whose final segment equals it exactly.
///
/// First match wins in iteration order, so a partial substring match can
/// shadow an exact match listed later. Kept as-is for compatibility; the
/// behavior is locked down by tests.
pub fn resolve_folder<'a>(group_name: &str, folders: &'a [PathBuf]) -> Option<&'a PathBuf> {
    folders.iter().find(|folder| {
        folder.to_string_lossy().contains(group_name)
            || folder
                .file_name()
                .is_some_and(|name| name.to_string_lossy() == group_name)
    })
}

/// Resolve a preview reference for an image, or `None` when no file named
/// exactly `image_name` exists directly inside `folder`. No extension-agnostic
/// search.
pub fn resolve_preview(folder: &Path, image_name: &str) -> Option<String> {
    let path = folder.join(image_name);

    if path.exists() {
        Some(format!("{}{}", PREVIEW_SCHEME, path.display()))
    } else {
        None
    }
}
