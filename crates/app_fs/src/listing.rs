//! Directory listing filtered to image assets

use crate::{FsError, Result};
use std::fs;
use std::path::Path;

/// Image file extensions eligible for renaming. Video and other types are
/// excluded.
pub const IMAGE_EXTENSIONS: [&str; 11] = [
    "jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "ico", "tiff", "tif", "avif",
];

/// Check whether a file name carries one of the recognized image extensions
/// (case-insensitive).
pub fn is_image_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// File name up to its last extension.
///
/// A leading dot is not an extension separator: `.hidden` stays `.hidden`,
/// `hero.final.jpg` becomes `hero.final`.
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    }
}

/// List image file names directly inside `folder` (no recursion).
///
/// Subdirectories and non-image files are dropped. Order is whatever the
/// underlying directory iteration yields.
pub fn list_image_files<P: AsRef<Path>>(folder: P) -> Result<Vec<String>> {
    let folder = folder.as_ref();

    if !folder.exists() {
        return Err(FsError::NotFound(folder.display().to_string()));
    }

    if !folder.is_dir() {
        return Err(FsError::NotADirectory(folder.display().to_string()));
    }

    let mut names = Vec::new();

    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if is_image_file(&name) {
            names.push(name);
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_image_extension_filter() {
        assert!(is_image_file("hero.jpg"));
        assert!(is_image_file("hero.WEBP"));
        assert!(is_image_file("icon.avif"));
        assert!(!is_image_file("clip.mp4"));
        assert!(!is_image_file("notes.txt"));
        assert!(!is_image_file("jpg"));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("hero.jpg"), "hero");
        assert_eq!(file_stem("hero.final.jpg"), "hero.final");
        assert_eq!(file_stem("hero"), "hero");
        assert_eq!(file_stem(".hidden"), ".hidden");
    }

    #[test]
    fn test_list_image_files_filters_and_skips_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        fs::write(dir.path().join("b.webp"), b"x").unwrap();
        fs::write(dir.path().join("c.mp4"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let mut names = list_image_files(dir.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["a.jpg", "b.webp"]);
    }

    #[test]
    fn test_list_missing_folder_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = list_image_files(dir.path().join("nope"));
        assert!(matches!(result, Err(FsError::NotFound(_))));
    }
}
