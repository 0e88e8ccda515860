//! Synchronization engine
//!
//! Applies coupled, reversible renames across a document's `<picture>` markup
//! and the matching image files on disk. The undo path re-derives intent from
//! the record's own fields; there is no persisted transaction log, so both
//! operations are best-effort rather than crash-safe.

use crate::error::SeoError;
use crate::{groups, locator, parser, Result};
use ipc_proto::{Group, ImageRecord};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};

static SRCSET_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)data-one-srcset="([^"]*)""#).unwrap());

static SRC_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)data-one-src="([^"]*)""#).unwrap());

static ALT_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)alt="([^"]*)""#).unwrap());

static IMG_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img([^>]*?)(\s*/?>)").unwrap());

/// Result of a parse call: records grouped for presentation plus the total
/// record count.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub groups: Vec<Group>,
    pub total_images: u32,
}

/// Parse a document and correlate its image records with files on disk.
///
/// Records are created fresh on every call; the caller owns them and
/// resupplies them for apply/revert.
pub fn parse_document(html_path: &Path, image_folders: &[PathBuf]) -> Result<ParseOutcome> {
    let text = load_document(html_path)?;

    let mut records: Vec<ImageRecord> = parser::image_records(&text).collect();
    for record in &mut records {
        if let Some(folder) = locator::resolve_folder(&record.group_name, image_folders) {
            record.preview_path = locator::resolve_preview(folder, &record.image_name);
        }
    }

    let total_images = records.len() as u32;
    tracing::info!(
        "Parsed {} image records from {}",
        total_images,
        html_path.display()
    );

    Ok(ParseOutcome {
        groups: groups::group_records(records),
        total_images,
    })
}

/// Apply a batch of edited records: rewrite each record's picture block in
/// the document and rename the matching files on disk.
///
/// Records are processed in caller-supplied order. A record whose captured
/// block no longer occurs verbatim in the running document (an earlier
/// rewrite overlapped it) skips its HTML update silently; file renaming
/// still proceeds. The document is written once, after the whole batch.
pub fn apply_changes(
    html_path: &Path,
    group_name: &str,
    records: &[ImageRecord],
    image_folders: &[PathBuf],
) -> Result<()> {
    let mut document = load_document(html_path)?;

    for record in records {
        let old_stem = app_fs::file_stem(basename(&record.original_path)).to_string();
        let new_stem = app_fs::file_stem(&record.image_name).to_string();

        let mut block = rewrite_sources(&record.picture_html, &old_stem, &new_stem);
        if !record.alt.trim().is_empty() {
            block = set_alt(&block, &record.alt);
        }

        document = replace_first(&document, &record.picture_html, &block);

        rename_variants(
            group_name,
            image_folders,
            &old_stem,
            &new_stem,
            record.suffix_match.as_deref(),
        )?;
    }

    app_fs::write_text(html_path, &document)?;
    tracing::info!(
        "Applied {} record(s) to {}",
        records.len(),
        html_path.display()
    );

    Ok(())
}

/// Revert a single record: restore the document text and file names changed
/// by a previous apply.
///
/// The block to operate on is the first `<picture>` block in the *current*
/// document containing the post-apply stem; when none does, the record's
/// originally-captured block is used as a best-effort fallback.
pub fn revert_change(
    html_path: &Path,
    group_name: &str,
    record: &ImageRecord,
    image_folders: &[PathBuf],
) -> Result<()> {
    let mut document = load_document(html_path)?;

    let old_stem = app_fs::file_stem(basename(&record.original_path)).to_string();
    let new_stem = app_fs::file_stem(&record.image_name).to_string();

    let current_block = parser::picture_blocks(&document)
        .find(|block| block.contains(new_stem.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| {
            tracing::warn!(
                "No block contains '{}'; falling back to the captured block",
                new_stem
            );
            record.picture_html.clone()
        });

    // Reverse the attribute rewrites, then restore the original alt.
    let mut restored = rewrite_sources(&current_block, &new_stem, &old_stem);
    if let Some(original_alt) = &record.original_alt {
        restored = restore_alt(&restored, original_alt);
    }

    document = replace_first(&document, &current_block, &restored);

    rename_variants(
        group_name,
        image_folders,
        &new_stem,
        &old_stem,
        record.suffix_match.as_deref(),
    )?;

    app_fs::write_text(html_path, &document)?;
    tracing::info!(
        "Reverted record {} in {}",
        record.index,
        html_path.display()
    );

    Ok(())
}

fn load_document(html_path: &Path) -> Result<String> {
    if !html_path.exists() {
        return Err(SeoError::DocumentNotFound(html_path.display().to_string()));
    }
    Ok(app_fs::read_text(html_path)?)
}

/// Last `/`-segment of a markup path.
fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Rewrite `data-one-srcset` and `data-one-src` attribute values inside one
/// block: any value whose file stem equals `from_stem` gets `to_stem`
/// substituted, each value keeping its own extension. Responsive variants may
/// legitimately differ in extension (`.jpg` vs `.webp`), so extensions are
/// never cross-assigned.
fn rewrite_sources(block: &str, from_stem: &str, to_stem: &str) -> String {
    let rewritten = rewrite_attr(block, &SRCSET_ATTR, "data-one-srcset", from_stem, to_stem);
    rewrite_attr(&rewritten, &SRC_ATTR, "data-one-src", from_stem, to_stem)
}

fn rewrite_attr(block: &str, re: &Regex, attr: &str, from_stem: &str, to_stem: &str) -> String {
    re.replace_all(block, |caps: &Captures| {
        let value = &caps[1];
        let (dir, file) = match value.rfind('/') {
            Some(i) => (&value[..=i], &value[i + 1..]),
            None => ("", value),
        };

        let stem = app_fs::file_stem(file);
        if stem == from_stem {
            let ext = &file[stem.len()..];
            format!("{attr}=\"{dir}{to_stem}{ext}\"")
        } else {
            caps[0].to_string()
        }
    })
    .into_owned()
}

/// Replace an existing `alt` attribute value, or inject one immediately
/// before the close of each `<img>` opening tag, preserving self-closing vs
/// non-self-closing form. Used by apply with the new alt; never called with
/// a blank value.
fn set_alt(block: &str, value: &str) -> String {
    if ALT_ATTR.is_match(block) {
        replace_alt(block, value)
    } else {
        inject_alt(block, value)
    }
}

/// Revert-side alt handling: an existing attribute is restored even to an
/// empty original, but a missing attribute is only injected for a non-blank
/// original.
fn restore_alt(block: &str, original_alt: &str) -> String {
    if ALT_ATTR.is_match(block) {
        replace_alt(block, original_alt)
    } else if !original_alt.trim().is_empty() {
        inject_alt(block, original_alt)
    } else {
        block.to_string()
    }
}

fn replace_alt(block: &str, value: &str) -> String {
    ALT_ATTR
        .replace(block, |_: &Captures| format!("alt=\"{value}\""))
        .into_owned()
}

fn inject_alt(block: &str, value: &str) -> String {
    IMG_TAG
        .replace_all(block, |caps: &Captures| {
            format!("<img{} alt=\"{}\"{}", &caps[1], value, &caps[2])
        })
        .into_owned()
}

/// Replace the first verbatim occurrence of `needle`, or return the document
/// unchanged when it no longer occurs.
fn replace_first(document: &str, needle: &str, replacement: &str) -> String {
    match document.find(needle) {
        Some(at) if !needle.is_empty() => {
            let mut out =
                String::with_capacity(document.len() - needle.len() + replacement.len());
            out.push_str(&document[..at]);
            out.push_str(replacement);
            out.push_str(&document[at + needle.len()..]);
            out
        }
        _ => {
            tracing::debug!("Block no longer present verbatim; skipping HTML update");
            document.to_string()
        }
    }
}

/// Rename every image file in the group's folder whose stem matches
/// `from_stem` under the dual-match policy.
///
/// With a non-blank suffix, a file matches on `from_stem` exactly or on
/// `from_stem + suffix` exactly; suffix matches keep the suffix in the new
/// name. Each file keeps its own extension. Files that vanished since the
/// listing are skipped.
fn rename_variants(
    group_name: &str,
    image_folders: &[PathBuf],
    from_stem: &str,
    to_stem: &str,
    suffix_match: Option<&str>,
) -> Result<()> {
    let Some(folder) = locator::resolve_folder(group_name, image_folders) else {
        tracing::warn!("No asset folder resolved for group '{}'", group_name);
        return Ok(());
    };

    let suffix = suffix_match.map(str::trim).filter(|s| !s.is_empty());

    for file in app_fs::list_image_files(folder)? {
        let stem = app_fs::file_stem(&file);

        let target_stem = if stem == from_stem {
            to_stem.to_string()
        } else if let Some(sfx) = suffix {
            if stem == format!("{from_stem}{sfx}") {
                format!("{to_stem}{sfx}")
            } else {
                continue;
            }
        } else {
            continue;
        };

        let ext = &file[stem.len()..];
        let from = folder.join(&file);
        let to = folder.join(format!("{target_stem}{ext}"));

        app_fs::rename_if_present(&from, &to)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DOC: &str = r#"<html><body>
<picture>
  <source data-one-srcset="images/banners/hero.webp" type="image/webp">
  <img data-one-src="images/banners/hero.jpg" alt="Hero banner">
</picture>
</body></html>"#;

    /// Fixture: document on disk plus a "banners" asset folder.
    fn fixture(doc: &str, files: &[&str]) -> (TempDir, PathBuf, Vec<PathBuf>) {
        let dir = tempfile::tempdir().unwrap();
        let html_path = dir.path().join("index.html");
        fs::write(&html_path, doc).unwrap();

        let folder = dir.path().join("banners");
        fs::create_dir(&folder).unwrap();
        for file in files {
            fs::write(folder.join(file), b"img").unwrap();
        }

        (dir, html_path, vec![folder])
    }

    fn parsed_record(html_path: &Path, folders: &[PathBuf]) -> ImageRecord {
        let outcome = parse_document(html_path, folders).unwrap();
        outcome.groups[0].images[0].clone()
    }

    #[test]
    fn test_apply_rewrites_document_and_renames_files() {
        let (_dir, html_path, folders) = fixture(DOC, &["hero.jpg", "hero.webp"]);

        let mut record = parsed_record(&html_path, &folders);
        record.image_name = "hero2.jpg".to_string();
        record.alt = "Updated banner".to_string();

        apply_changes(&html_path, "banners", &[record], &folders).unwrap();

        let text = fs::read_to_string(&html_path).unwrap();
        assert!(text.contains(r#"data-one-src="images/banners/hero2.jpg""#));
        assert!(text.contains(r#"data-one-srcset="images/banners/hero2.webp""#));
        assert!(text.contains(r#"alt="Updated banner""#));

        // Each variant keeps its own extension; nothing cross-assigned.
        assert!(folders[0].join("hero2.jpg").exists());
        assert!(folders[0].join("hero2.webp").exists());
        assert!(!folders[0].join("hero.jpg").exists());
    }

    #[test]
    fn test_round_trip_apply_then_revert() {
        let (_dir, html_path, folders) = fixture(DOC, &["hero.jpg"]);

        let mut record = parsed_record(&html_path, &folders);
        record.image_name = "hero2.jpg".to_string();
        record.alt = "Changed".to_string();

        apply_changes(&html_path, "banners", std::slice::from_ref(&record), &folders).unwrap();
        revert_change(&html_path, "banners", &record, &folders).unwrap();

        assert_eq!(fs::read_to_string(&html_path).unwrap(), DOC);
        assert!(folders[0].join("hero.jpg").exists());
        assert!(!folders[0].join("hero2.jpg").exists());
    }

    #[test]
    fn test_dual_match_renames_suffix_variants() {
        let (_dir, html_path, folders) =
            fixture(DOC, &["hero.jpg", "hero_sm.jpg", "hero_smaller.jpg"]);

        let mut record = parsed_record(&html_path, &folders);
        record.image_name = "hero2.jpg".to_string();
        record.suffix_match = Some("_sm".to_string());

        apply_changes(&html_path, "banners", std::slice::from_ref(&record), &folders).unwrap();

        assert!(folders[0].join("hero2.jpg").exists());
        assert!(folders[0].join("hero2_sm.jpg").exists());
        // Suffix matching is exact, not prefix-based.
        assert!(folders[0].join("hero_smaller.jpg").exists());

        revert_change(&html_path, "banners", &record, &folders).unwrap();

        assert!(folders[0].join("hero.jpg").exists());
        assert!(folders[0].join("hero_sm.jpg").exists());
        assert!(folders[0].join("hero_smaller.jpg").exists());
    }

    #[test]
    fn test_blank_suffix_match_disables_dual_match() {
        let (_dir, html_path, folders) = fixture(DOC, &["hero.jpg", "hero_sm.jpg"]);

        let mut record = parsed_record(&html_path, &folders);
        record.image_name = "hero2.jpg".to_string();
        record.suffix_match = Some("   ".to_string());

        apply_changes(&html_path, "banners", &[record], &folders).unwrap();

        assert!(folders[0].join("hero2.jpg").exists());
        assert!(folders[0].join("hero_sm.jpg").exists());
    }

    #[test]
    fn test_stale_block_skips_html_update_but_renames_files() {
        let (_dir, html_path, folders) = fixture(DOC, &["hero.jpg"]);

        let mut record = parsed_record(&html_path, &folders);
        record.image_name = "hero2.jpg".to_string();
        // Simulate an earlier record's rewrite having altered this block.
        record.picture_html = "<picture>gone</picture>".to_string();

        apply_changes(&html_path, "banners", &[record], &folders).unwrap();

        assert_eq!(fs::read_to_string(&html_path).unwrap(), DOC);
        assert!(folders[0].join("hero2.jpg").exists());
    }

    #[test]
    fn test_revert_falls_back_to_captured_block() {
        let (_dir, html_path, folders) = fixture(DOC, &["hero2.jpg"]);

        // The document was never rewritten (no block contains "hero2"), but
        // the files were renamed; revert still restores the file names and
        // leaves the document alone.
        let mut record = parsed_record(&html_path, &folders);
        record.image_name = "hero2.jpg".to_string();

        revert_change(&html_path, "banners", &record, &folders).unwrap();

        assert_eq!(fs::read_to_string(&html_path).unwrap(), DOC);
        assert!(folders[0].join("hero.jpg").exists());
        assert!(!folders[0].join("hero2.jpg").exists());
    }

    #[test]
    fn test_missing_file_is_skipped_without_error() {
        let (_dir, html_path, folders) = fixture(DOC, &[]);

        let mut record = parsed_record(&html_path, &folders);
        record.image_name = "hero2.jpg".to_string();

        apply_changes(&html_path, "banners", &[record], &folders).unwrap();

        let text = fs::read_to_string(&html_path).unwrap();
        assert!(text.contains("hero2.jpg"));
    }

    #[test]
    fn test_alt_injection_preserves_closing_form() {
        let self_closing = r#"<picture><img data-one-src="banners/a.jpg" /></picture>"#;
        let plain = r#"<picture><img data-one-src="banners/a.jpg"></picture>"#;

        assert_eq!(
            set_alt(self_closing, "Hi"),
            r#"<picture><img data-one-src="banners/a.jpg" alt="Hi" /></picture>"#
        );
        assert_eq!(
            set_alt(plain, "Hi"),
            r#"<picture><img data-one-src="banners/a.jpg" alt="Hi"></picture>"#
        );
    }

    #[test]
    fn test_restore_alt_handles_empty_original() {
        // Existing attribute is restored even to an empty value.
        assert_eq!(
            restore_alt(r#"<img alt="edited">"#, ""),
            r#"<img alt="">"#
        );
        // A missing attribute is not injected for a blank original.
        assert_eq!(restore_alt("<img>", ""), "<img>");
    }

    #[test]
    fn test_rewrite_keeps_per_value_extension() {
        let block = r#"<source data-one-srcset="g/hero.webp"><img data-one-src="g/hero.jpg">"#;
        let rewritten = rewrite_sources(block, "hero", "hero2");
        assert!(rewritten.contains(r#"data-one-srcset="g/hero2.webp""#));
        assert!(rewritten.contains(r#"data-one-src="g/hero2.jpg""#));
    }

    #[test]
    fn test_rewrite_leaves_other_stems_alone() {
        let block = r#"<img data-one-src="g/other.jpg">"#;
        assert_eq!(rewrite_sources(block, "hero", "hero2"), block);
    }

    #[test]
    fn test_missing_document_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_document(&dir.path().join("absent.html"), &[]);
        assert!(matches!(result, Err(SeoError::DocumentNotFound(_))));
    }

    #[test]
    fn test_parse_document_resolves_previews() {
        let (_dir, html_path, folders) = fixture(DOC, &["hero.jpg"]);

        let outcome = parse_document(&html_path, &folders).unwrap();
        assert_eq!(outcome.total_images, 1);
        assert_eq!(outcome.groups[0].name, "banners");

        let preview = outcome.groups[0].images[0].preview_path.as_deref().unwrap();
        assert!(preview.starts_with(locator::PREVIEW_SCHEME));
    }
}
