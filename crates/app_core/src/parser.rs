//! Picture-tag parser
//!
//! Extracts structured image records from raw HTML text. Structural matching
//! is string/regex based by design: untouched text is never rewritten, so
//! whitespace and attribute order outside the target attributes survive a
//! round trip exactly.

use ipc_proto::ImageRecord;
use once_cell::sync::Lazy;
use regex::Regex;

/// Non-greedy, case-insensitive, multi-line `<picture>` block. Unclosed
/// blocks never match.
static PICTURE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<picture[^>]*>.*?</picture>").unwrap());

static IMG_DATA_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<img[^>]*data-one-src="([^"]*)"[^>]*>"#).unwrap());

static IMG_ALT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<img[^>]*alt="([^"]*)"[^>]*>"#).unwrap());

/// Iterator over raw `<picture>` block substrings of a document.
///
/// The scan cursor lives in the iterator value itself; a fresh iterator over
/// the same text restarts from the top with identical results.
pub struct PictureBlocks<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for PictureBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let m = PICTURE_BLOCK.find_at(self.text, self.pos)?;
        self.pos = m.end();
        Some(m.as_str())
    }
}

/// Scan a document for non-overlapping `<picture>` blocks.
pub fn picture_blocks(text: &str) -> PictureBlocks<'_> {
    PictureBlocks { text, pos: 0 }
}

/// Iterator over image records of a document, in document order.
///
/// Blocks without a `data-one-src` attribute are not image-bearing and yield
/// no record; `index` counts only yielded records, starting at 1.
pub struct ImageRecords<'a> {
    blocks: PictureBlocks<'a>,
    index: u32,
}

impl Iterator for ImageRecords<'_> {
    type Item = ImageRecord;

    fn next(&mut self) -> Option<ImageRecord> {
        loop {
            let block = self.blocks.next()?;

            let Some(src_caps) = IMG_DATA_SRC.captures(block) else {
                continue;
            };
            let original_path = src_caps[1].to_string();

            let alt = IMG_ALT
                .captures(block)
                .map(|caps| caps[1].to_string())
                .unwrap_or_default();

            let (image_name, group_name) = derive_names(&original_path);

            self.index += 1;
            return Some(ImageRecord {
                index: self.index,
                original_path,
                image_name,
                alt: alt.clone(),
                original_alt: Some(alt),
                group_name,
                picture_html: block.to_string(),
                preview_path: None,
                modified: false,
                suffix_match: None,
            });
        }
    }
}

/// Lazily extract image records from raw HTML text.
pub fn image_records(text: &str) -> ImageRecords<'_> {
    ImageRecords {
        blocks: picture_blocks(text),
        index: 0,
    }
}

/// Split a markup source path into file name (last `/`-segment) and group
/// name (second-to-last segment, or `"default"`).
fn derive_names(original_path: &str) -> (String, String) {
    let parts: Vec<&str> = original_path.split('/').collect();

    let image_name = parts.last().copied().unwrap_or_default().to_string();
    let group_name = if parts.len() >= 2 {
        parts[parts.len() - 2].to_string()
    } else {
        "default".to_string()
    };

    (image_name, group_name)
}
