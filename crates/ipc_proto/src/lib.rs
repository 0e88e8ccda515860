//! IPC Protocol definitions for UI <-> file-system host communication
//!
//! This crate defines the shared data structures and protocol for inter-process
//! communication between the UI process and the privileged file-system host.
//! Field names are camelCase on the wire because the UI consumes them as JSON
//! object keys.

use serde::{Deserialize, Serialize};

/// One correlated unit between `<picture>` markup and a disk asset.
///
/// Records are created fresh on every parse and owned by the caller; the host
/// never stores them between calls. The caller edits `image_name`, `alt`,
/// `modified` and `suffix_match`, then hands records back for apply/revert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// 1-based position of discovery in document order. Only stable within
    /// a single parse pass.
    pub index: u32,

    /// Source path exactly as found in markup (e.g. `banners/hero.jpg`).
    /// Immutable once parsed.
    pub original_path: String,

    /// Caller-editable target file name, including extension.
    pub image_name: String,

    /// Caller-editable accessibility text. May be empty.
    pub alt: String,

    /// Alt text as first parsed. Captured at parse time and never mutated;
    /// the revert path restores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_alt: Option<String>,

    /// Second-to-last `/`-segment of `original_path`, or `"default"` when
    /// the path has fewer than two segments. Derived exactly once, at parse.
    pub group_name: String,

    /// Verbatim substring of the document for this record's enclosing
    /// `<picture>` block at parse time. Match key for replacement and the
    /// undo fallback.
    pub picture_html: String,

    /// Resolved preview reference for the UI (`local-image://` scheme), or
    /// absent when no matching file was found at parse time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_path: Option<String>,

    /// Advisory caller-settable flag; not used by engine correctness logic.
    pub modified: bool,

    /// When set and non-blank, enables the dual-match renaming policy:
    /// a file matches on exact stem OR stem + suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix_match: Option<String>,
}

/// Named group of parsed records, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    /// Parse order within the group.
    pub images: Vec<ImageRecord>,
}

/// Commands sent from the UI process to the file-system host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostCommand {
    /// Parse a document and return records grouped for presentation.
    ParseDocument {
        html_path: String,
        image_folders: Vec<String>,
    },

    /// Apply edited records: rewrite the document and rename matching files.
    ApplyChanges {
        html_path: String,
        group_name: String,
        images: Vec<ImageRecord>,
        image_folders: Vec<String>,
    },

    /// Revert a single record: restore document text and file names.
    RevertChange {
        html_path: String,
        group_name: String,
        image: Box<ImageRecord>,
        image_folders: Vec<String>,
    },

    /// Health check.
    Ping,

    /// Graceful shutdown.
    Shutdown,
}

/// Responses from the file-system host to the UI process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostResponse {
    /// Parse result: groups in first-seen order plus the total record count.
    Parsed {
        groups: Vec<Group>,
        total_images: u32,
    },

    /// Apply finished without unexpected errors. Individual no-op rewrites
    /// and skipped renames are not reported.
    Applied,

    /// Revert finished without unexpected errors.
    Reverted,

    /// Pong response to Ping.
    Pong,

    /// Acknowledgement of Shutdown; no further frames follow.
    ShuttingDown,

    /// Operation aborted; partially-applied renames are not rolled back.
    Error { code: ErrorCode, message: String },
}

/// Error codes for IPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    DocumentNotFound,
    Io,
    Protocol,
    Unknown,
}
