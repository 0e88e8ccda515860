//! File System Capability Layer
//!
//! Provides the narrow set of filesystem operations the domain logic consumes:
//! - Document text read/write
//! - Non-recursive directory listing filtered to image files
//! - Existence-guarded rename
//!
//! All operations are synchronous, direct, and non-atomic.

mod document;
mod listing;
mod ops;

pub use document::{read_text, write_text};
pub use listing::{file_stem, is_image_file, list_image_files, IMAGE_EXTENSIONS};
pub use ops::rename_if_present;

use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
