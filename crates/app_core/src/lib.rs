//! Core Domain Logic
//!
//! This crate contains:
//! - Picture-tag parser (markup -> image records)
//! - Asset locator (group name -> folder, record -> preview)
//! - Synchronization engine (coupled document/file renames with undo)
//! - Group aggregator
//! - Error types
//! - Configuration

pub mod config;
pub mod engine;
pub mod error;
pub mod groups;
pub mod locator;
pub mod parser;

pub use config::{AppConfig, GeneralConfig, SeoConfig};
pub use engine::{apply_changes, parse_document, revert_change, ParseOutcome};
pub use error::SeoError;
pub use groups::group_records;
pub use locator::{resolve_folder, resolve_preview, PREVIEW_SCHEME};
pub use parser::{image_records, picture_blocks};

pub type Result<T> = std::result::Result<T, SeoError>;
