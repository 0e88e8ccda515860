//! Domain error types

use ipc_proto::ErrorCode;
use thiserror::Error;

/// Main domain error type.
///
/// Anything surfaced here aborts the whole call; partially-applied renames
/// before the failing step are not rolled back.
#[derive(Error, Debug)]
pub enum SeoError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Invalid folder: {0}")]
    InvalidFolder(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SeoError {
    /// Wire-level error code for the IPC envelope.
    pub fn code(&self) -> ErrorCode {
        match self {
            SeoError::DocumentNotFound(_) => ErrorCode::DocumentNotFound,
            SeoError::Io(_) | SeoError::FolderNotFound(_) | SeoError::InvalidFolder(_) => {
                ErrorCode::Io
            }
            SeoError::Config(_) => ErrorCode::Unknown,
        }
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            SeoError::DocumentNotFound(path) => format!("HTML document not found: {}", path),
            SeoError::FolderNotFound(path) => format!("Asset folder not found: {}", path),
            _ => self.to_string(),
        }
    }
}

impl From<app_fs::FsError> for SeoError {
    fn from(e: app_fs::FsError) -> Self {
        match e {
            app_fs::FsError::NotFound(p) => SeoError::FolderNotFound(p),
            app_fs::FsError::NotADirectory(p) => SeoError::InvalidFolder(p),
            app_fs::FsError::Io(e) => SeoError::Io(e),
        }
    }
}
