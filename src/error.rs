//! Error types for asset_stage

use thiserror::Error;

/// Main error type for staging and import operations
#[derive(Error, Debug)]
pub enum AssetStageError {
    #[error("Staging error: {0}")]
    FileList(#[from] crate::file_list::FileListError),

    #[error("Import error: {0}")]
    Import(#[from] crate::import::ImportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path has no usable file name: {0}")]
    InvalidPath(String),
}

/// Result type alias for staging operations
pub type Result<T> = std::result::Result<T, AssetStageError>;
