//! Error types for the curator.
//!
//! Notebook and file content never produce errors (they degrade to removed
//! content); these cover the folder, sink and configuration layers.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for curator operations
pub type Result<T> = std::result::Result<T, CuratorError>;

/// Errors raised outside the content path.
#[derive(Error, Debug)]
pub enum CuratorError {
    #[error("Data folder not found: {}", .path.display())]
    FolderNotFound { path: PathBuf },

    #[error("Failed to walk data folder: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Requested folder {} is not inside {}", .path.display(), .root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
