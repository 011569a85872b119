//! Error handling for the story editor store
//!
//! Most store operations degrade silently instead of failing. The errors
//! here cover what does reach a caller: host commands, settings validation,
//! and loading documents or configuration from disk.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for story editor operations
pub type Result<T> = std::result::Result<T, StoryError>;

/// Main error type for story editor operations
#[derive(Error, Debug)]
pub enum StoryError {
    // Host Errors
    #[error("Host rejected attribute update on block {block}: {reason}")]
    HostWriteRejected { block: String, reason: String },

    #[error("Host rejected document meta update: {reason}")]
    MetaWriteRejected { reason: String },

    #[error("Block not found: {block}")]
    BlockNotFound { block: String },

    // Settings Errors
    #[error("Invalid auto-advance duration: {value} (expected 0..=100 seconds)")]
    InvalidDuration { value: i64 },

    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid document: {reason}")]
    InvalidDocument { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoryError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            StoryError::HostWriteRejected { .. } => "HOST_WRITE_REJECTED",
            StoryError::MetaWriteRejected { .. } => "META_WRITE_REJECTED",
            StoryError::BlockNotFound { .. } => "BLOCK_NOT_FOUND",
            StoryError::InvalidDuration { .. } => "INVALID_DURATION",
            StoryError::InvalidSetting { .. } => "INVALID_SETTING",
            StoryError::FileNotFound { .. } => "FILE_NOT_FOUND",
            StoryError::InvalidDocument { .. } => "INVALID_DOCUMENT",
            StoryError::Io(_) => "IO_ERROR",
            StoryError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable by re-issuing the edit
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoryError::HostWriteRejected { .. }
                | StoryError::MetaWriteRejected { .. }
                | StoryError::InvalidDuration { .. }
                | StoryError::InvalidSetting { .. }
        )
    }
}
