//! Error types for alert ingestion

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while ingesting alert emails
#[derive(Error, Debug)]
pub enum AlertError {
    /// Input root is missing or not a directory
    #[error("Invalid folder path: {}", .path.display())]
    InvalidDirectory { path: PathBuf },

    /// Container file could not be decoded
    #[error("Failed to decode {}: {details}", .file.display())]
    ContainerDecode { file: PathBuf, details: String },

    /// Decoded container carried no plain-text body
    #[error("Email is empty: {}", .file.display())]
    EmptyBody { file: PathBuf },

    /// Intermediate text buffer could not be written or read back
    #[error("Text buffer failed for {}: {source}", .file.display())]
    Buffer {
        file: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output document could not be persisted
    #[error("JSON write unsuccessful for {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A previously written document could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize alerts: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to deserialize alerts: {0}")]
    Deserialize(#[source] serde_json::Error),
}

impl AlertError {
    /// Whether this error halts a run, as opposed to skipping one file
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::ContainerDecode { .. } | Self::EmptyBody { .. } | Self::Buffer { .. }
        )
    }
}

/// Result type for alert ingestion operations
pub type Result<T> = std::result::Result<T, AlertError>;
