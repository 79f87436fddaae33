//! Error types for fractide_io operations.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for frame and animation output.
///
/// The engine does not retry these; callers decide whether to discard, retry
/// or escalate. The simulated state stays valid either way.
#[derive(Error, Debug)]
pub enum OutputError {
    /// Frame could not be encoded to an image file
    #[error("Render-encode failure: {0}")]
    Encode(String),

    /// Animation could not be assembled from the frame sequence
    #[error("Assembly failure: {0}")]
    Assembly(String),

    /// A persisted frame could not be read back
    #[error("Frame decode failure for {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// Filesystem errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// Missing frames or runs
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for fractide_io operations.
pub type Result<T> = std::result::Result<T, OutputError>;

impl OutputError {
    #[must_use]
    pub fn encode<S: Into<String>>(msg: S) -> Self {
        Self::Encode(msg.into())
    }

    #[must_use]
    pub fn assembly<S: Into<String>>(msg: S) -> Self {
        Self::Assembly(msg.into())
    }

    #[must_use]
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound(what.into())
    }
}
