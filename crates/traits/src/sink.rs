//! FileSink trait for abstracting the host's file-save primitive.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("Failed to save '{filename}': {source}")]
    Io {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

/// Where and how much was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub filename: String,
    /// Filesystem location, for sinks that write to disk.
    pub location: Option<PathBuf>,
    pub size: usize,
}

/// A destination for finished documents: a download, a directory, a buffer.
///
/// `save` is always the last step of an export; a sink is never handed a
/// partial document.
pub trait FileSink: Send + Sync {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<SavedFile, SaveError>;

    /// Returns a human-readable name for this sink (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Rejects names that are empty or would escape the sink's destination.
pub fn validate_filename(filename: &str) -> Result<(), SaveError> {
    let trimmed = filename.trim();
    if trimmed.is_empty()
        || trimmed.contains(['/', '\\'])
        || trimmed == "."
        || trimmed == ".."
    {
        return Err(SaveError::InvalidName(filename.to_string()));
    }
    Ok(())
}
