//! Error types for persistence.

use std::fmt;
use std::path::PathBuf;

/// Errors from writing result documents to storage.
#[derive(Debug)]
pub enum StoreError {
    /// The target file could not be created or written.
    Io {
        /// Path of the target artifact.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The document could not be serialized.
    Serialize {
        /// Path of the target artifact.
        path: PathBuf,
        /// The underlying serialization error.
        source: serde_json::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write '{}': {source}", path.display())
            }
            Self::Serialize { path, source } => {
                write!(f, "failed to serialize '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize { source, .. } => Some(source),
        }
    }
}
