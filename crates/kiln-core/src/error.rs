//! Error types for library and state documents.

use std::fmt;
use std::path::PathBuf;

/// Errors from loading or validating a reaction library.
#[derive(Debug)]
pub enum LibraryError {
    /// The library file could not be read.
    Io {
        /// Path of the offending file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The library file is not valid JSON for the library schema.
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// The underlying deserialization error.
        source: serde_json::Error,
    },
    /// A reaction refers to a phase that is not in the library's phase set.
    UnknownPhase {
        /// The reaction, rendered as an equation.
        reaction: String,
        /// The missing phase name.
        phase: String,
    },
    /// The library contains no reactions.
    Empty,
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read library '{}': {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse library '{}': {source}", path.display())
            }
            Self::UnknownPhase { reaction, phase } => {
                write!(f, "reaction '{reaction}' uses unknown phase '{phase}'")
            }
            Self::Empty => write!(f, "reaction library contains no reactions"),
        }
    }
}

impl std::error::Error for LibraryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors from loading or validating a simulation state snapshot.
#[derive(Debug)]
pub enum StateError {
    /// The snapshot file could not be read.
    Io {
        /// Path of the offending file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The snapshot file is not valid JSON for the state schema.
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// The underlying deserialization error.
        source: serde_json::Error,
    },
    /// The site list does not match the declared grid dimensions.
    SiteCountMismatch {
        /// Site count implied by the dimensions.
        expected: usize,
        /// Site count actually present.
        actual: usize,
    },
    /// The declared grid dimensions are unusable (wrong rank or zero side).
    BadDimensions {
        /// The offending dimension list.
        dims: Vec<usize>,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read state '{}': {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse state '{}': {source}", path.display())
            }
            Self::SiteCountMismatch { expected, actual } => {
                write!(f, "state has {actual} sites but dimensions imply {expected}")
            }
            Self::BadDimensions { dims } => {
                write!(f, "unusable grid dimensions {dims:?}")
            }
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
