//! Error types for grid construction.

use std::fmt;

/// Errors arising from grid construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A grid side length was zero.
    EmptySide {
        /// The offending dimension list.
        dims: Vec<usize>,
    },
    /// The dimension list was not rank 2 or rank 3.
    BadRank {
        /// The offending rank.
        rank: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySide { dims } => write!(f, "grid sides must be nonzero, got {dims:?}"),
            Self::BadRank { rank } => write!(f, "grids must be 2D or 3D, got rank {rank}"),
        }
    }
}

impl std::error::Error for GridError {}
