//! Error types for recipes and execution strategies.

use std::fmt;
use std::path::PathBuf;

use kiln_core::StateError;
use kiln_lattice::GridError;

/// Errors from loading recipes or executing a run.
#[derive(Debug)]
pub enum EngineError {
    /// The recipe file could not be read.
    RecipeIo {
        /// Path of the offending file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The recipe file is not valid JSON for the recipe schema.
    RecipeParse {
        /// Path of the offending file.
        path: PathBuf,
        /// The underlying deserialization error.
        source: serde_json::Error,
    },
    /// A recipe names a phase the library's phase set does not contain,
    /// or uses it in the wrong role (e.g. a solid in the atmosphere).
    UnknownPhase {
        /// The offending phase name.
        phase: String,
        /// The role the recipe used it in.
        role: &'static str,
    },
    /// The recipe lists no starting reactants and no initial snapshot
    /// was supplied.
    NoStartingMaterial,
    /// Grid construction failed.
    Grid(GridError),
    /// An initial snapshot failed validation.
    State(StateError),
    /// A parallel worker disconnected before the run finished.
    WorkerPool,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecipeIo { path, source } => {
                write!(f, "failed to read recipe '{}': {source}", path.display())
            }
            Self::RecipeParse { path, source } => {
                write!(f, "failed to parse recipe '{}': {source}", path.display())
            }
            Self::UnknownPhase { phase, role } => {
                write!(f, "recipe {role} '{phase}' is not usable with this library")
            }
            Self::NoStartingMaterial => {
                write!(f, "recipe lists no reactants and no initial snapshot was given")
            }
            Self::Grid(err) => write!(f, "{err}"),
            Self::State(err) => write!(f, "{err}"),
            Self::WorkerPool => write!(f, "a parallel worker disconnected mid-run"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RecipeIo { source, .. } => Some(source),
            Self::RecipeParse { source, .. } => Some(source),
            Self::Grid(err) => Some(err),
            Self::State(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GridError> for EngineError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<StateError> for EngineError {
    fn from(err: StateError) -> Self {
        Self::State(err)
    }
}
