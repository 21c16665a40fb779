//! Batch execution over a set of recipe files.
//!
//! Setup failures (library, prior snapshot, bad flag combinations) abort
//! the whole invocation; anything that goes wrong for one recipe is
//! recorded and the batch moves on to the next.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{error, info};

use kiln_core::{LibraryError, ReactionLibrary, SimulationState, StateError};
use kiln_engine::{EngineError, ParallelRunner, Recipe, SerialRunner, Strategy};
use kiln_store::{
    compressed_path, output_path, squeeze, write_json, ResultDocument, RunMetadata, StoreError,
};

use crate::args::Cli;
use crate::locate::locate_recipes;

// ── errors ──────────────────────────────────────────────────────────────

/// Failures that abort the whole batch before any recipe runs.
#[derive(Debug)]
pub enum FatalError {
    /// The reaction library could not be loaded.
    Library(LibraryError),
    /// The prior simulation snapshot could not be loaded.
    State(StateError),
    /// The recipe location could not be enumerated.
    Locate {
        /// The location that failed to enumerate.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// `--output-file` was given but the location holds several recipes.
    OutputFileCollision {
        /// Number of recipes the location resolved to.
        count: usize,
    },
    /// The location resolved to no recipes at all.
    NoRecipes {
        /// The location that was searched.
        path: PathBuf,
    },
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library(e) => write!(f, "reaction library: {e}"),
            Self::State(e) => write!(f, "initial simulation snapshot: {e}"),
            Self::Locate { path, source } => {
                write!(f, "cannot enumerate '{}': {source}", path.display())
            }
            Self::OutputFileCollision { count } => write!(
                f,
                "--output-file names a single file but the location holds {count} recipes"
            ),
            Self::NoRecipes { path } => {
                write!(f, "no recipe files found at '{}'", path.display())
            }
        }
    }
}

impl std::error::Error for FatalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Library(e) => Some(e),
            Self::State(e) => Some(e),
            Self::Locate { source, .. } => Some(source),
            Self::OutputFileCollision { .. } | Self::NoRecipes { .. } => None,
        }
    }
}

impl From<LibraryError> for FatalError {
    fn from(e: LibraryError) -> Self {
        Self::Library(e)
    }
}

impl From<StateError> for FatalError {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}

/// A failure confined to one recipe of the batch.
#[derive(Debug)]
pub enum RecipeError {
    /// The recipe could not be loaded or executed.
    Engine(EngineError),
    /// The result could not be written out.
    Store(StoreError),
}

impl fmt::Display for RecipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(e) => e.fmt(f),
            Self::Store(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for RecipeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Engine(e) => Some(e),
            Self::Store(e) => Some(e),
        }
    }
}

impl From<EngineError> for RecipeError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

impl From<StoreError> for RecipeError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ── batch driver ────────────────────────────────────────────────────────

/// What a batch run produced.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Artifact paths written, one per successful recipe.
    pub written: Vec<PathBuf>,
    /// Recipes that failed, with the rendered cause.
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchOutcome {
    /// True when every recipe in the batch succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run every recipe the command line names.
///
/// The library and any prior snapshot are loaded once up front; each
/// recipe then runs in isolation, its failure logged and recorded
/// without stopping the rest of the batch.
///
/// # Errors
///
/// Returns a [`FatalError`] when the batch cannot start at all: an
/// unreadable library or snapshot, an unenumerable location, an empty
/// location, or `--output-file` combined with more than one recipe.
pub fn run(cli: &Cli) -> Result<BatchOutcome, FatalError> {
    let location = cli.resolved_location();
    let recipes = locate_recipes(&location).map_err(|source| FatalError::Locate {
        path: location.clone(),
        source,
    })?;
    if recipes.is_empty() {
        return Err(FatalError::NoRecipes { path: location });
    }
    if cli.output_file.is_some() && recipes.len() > 1 {
        return Err(FatalError::OutputFileCollision {
            count: recipes.len(),
        });
    }

    let library = ReactionLibrary::load(&cli.reaction_library_file)?;
    let initial = match &cli.initial_simulation_file {
        Some(path) => Some(SimulationState::load(path)?),
        None => None,
    };

    info!(recipes = recipes.len(), "starting batch");
    let mut outcome = BatchOutcome::default();
    for recipe_path in &recipes {
        match run_one(cli, recipe_path, &library, initial.as_ref()) {
            Ok(path) => {
                info!(recipe = %recipe_path.display(), output = %path.display(), "recipe complete");
                outcome.written.push(path);
            }
            Err(e) => {
                error!(recipe = %recipe_path.display(), error = %e, "recipe failed");
                outcome.failures.push((recipe_path.clone(), e.to_string()));
            }
        }
    }
    Ok(outcome)
}

/// Execute one recipe end to end and write its artifact.
fn run_one(
    cli: &Cli,
    recipe_path: &Path,
    library: &ReactionLibrary,
    initial: Option<&SimulationState>,
) -> Result<PathBuf, RecipeError> {
    let recipe = Recipe::load(recipe_path)?;
    let recipe_name = recipe
        .name
        .clone()
        .unwrap_or_else(|| fallback_name(recipe_path));

    // Derived before execution so a failed run never leaves the output
    // target ambiguous.
    let path = output_path(
        recipe_path,
        recipe.name.as_deref(),
        cli.output_file.as_deref(),
        cli.output_dir.as_deref(),
    );

    let strategy = if cli.single {
        Strategy::Serial
    } else {
        Strategy::Parallel
    };
    info!(
        recipe = %recipe_name,
        %strategy,
        steps = recipe.num_steps,
        seed = recipe.seed,
        "running recipe"
    );

    let started = Instant::now();
    let result = match strategy {
        Strategy::Serial => SerialRunner.run(&recipe, library, initial)?,
        Strategy::Parallel => {
            let runner = cli.workers.map(ParallelRunner::new).unwrap_or_default();
            runner.run(&recipe, library, initial)?
        }
    };
    let elapsed = started.elapsed();

    let metadata = RunMetadata::derive(&result, library.phases(), elapsed);
    let document = ResultDocument {
        recipe_name,
        strategy,
        seed: recipe.seed,
        steps: result.steps,
        library: Some(library.clone()),
        metadata: Some(metadata),
    };

    if cli.compress {
        let squeezed = squeeze(document, cli.store_lib);
        let path = compressed_path(&path);
        write_json(&path, &squeezed)?;
        Ok(path)
    } else {
        write_json(&path, &document)?;
        Ok(path)
    }
}

/// Recipe name used when the file declares none: the file stem.
fn fallback_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "recipe".to_string())
}
