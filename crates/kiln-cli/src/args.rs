//! Command-line surface.

use clap::Parser;
use std::path::PathBuf;

/// Run reaction cellular-automaton recipes against a reaction library.
#[derive(Parser, Debug)]
#[command(name = "kiln", version)]
pub struct Cli {
    /// Path to a recipe file or a directory of recipe files.
    pub recipe_location: PathBuf,

    /// Directory the recipe location is resolved relative to.
    #[arg(short = 'd', long)]
    pub input_dir: Option<PathBuf>,

    /// Explicit output file; only valid for single-recipe runs.
    #[arg(short = 'o', long)]
    pub output_file: Option<PathBuf>,

    /// Directory to write artifacts into (default: each recipe's own
    /// directory).
    #[arg(short = 'p', long)]
    pub output_dir: Option<PathBuf>,

    /// Write a compressed artifact instead of the raw result.
    #[arg(short = 'c', long, overrides_with = "no_compress")]
    pub compress: bool,

    /// Negate a preceding --compress.
    #[arg(long = "no-compress", hide = true)]
    pub no_compress: bool,

    /// Path to the reaction library document.
    #[arg(short = 'l', long, required = true)]
    pub reaction_library_file: PathBuf,

    /// Prior simulation snapshot used to seed every run.
    #[arg(short = 'i', long)]
    pub initial_simulation_file: Option<PathBuf>,

    /// Use the single-threaded execution strategy (default: parallel).
    #[arg(short = 's', long)]
    pub single: bool,

    /// Retain the reaction library inside compressed output.
    #[arg(long, overrides_with = "no_store_lib")]
    pub store_lib: bool,

    /// Negate a preceding --store-lib.
    #[arg(long = "no-store-lib", hide = true)]
    pub no_store_lib: bool,

    /// Worker pool size for the parallel strategy (default: available
    /// parallelism).
    #[arg(long)]
    pub workers: Option<usize>,
}

impl Cli {
    /// The recipe location, joined onto `--input-dir` when one was given.
    pub fn resolved_location(&self) -> PathBuf {
        match &self.input_dir {
            Some(dir) => dir.join(&self.recipe_location),
            None => self.recipe_location.clone(),
        }
    }
}
