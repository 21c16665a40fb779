//! Recipes: named configurations describing one simulation run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use kiln_core::{ReactionLibrary, SimulationState, SiteState};
use kiln_lattice::{SquareGrid, DEFAULT_NEIGHBORHOOD_RADIUS};

use crate::error::EngineError;
use crate::rng;

fn default_dimensionality() -> usize {
    2
}

fn default_inertia() -> f64 {
    2.0
}

fn default_initial_volume() -> f64 {
    1.0
}

fn default_radius() -> u32 {
    DEFAULT_NEIGHBORHOOD_RADIUS
}

/// A named simulation configuration, read from a JSON file.
///
/// One recipe per file; immutable after load. The recipe's declared
/// `name` (when present) also names the output artifact.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recipe {
    /// Display name; falls back to the recipe's file name for outputs.
    #[serde(default)]
    pub name: Option<String>,
    /// Grid edge length.
    pub size: usize,
    /// Grid rank: 2 or 3.
    #[serde(default = "default_dimensionality")]
    pub dimensionality: usize,
    /// Number of simulation steps to run.
    pub num_steps: u64,
    /// Seed for every random decision in the run.
    #[serde(default)]
    pub seed: u64,
    /// Score of the always-available "do nothing" interaction.
    #[serde(default = "default_inertia")]
    pub inertia: f64,
    /// Gaseous species present in the reaction atmosphere.
    #[serde(default)]
    pub atmosphere: Vec<String>,
    /// Volume given to every site of a freshly built lattice.
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f64,
    /// Starting solid phases and their relative amounts. Used to scatter
    /// material over a fresh lattice; ignored when an initial snapshot
    /// seeds the run.
    #[serde(default)]
    pub reactants: IndexMap<String, f64>,
    /// Manhattan radius of the reaction neighborhood.
    #[serde(default = "default_radius")]
    pub neighborhood_radius: u32,
}

impl Recipe {
    /// Load a recipe from a JSON file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let file = File::open(path).map_err(|source| EngineError::RecipeIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| EngineError::RecipeParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The grid this recipe simulates on.
    pub fn grid(&self) -> Result<SquareGrid, EngineError> {
        Ok(SquareGrid::cube(self.size, self.dimensionality)?)
    }

    /// Build the starting lattice: every site drawn from `reactants`
    /// with probability proportional to its amount, deterministically
    /// from the recipe seed.
    pub fn initial_state(&self, library: &ReactionLibrary) -> Result<SimulationState, EngineError> {
        if self.reactants.is_empty() {
            return Err(EngineError::NoStartingMaterial);
        }
        for phase in self.reactants.keys() {
            if !library.phases().is_solid(phase) {
                return Err(EngineError::UnknownPhase {
                    phase: phase.clone(),
                    role: "reactant",
                });
            }
        }
        let grid = self.grid()?;
        let names: Vec<&String> = self.reactants.keys().collect();
        let weights: Vec<f64> = self.reactants.values().copied().collect();
        let mut rng = rng::setup_rng(self.seed);
        let sites = (0..grid.site_count())
            .map(|_| {
                // Non-empty reactants, so the draw always succeeds.
                let pick = rng::weighted_index(&weights, &mut rng).unwrap_or(0);
                SiteState {
                    phase: names[pick].clone(),
                    volume: self.initial_volume,
                }
            })
            .collect();
        Ok(SimulationState {
            dims: grid.dims(),
            sites,
            general: Default::default(),
        })
    }

    /// Check that every atmospheric species is a gaseous library phase.
    pub fn validate_atmosphere(&self, library: &ReactionLibrary) -> Result<(), EngineError> {
        for species in &self.atmosphere {
            if !library.phases().is_gas(species) {
                return Err(EngineError::UnknownPhase {
                    phase: species.clone(),
                    role: "atmospheric species",
                });
            }
        }
        Ok(())
    }
}
