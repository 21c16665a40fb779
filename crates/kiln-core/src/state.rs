//! Lattice simulation state snapshots.
//!
//! A [`SimulationState`] is one synchronous snapshot of the whole lattice:
//! per-site phase occupancy and volume, plus the general (non-spatial)
//! state that reactions update as a side effect: evolved gas totals and
//! the reaction chosen during the step that produced the snapshot.
//!
//! Snapshots are the unit of recording (one per step in a result
//! document) and the unit of seeding (a prior snapshot can start a new
//! run in place of a fresh lattice).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::StateError;
use crate::phases::FREE_SPACE;

/// The state of one lattice site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteState {
    /// Occupying phase name ([`FREE_SPACE`] when empty).
    pub phase: String,
    /// Amount of the occupying phase at this site.
    pub volume: f64,
}

/// Non-spatial state carried alongside the lattice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralState {
    /// Cumulative amount of each gaseous phase evolved out of the lattice.
    #[serde(default)]
    pub gases_evolved: IndexMap<String, f64>,
    /// Library index of the reaction chosen during the step that produced
    /// this snapshot, if any site reacted.
    #[serde(default)]
    pub reaction_chosen: Option<usize>,
}

/// One synchronous snapshot of the whole lattice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Grid side lengths: `[w, h]` for 2D, `[w, h, d]` for 3D.
    pub dims: Vec<usize>,
    /// Per-site state, indexed row-major.
    pub sites: Vec<SiteState>,
    /// Non-spatial state.
    #[serde(default)]
    pub general: GeneralState,
}

impl SimulationState {
    /// A lattice with every site holding `volume` of `phase`.
    pub fn filled(dims: Vec<usize>, phase: &str, volume: f64) -> Self {
        let count = dims.iter().product();
        Self {
            dims,
            sites: vec![
                SiteState {
                    phase: phase.to_string(),
                    volume,
                };
                count
            ],
            general: GeneralState::default(),
        }
    }

    /// An entirely empty lattice.
    pub fn empty(dims: Vec<usize>) -> Self {
        Self::filled(dims, FREE_SPACE, 0.0)
    }

    /// Load a snapshot from a JSON file, validating its shape.
    pub fn load(path: &Path) -> Result<Self, StateError> {
        let file = File::open(path).map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let state: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| StateError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        state.validate()?;
        Ok(state)
    }

    /// Check that dimensions are rank 2 or 3 with no zero side and that
    /// the site list matches them.
    pub fn validate(&self) -> Result<(), StateError> {
        if !(self.dims.len() == 2 || self.dims.len() == 3) || self.dims.contains(&0) {
            return Err(StateError::BadDimensions {
                dims: self.dims.clone(),
            });
        }
        let expected: usize = self.dims.iter().product();
        if self.sites.len() != expected {
            return Err(StateError::SiteCountMismatch {
                expected,
                actual: self.sites.len(),
            });
        }
        Ok(())
    }

    /// Number of lattice sites.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// The state of site `id`.
    pub fn site(&self, id: usize) -> &SiteState {
        &self.sites[id]
    }

    /// Add `amount` of a gaseous phase to the evolved-gas totals.
    pub fn evolve_gas(&mut self, phase: &str, amount: f64) {
        *self.general.gases_evolved.entry(phase.to_string()).or_insert(0.0) += amount;
    }
}
