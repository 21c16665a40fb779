//! Persisted document shapes and derived metadata.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use kiln_core::{PhaseSet, ReactionLibrary, SimulationState};
use kiln_engine::{RunResult, Strategy};

/// Summary facts derived from a run's raw results.
///
/// Attached to the document after execution, never computed by the
/// engine itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Steps executed.
    pub num_steps: u64,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
    /// Volume fraction of each solid phase in the final snapshot.
    pub phase_fractions: IndexMap<String, f64>,
    /// Total evolved amount of each gaseous phase.
    pub gases_evolved: IndexMap<String, f64>,
}

impl RunMetadata {
    /// Derive metadata from a raw result.
    pub fn derive(result: &RunResult, phases: &PhaseSet, elapsed: Duration) -> Self {
        let mut phase_fractions = IndexMap::new();
        let mut gases_evolved = IndexMap::new();
        if let Some(final_state) = result.final_state() {
            let total: f64 = final_state
                .sites
                .iter()
                .filter(|s| phases.is_solid(&s.phase))
                .map(|s| s.volume)
                .sum();
            if total > 0.0 {
                for site in &final_state.sites {
                    if phases.is_solid(&site.phase) {
                        *phase_fractions.entry(site.phase.clone()).or_insert(0.0) +=
                            site.volume / total;
                    }
                }
            }
            gases_evolved = final_state.general.gases_evolved.clone();
        }
        Self {
            num_steps: result.step_count(),
            elapsed_ms: elapsed.as_millis() as u64,
            phase_fractions,
            gases_evolved,
        }
    }
}

/// The output record of one run, as persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResultDocument {
    /// Name of the recipe that produced this run.
    pub recipe_name: String,
    /// Strategy that executed the run.
    pub strategy: Strategy,
    /// Seed the run was executed with.
    pub seed: u64,
    /// Every step snapshot, starting state first.
    pub steps: Vec<SimulationState>,
    /// The reaction library the run used, embedded for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub library: Option<ReactionLibrary>,
    /// Derived summary facts.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub metadata: Option<RunMetadata>,
}

/// A [`ResultDocument`] reduced to a bounded recent step window.
///
/// Produced by [`squeeze`](crate::squeeze); the embedded library is
/// cleared by default to keep the artifact small.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompressedResultDocument {
    /// Name of the recipe that produced this run.
    pub recipe_name: String,
    /// Strategy that executed the run.
    pub strategy: Strategy,
    /// Seed the run was executed with.
    pub seed: u64,
    /// The most recent step snapshots, oldest retained first.
    pub steps: Vec<SimulationState>,
    /// How many leading snapshots the window dropped.
    pub steps_dropped: usize,
    /// The reaction library, retained only on request.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub library: Option<ReactionLibrary>,
    /// Derived summary facts, carried over unchanged.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub metadata: Option<RunMetadata>,
}
