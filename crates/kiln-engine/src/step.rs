//! Shared per-step machinery for the execution strategies.
//!
//! Both runners compute one [`StepUpdate`] per site against the previous
//! snapshot, then apply the whole batch synchronously in ascending site
//! order. Keeping computation and application identical here is what
//! makes the serial and parallel strategies bit-identical.

use std::ops::Range;

use kiln_core::{ReactionLibrary, SimulationState};
use kiln_lattice::{NeighborGraph, SquareGrid};

use crate::calculator::{ReactionCalculator, StepUpdate};
use crate::error::EngineError;
use crate::recipe::Recipe;
use crate::rng::site_rng;

/// Everything a runner needs before stepping: the validated starting
/// snapshot and the neighborhood graph for its grid.
pub(crate) struct RunSetup {
    pub state: SimulationState,
    pub graph: NeighborGraph,
}

/// Resolve the starting snapshot and topology for a run.
///
/// An explicit initial snapshot wins over the recipe's fresh lattice and
/// its dimensions define the grid.
pub(crate) fn prepare(
    recipe: &Recipe,
    library: &ReactionLibrary,
    initial: Option<&SimulationState>,
) -> Result<RunSetup, EngineError> {
    recipe.validate_atmosphere(library)?;
    let state = match initial {
        Some(snapshot) => {
            snapshot.validate()?;
            snapshot.clone()
        }
        None => recipe.initial_state(library)?,
    };
    let grid = SquareGrid::new(&state.dims)?;
    let graph = NeighborGraph::von_neumann(&grid, recipe.neighborhood_radius);
    Ok(RunSetup { state, graph })
}

/// Compute the updates for a contiguous range of sites.
pub(crate) fn compute_chunk(
    calc: &ReactionCalculator<'_>,
    state: &SimulationState,
    sites: Range<usize>,
    step: u64,
    seed: u64,
) -> Vec<StepUpdate> {
    sites
        .map(|site| {
            let mut rng = site_rng(seed, step, site);
            calc.site_update(site, state, &mut rng)
        })
        .collect()
}

/// Apply a full step's updates to `prev`, producing the next snapshot.
///
/// Updates must arrive in ascending site order; on site collisions the
/// later update wins, gas amounts accumulate, and the last reaction
/// chosen is the one recorded, the same outcome regardless of how the
/// computation was chunked.
pub(crate) fn apply(prev: &SimulationState, updates: &[StepUpdate]) -> SimulationState {
    let mut next = prev.clone();
    next.general.reaction_chosen = None;
    for update in updates {
        for (site, new_state) in &update.sites {
            next.sites[*site] = new_state.clone();
        }
        for (gas, amount) in &update.gases {
            next.evolve_gas(gas, *amount);
        }
        if update.reaction_chosen.is_some() {
            next.general.reaction_chosen = update.reaction_chosen;
        }
    }
    next
}
