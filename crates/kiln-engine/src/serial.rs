//! Single-threaded execution strategy.

use kiln_core::{ReactionLibrary, SimulationState};

use crate::calculator::ReactionCalculator;
use crate::error::EngineError;
use crate::recipe::Recipe;
use crate::result::RunResult;
use crate::step;

/// Runs one simulation to completion in the calling flow of control.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialRunner;

impl SerialRunner {
    /// Execute `recipe` against `library`, optionally seeded by a prior
    /// snapshot, recording every step.
    pub fn run(
        &self,
        recipe: &Recipe,
        library: &ReactionLibrary,
        initial: Option<&SimulationState>,
    ) -> Result<RunResult, EngineError> {
        let setup = step::prepare(recipe, library, initial)?;
        let calc = ReactionCalculator::new(library, &setup.graph, recipe.inertia, &recipe.atmosphere);

        let mut steps = Vec::with_capacity(recipe.num_steps as usize + 1);
        let mut state = setup.state;
        steps.push(state.clone());
        for step_no in 1..=recipe.num_steps {
            let updates =
                step::compute_chunk(&calc, &state, 0..state.site_count(), step_no, recipe.seed);
            state = step::apply(&state, &updates);
            steps.push(state.clone());
        }
        Ok(RunResult { steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use kiln_core::{PhaseEntry, PhaseSet, ScoredReaction};

    fn library() -> ReactionLibrary {
        let phases = PhaseSet::new(vec![
            PhaseEntry {
                name: "A".into(),
                is_gas: false,
            },
            PhaseEntry {
                name: "B".into(),
                is_gas: false,
            },
            PhaseEntry {
                name: "AB".into(),
                is_gas: false,
            },
        ]);
        ReactionLibrary::new(
            vec![ScoredReaction {
                reactants: IndexMap::from([("A".to_string(), 1.0), ("B".to_string(), 1.0)]),
                products: IndexMap::from([("AB".to_string(), 2.0)]),
                competitiveness: 5.0,
            }],
            phases,
        )
        .unwrap()
    }

    fn recipe() -> Recipe {
        Recipe {
            name: None,
            size: 5,
            dimensionality: 2,
            num_steps: 6,
            seed: 42,
            inertia: 2.0,
            atmosphere: vec![],
            initial_volume: 1.0,
            reactants: IndexMap::from([("A".to_string(), 1.0), ("B".to_string(), 1.0)]),
            neighborhood_radius: 2,
        }
    }

    #[test]
    fn run_records_starting_state_plus_one_snapshot_per_step() {
        let result = SerialRunner.run(&recipe(), &library(), None).unwrap();
        assert_eq!(result.steps.len(), 7);
        assert_eq!(result.step_count(), 6);
        assert_eq!(result.steps[0], recipe().initial_state(&library()).unwrap());
    }

    #[test]
    fn run_is_deterministic_in_the_seed() {
        let lib = library();
        let a = SerialRunner.run(&recipe(), &lib, None).unwrap();
        let b = SerialRunner.run(&recipe(), &lib, None).unwrap();
        assert_eq!(a, b);

        let mut other = recipe();
        other.seed = 43;
        let c = SerialRunner.run(&other, &lib, None).unwrap();
        assert_ne!(a.steps.last(), c.steps.last());
    }

    #[test]
    fn initial_snapshot_overrides_the_recipe_lattice() {
        let lib = library();
        let snapshot = SimulationState::filled(vec![3, 3], "A", 1.0);
        let result = SerialRunner
            .run(&recipe(), &lib, Some(&snapshot))
            .unwrap();
        assert_eq!(result.steps[0], snapshot);
        // Grid shape comes from the snapshot, not the recipe.
        assert_eq!(result.steps[0].site_count(), 9);
    }

    #[test]
    fn malformed_snapshot_is_rejected() {
        let lib = library();
        let mut snapshot = SimulationState::filled(vec![3, 3], "A", 1.0);
        snapshot.sites.pop();
        assert!(matches!(
            SerialRunner.run(&recipe(), &lib, Some(&snapshot)),
            Err(EngineError::State(_))
        ));
    }

    #[test]
    fn reactions_eventually_form_product() {
        let lib = library();
        let mut r = recipe();
        r.num_steps = 30;
        r.inertia = 0.5;
        let result = SerialRunner.run(&r, &lib, None).unwrap();
        let formed = result
            .final_state()
            .unwrap()
            .sites
            .iter()
            .any(|s| s.phase == "AB");
        assert!(formed, "no AB formed after 30 steps");
    }
}
