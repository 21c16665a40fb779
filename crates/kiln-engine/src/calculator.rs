//! The reaction transition rule.
//!
//! For each site, the calculator enumerates the interactions available
//! this step (solid-solid reactions with each neighbor, three-body
//! reactions involving an atmospheric species, solid-atmosphere reactions
//! when the site adjoins free space, single-phase decompositions, and the
//! ever-present no-op), then draws one by normalized score, draws a
//! reaction within it by competitiveness, and converts the participating
//! sites' material into products.
//!
//! Scores of neighbor-mediated interactions decay with the cube of the
//! neighbor distance; consumption probability of a cell scales inversely
//! with its volume, so a cell holding twice the material takes twice as
//! many encounters to consume.

use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use kiln_core::{ReactionLibrary, SimulationState, SiteState, FREE_SPACE};
use kiln_lattice::NeighborGraph;

use rand::prelude::*;

use crate::rng::weighted_index;

/// The effect of one site's transition during one step.
///
/// Applied synchronously: every update in a step is computed against the
/// previous snapshot before any is applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepUpdate {
    /// Replacement states for participating sites.
    pub sites: SmallVec<[(usize, SiteState); 2]>,
    /// Amounts of gaseous product evolved out of the lattice.
    pub gases: SmallVec<[(String, f64); 1]>,
    /// Library index of the reaction this site chose, if it reacted.
    pub reaction_chosen: Option<usize>,
}

impl StepUpdate {
    /// Whether this update changes anything.
    pub fn is_noop(&self) -> bool {
        self.sites.is_empty() && self.gases.is_empty() && self.reaction_chosen.is_none()
    }
}

/// One candidate interaction at a site.
struct Interaction<'l> {
    score: f64,
    kind: InteractionKind<'l>,
}

enum InteractionKind<'l> {
    /// Do nothing this step.
    NoOp,
    /// React: the participating site ids and the candidate reactions
    /// (library indices) between their phases.
    React {
        sites: SmallVec<[usize; 2]>,
        reactions: &'l [usize],
    },
}

/// The cellular-automaton transition rule for one lattice.
///
/// Borrows the shared, read-only reaction library and the precomputed
/// neighborhood graph; holds no per-step state, so one calculator can be
/// shared by every worker of a parallel run.
pub struct ReactionCalculator<'a> {
    library: &'a ReactionLibrary,
    graph: &'a NeighborGraph,
    inertia: f64,
    atmosphere: &'a [String],
}

impl<'a> ReactionCalculator<'a> {
    /// Create a calculator over `library` and `graph`.
    pub fn new(
        library: &'a ReactionLibrary,
        graph: &'a NeighborGraph,
        inertia: f64,
        atmosphere: &'a [String],
    ) -> Self {
        Self {
            library,
            graph,
            inertia,
            atmosphere,
        }
    }

    /// Compute the transition for `site` against the previous snapshot.
    pub fn site_update(
        &self,
        site: usize,
        state: &SimulationState,
        rng: &mut ChaCha8Rng,
    ) -> StepUpdate {
        let interactions = self.possible_interactions(site, state);
        let scores: Vec<f64> = interactions.iter().map(|i| i.score).collect();
        // The no-op guarantees a non-empty list.
        let chosen = &interactions[weighted_index(&scores, rng).unwrap_or(0)];

        let (sites, reactions) = match &chosen.kind {
            InteractionKind::NoOp => return StepUpdate::default(),
            InteractionKind::React { sites, reactions } => (sites, *reactions),
        };

        // Reaction hulls often admit several reactions between the same
        // precursors; draw one by competitiveness.
        let weights: Vec<f64> = reactions
            .iter()
            .map(|&id| self.library.reactions()[id].competitiveness)
            .collect();
        let rxn_id = match weighted_index(&weights, rng) {
            Some(i) => reactions[i],
            None => return StepUpdate::default(),
        };
        let rxn = &self.library.reactions()[rxn_id];

        let mut update = StepUpdate {
            reaction_chosen: Some(rxn_id),
            ..Default::default()
        };

        // The reaction proceeds independently at each participating site.
        for &site_id in sites {
            let cell = state.site(site_id);
            if !self.should_proceed(rxn, cell, rng) {
                continue;
            }
            let Some(product) = self.pick_product(rxn, rng) else {
                continue;
            };
            let amount =
                rxn.convert_reactant_amt_to_product_amt(&cell.phase, cell.volume, &product);
            if self.library.phases().is_gas(&product) {
                // Gas evolves out of the lattice; the consumed cell
                // becomes free space to keep mass balanced.
                update.gases.push((product, amount));
                update.sites.push((
                    site_id,
                    SiteState {
                        phase: FREE_SPACE.to_string(),
                        volume: 0.0,
                    },
                ));
            } else {
                update.sites.push((
                    site_id,
                    SiteState {
                        phase: product,
                        volume: amount,
                    },
                ));
            }
        }

        update
    }

    /// Every interaction available at `site` this step.
    fn possible_interactions(&self, site: usize, state: &SimulationState) -> Vec<Interaction<'a>> {
        let site_phase = state.site(site).phase.as_str();
        let mut interactions = vec![Interaction {
            score: self.inertia,
            kind: InteractionKind::NoOp,
        }];

        for &(nb, distance) in self.graph.neighbors_of(site) {
            let nb_phase = state.site(nb).phase.as_str();

            // Three-body reactions mediated by an atmospheric species.
            for species in self.atmosphere {
                let rxns = self.library.reactions_for(&[site_phase, nb_phase, species]);
                if let Some(&first) = rxns.first() {
                    interactions.push(Interaction {
                        score: self.distance_adjusted(first, distance),
                        kind: InteractionKind::React {
                            sites: SmallVec::from_slice(&[site, nb]),
                            reactions: rxns,
                        },
                    });
                }
            }

            // A neighboring empty site exposes this cell to the atmosphere.
            if nb_phase == FREE_SPACE {
                for species in self.atmosphere {
                    let rxns = self.library.reactions_for(&[site_phase, species]);
                    if let Some(&first) = rxns.first() {
                        interactions.push(Interaction {
                            score: self.distance_adjusted(first, 1.0),
                            kind: InteractionKind::React {
                                sites: SmallVec::from_slice(&[site]),
                                reactions: rxns,
                            },
                        });
                    }
                }
            }

            // Plain solid-solid reactions between the two phases.
            let rxns = self.library.reactions_for(&[nb_phase, site_phase]);
            if let Some(&first) = rxns.first() {
                interactions.push(Interaction {
                    score: self.distance_adjusted(first, distance),
                    kind: InteractionKind::React {
                        sites: SmallVec::from_slice(&[site, nb]),
                        reactions: rxns,
                    },
                });
            }
        }

        // A cell may also decompose on its own.
        let decomp = self.library.reactions_for(&[site_phase]);
        if let Some(&first) = decomp.first() {
            interactions.push(Interaction {
                score: self.distance_adjusted(first, 1.0),
                kind: InteractionKind::React {
                    sites: SmallVec::from_slice(&[site]),
                    reactions: decomp,
                },
            });
        }

        interactions
    }

    /// Probability gate for consuming `cell` via `rxn`.
    fn should_proceed(
        &self,
        rxn: &kiln_core::ScoredReaction,
        cell: &SiteState,
        rng: &mut ChaCha8Rng,
    ) -> bool {
        if cell.volume <= 0.0 {
            return false;
        }
        let fraction = rxn.solid_reactant_stoich_fraction(&cell.phase, self.library.phases());
        // Consuming twice the volume takes twice as many tries.
        rng.random::<f64>() < fraction / cell.volume
    }

    /// Draw a product phase weighted by product stoichiometry.
    fn pick_product(&self, rxn: &kiln_core::ScoredReaction, rng: &mut ChaCha8Rng) -> Option<String> {
        let names: Vec<&String> = rxn.products.keys().collect();
        let weights: Vec<f64> = rxn.products.values().copied().collect();
        weighted_index(&weights, rng).map(|i| names[i].clone())
    }

    fn distance_adjusted(&self, rxn_id: usize, distance: f64) -> f64 {
        self.library.reactions()[rxn_id].competitiveness / distance.powi(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::site_rng;
    use indexmap::IndexMap;
    use kiln_core::{PhaseEntry, PhaseSet, ScoredReaction};
    use kiln_lattice::SquareGrid;

    fn phases() -> PhaseSet {
        PhaseSet::new(vec![
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
            PhaseEntry {
                name: "CO2".into(),
                is_gas: true,
            },
        ])
    }

    fn rxn(reactants: &[(&str, f64)], products: &[(&str, f64)], score: f64) -> ScoredReaction {
        ScoredReaction {
            reactants: reactants
                .iter()
                .map(|(n, c)| (n.to_string(), *c))
                .collect::<IndexMap<_, _>>(),
            products: products
                .iter()
                .map(|(n, c)| (n.to_string(), *c))
                .collect::<IndexMap<_, _>>(),
            competitiveness: score,
        }
    }

    fn checkerboard(edge: usize) -> SimulationState {
        let mut state = SimulationState::filled(vec![edge, edge], "A", 1.0);
        for (i, site) in state.sites.iter_mut().enumerate() {
            if (i % edge + i / edge) % 2 == 1 {
                site.phase = "B".to_string();
            }
        }
        state
    }

    #[test]
    fn inert_library_yields_only_noops() {
        // The only reaction requires a phase that never appears on the
        // lattice, so every draw lands on the no-op.
        let lib = ReactionLibrary::new(
            vec![rxn(&[("AB", 1.0)], &[("A", 1.0)], 10.0)],
            phases(),
        )
        .unwrap();
        let grid = SquareGrid::new(&[4, 4]).unwrap();
        let graph = NeighborGraph::von_neumann(&grid, 2);
        let calc = ReactionCalculator::new(&lib, &graph, 2.0, &[]);
        let state = checkerboard(4);
        for site in 0..state.site_count() {
            let mut rng = site_rng(1, 1, site);
            assert!(calc.site_update(site, &state, &mut rng).is_noop());
        }
    }

    #[test]
    fn zero_inertia_with_one_reaction_always_reacts() {
        let lib = ReactionLibrary::new(
            vec![rxn(&[("A", 1.0), ("B", 1.0)], &[("AB", 2.0)], 100.0)],
            phases(),
        )
        .unwrap();
        let grid = SquareGrid::new(&[4, 4]).unwrap();
        let graph = NeighborGraph::von_neumann(&grid, 1);
        let calc = ReactionCalculator::new(&lib, &graph, 0.0, &[]);
        let state = checkerboard(4);
        let mut reacted = 0;
        for site in 0..state.site_count() {
            let mut rng = site_rng(1, 1, site);
            let update = calc.site_update(site, &state, &mut rng);
            assert_eq!(update.reaction_chosen, Some(0));
            reacted += update.sites.len();
        }
        assert!(reacted > 0);
    }

    #[test]
    fn gas_products_evolve_and_vacate_the_site() {
        // A -> CO2 decomposition; every interaction is that reaction.
        let lib = ReactionLibrary::new(
            vec![rxn(&[("A", 1.0)], &[("CO2", 1.0)], 100.0)],
            phases(),
        )
        .unwrap();
        let grid = SquareGrid::new(&[3, 3]).unwrap();
        let graph = NeighborGraph::von_neumann(&grid, 1);
        let calc = ReactionCalculator::new(&lib, &graph, 0.0, &[]);
        let state = SimulationState::filled(vec![3, 3], "A", 1.0);

        let mut evolved = false;
        for site in 0..state.site_count() {
            for attempt in 0..50 {
                let mut rng = site_rng(attempt, 1, site);
                let update = calc.site_update(site, &state, &mut rng);
                if let Some((gas, amount)) = update.gases.first() {
                    assert_eq!(gas, "CO2");
                    assert_eq!(*amount, 1.0);
                    let (_, vacated) = &update.sites[0];
                    assert_eq!(vacated.phase, FREE_SPACE);
                    assert_eq!(vacated.volume, 0.0);
                    evolved = true;
                }
            }
        }
        assert!(evolved, "decomposition never proceeded in 50 tries");
    }

    #[test]
    fn larger_cells_are_consumed_less_readily() {
        let lib = ReactionLibrary::new(
            vec![rxn(&[("A", 1.0), ("B", 1.0)], &[("AB", 1.0)], 100.0)],
            phases(),
        )
        .unwrap();
        let grid = SquareGrid::new(&[4, 4]).unwrap();
        let graph = NeighborGraph::von_neumann(&grid, 1);
        let calc = ReactionCalculator::new(&lib, &graph, 0.0, &[]);

        let consumed = |volume: f64| -> usize {
            let mut state = checkerboard(4);
            for site in state.sites.iter_mut() {
                site.volume = volume;
            }
            let mut count = 0;
            for site in 0..state.site_count() {
                for attempt in 0..20 {
                    let mut rng = site_rng(attempt, 1, site);
                    count += calc.site_update(site, &state, &mut rng).sites.len();
                }
            }
            count
        };

        let small = consumed(1.0);
        let large = consumed(8.0);
        assert!(
            large * 2 < small,
            "volume 8 cells consumed {large}, volume 1 cells {small}"
        );
    }

    #[test]
    fn atmosphere_reaches_cells_next_to_free_space() {
        // A + CO2 -> AB, only possible via the atmosphere.
        let lib = ReactionLibrary::new(
            vec![rxn(&[("A", 1.0), ("CO2", 1.0)], &[("AB", 1.0)], 100.0)],
            phases(),
        )
        .unwrap();
        let grid = SquareGrid::new(&[3, 3]).unwrap();
        let graph = NeighborGraph::von_neumann(&grid, 1);
        let atmosphere = vec!["CO2".to_string()];
        let calc = ReactionCalculator::new(&lib, &graph, 0.0, &atmosphere);

        // Site 4 (center) is A, everything else free space.
        let mut state = SimulationState::empty(vec![3, 3]);
        state.sites[4] = SiteState {
            phase: "A".into(),
            volume: 1.0,
        };

        let mut reacted = false;
        for attempt in 0..50 {
            let mut rng = site_rng(attempt, 1, 4);
            let update = calc.site_update(4, &state, &mut rng);
            if let Some((_, new_site)) = update.sites.first() {
                assert_eq!(new_site.phase, "AB");
                reacted = true;
            }
        }
        assert!(reacted, "atmospheric reaction never proceeded");

        // An interior cell with no free-space neighbor cannot react.
        let solid = SimulationState::filled(vec![3, 3], "A", 1.0);
        for attempt in 0..50 {
            let mut rng = site_rng(attempt, 1, 4);
            assert!(calc.site_update(4, &solid, &mut rng).is_noop());
        }
    }
}
