//! Kiln: a recipe-driven batch simulator for reaction cellular automata.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Kiln sub-crates. For most users, adding `kiln` as a single
//! dependency is sufficient; the `kiln` binary lives in `kiln-cli`.
//!
//! # Quick start
//!
//! ```rust
//! use kiln::prelude::*;
//! use indexmap::IndexMap;
//!
//! // A one-reaction library: A decomposes into B.
//! let phases = PhaseSet::new(vec![
//!     PhaseEntry { name: "A".into(), is_gas: false },
//!     PhaseEntry { name: "B".into(), is_gas: false },
//! ]);
//! let reaction = ScoredReaction {
//!     reactants: IndexMap::from([("A".to_string(), 1.0)]),
//!     products: IndexMap::from([("B".to_string(), 1.0)]),
//!     competitiveness: 1.0,
//! };
//! let library = ReactionLibrary::new(vec![reaction], phases).unwrap();
//!
//! // A small run: a 4x4 grid of pure A for three steps.
//! let recipe: Recipe = serde_json::from_str(
//!     r#"{ "size": 4, "num_steps": 3, "reactants": { "A": 1.0 } }"#,
//! ).unwrap();
//! let result = SerialRunner.run(&recipe, &library, None).unwrap();
//! assert_eq!(result.step_count(), 3);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `kiln-core` | Phases, reactions, libraries, simulation state |
//! | [`lattice`] | `kiln-lattice` | Periodic grids and neighbor graphs |
//! | [`engine`] | `kiln-engine` | Recipes, the reaction calculator, run strategies |
//! | [`store`] | `kiln-store` | Result documents, compression, output paths |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Phases, reactions, libraries, and simulation state (`kiln-core`).
pub use kiln_core as core;

/// Periodic square grids and distance-weighted neighbor graphs
/// (`kiln-lattice`).
pub use kiln_lattice as lattice;

/// Recipes, the reaction calculator, and the serial and parallel run
/// strategies (`kiln-engine`).
pub use kiln_engine as engine;

/// Result documents, step-window compression, and output-path derivation
/// (`kiln-store`).
pub use kiln_store as store;

/// Common imports for typical Kiln usage.
///
/// ```rust
/// use kiln::prelude::*;
/// ```
pub mod prelude {
    pub use kiln_core::{
        PhaseEntry, PhaseSet, ReactionLibrary, ScoredReaction, SimulationState, SiteState,
        FREE_SPACE,
    };
    pub use kiln_engine::{ParallelRunner, Recipe, RunResult, SerialRunner, Strategy};
    pub use kiln_lattice::{NeighborGraph, SquareGrid};
    pub use kiln_store::{squeeze, ResultDocument, RunMetadata};
}
