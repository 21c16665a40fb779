//! Core types for the Kiln reaction cellular-automaton simulator.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! documents and value types shared by every other Kiln crate: phase sets,
//! scored reactions, the reaction library, and lattice simulation state.
//!
//! All documents are plain serde types persisted as JSON. A reaction
//! library is loaded once per process and shared read-only across every
//! run in a batch; simulation states are cheap-to-clone snapshots.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod library;
pub mod phases;
pub mod reaction;
pub mod state;

pub use error::{LibraryError, StateError};
pub use library::ReactionLibrary;
pub use phases::{PhaseEntry, PhaseSet, FREE_SPACE};
pub use reaction::ScoredReaction;
pub use state::{GeneralState, SimulationState, SiteState};
