//! Square-grid topology and neighborhood graphs for Kiln simulations.
//!
//! Reaction lattices are periodic square grids in two or three
//! dimensions. The grid maps between coordinates and flat site indices;
//! the [`NeighborGraph`] precomputes, for every site, the von-Neumann
//! neighborhood within a Manhattan radius together with each neighbor's
//! Euclidean distance, so the per-step transition rule never recomputes
//! topology.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod neighborhood;

pub use error::GridError;
pub use grid::SquareGrid;
pub use neighborhood::{NeighborGraph, DEFAULT_NEIGHBORHOOD_RADIUS};
