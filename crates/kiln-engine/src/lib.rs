//! Recipes, the reaction transition rule, and execution strategies.
//!
//! A [`Recipe`] names one simulation run: grid shape, step count, seed,
//! atmosphere, and starting material. The [`ReactionCalculator`] is the
//! synchronous cellular-automaton transition rule; the two runners drive
//! it over a whole lattice:
//!
//! - [`SerialRunner`] computes every site update in the calling thread.
//! - [`ParallelRunner`] fans site chunks out to a worker pool.
//!
//! Both return a [`RunResult`] of identical shape. Randomness is drawn
//! from a ChaCha8 stream seeded per `(run seed, step, site)`, so the two
//! strategies produce bit-identical results for identical seeds.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod calculator;
pub mod error;
pub mod parallel;
pub mod recipe;
pub mod result;
mod rng;
pub mod serial;
mod step;

pub use calculator::{ReactionCalculator, StepUpdate};
pub use error::EngineError;
pub use parallel::ParallelRunner;
pub use recipe::Recipe;
pub use result::{RunResult, Strategy};
pub use serial::SerialRunner;
