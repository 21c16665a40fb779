//! Batch driver for running Kiln recipes against a reaction library.
//!
//! The driver is deliberately thin: it resolves arguments into a list of
//! recipe files, loads the shared library and optional initial snapshot
//! once, dispatches each recipe to the serial or parallel strategy, and
//! materializes one artifact per recipe. All simulation semantics live
//! in the library crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod args;
pub mod batch;
pub mod locate;

pub use args::Cli;
pub use batch::{run, BatchOutcome, FatalError};
pub use locate::locate_recipes;
