//! Result documents and their persistence.
//!
//! The store crate owns everything that happens to a run after the
//! engine returns: wrapping the raw result into a [`ResultDocument`],
//! deriving [`RunMetadata`] from the step snapshots, deriving output
//! paths from recipe names and flags, the lossy [`squeeze`] transform
//! that bounds a document to a recent step window, and writing either
//! document shape to disk as pretty JSON.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod document;
pub mod error;
pub mod outpath;
pub mod persist;
pub mod squeeze;

pub use document::{CompressedResultDocument, ResultDocument, RunMetadata};
pub use error::StoreError;
pub use outpath::{compressed_path, output_path};
pub use persist::write_json;
pub use squeeze::{squeeze, MAX_COMPRESSED_STEPS};
