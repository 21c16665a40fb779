//! Lossy step-window compression.
//!
//! Long runs record one full lattice snapshot per step, which dominates
//! artifact size. Squeezing keeps only the most recent
//! [`MAX_COMPRESSED_STEPS`] snapshots and, unless retention is requested,
//! drops the embedded reaction library. Metadata and identity fields are
//! carried over unchanged, so a squeezed artifact still answers "what
//! happened at the end", just not "what happened at every step".

use crate::document::{CompressedResultDocument, ResultDocument};

/// Largest number of step snapshots a compressed document retains.
pub const MAX_COMPRESSED_STEPS: usize = 50;

/// Reduce `doc` to its most recent step window.
///
/// `retain_library` keeps the embedded reaction library in the
/// compressed artifact; by default it is discarded.
pub fn squeeze(doc: ResultDocument, retain_library: bool) -> CompressedResultDocument {
    let steps_dropped = doc.steps.len().saturating_sub(MAX_COMPRESSED_STEPS);
    let steps = doc.steps[steps_dropped..].to_vec();
    CompressedResultDocument {
        recipe_name: doc.recipe_name,
        strategy: doc.strategy,
        seed: doc.seed,
        steps,
        steps_dropped,
        library: if retain_library { doc.library } else { None },
        metadata: doc.metadata,
    }
}
