//! Deterministic RNG derivation and weighted draws.
//!
//! Every random decision in a run comes from a ChaCha8 stream seeded by
//! mixing the run seed with the step number and site index, so the result
//! of a step never depends on how sites were chunked across workers.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// Fibonacci-hashing multipliers keep nearby (step, site) pairs from
// producing correlated seeds.
const STEP_MIX: u64 = 0x9e37_79b9_7f4a_7c15;
const SITE_MIX: u64 = 0xd1b5_4a32_d192_ed03;

/// The RNG for one site's decisions during one step.
pub(crate) fn site_rng(seed: u64, step: u64, site: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(
        seed ^ step.wrapping_mul(STEP_MIX) ^ (site as u64).wrapping_mul(SITE_MIX),
    )
}

/// The RNG for building a recipe's initial lattice.
pub(crate) fn setup_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Pick an index with probability proportional to its weight.
///
/// Non-finite and negative weights count as zero. When every weight is
/// zero the draw is uniform. Returns `None` only for an empty slice.
pub(crate) fn weighted_index(weights: &[f64], rng: &mut ChaCha8Rng) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let total: f64 = weights.iter().copied().map(clean).sum();
    if total <= 0.0 {
        // Uniform fallback.
        let draw = (rng.random::<f64>() * weights.len() as f64) as usize;
        return Some(draw.min(weights.len() - 1));
    }
    let mut remaining = rng.random::<f64>() * total;
    for (i, &w) in weights.iter().enumerate() {
        remaining -= clean(w);
        if remaining <= 0.0 {
            return Some(i);
        }
    }
    Some(weights.len() - 1)
}
