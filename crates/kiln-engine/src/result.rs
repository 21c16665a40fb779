//! Raw run results.

use serde::{Deserialize, Serialize};
use std::fmt;

use kiln_core::SimulationState;

/// Which execution strategy produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Single-threaded execution in the calling flow of control.
    Serial,
    /// Worker-pool execution distributing site chunks.
    Parallel,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => write!(f, "serial"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

/// The raw output of one run: every step's snapshot, oldest first.
///
/// `steps[0]` is the starting lattice; each subsequent entry is the state
/// after one synchronous step. Both strategies produce this same shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Per-step snapshots, starting state included.
    pub steps: Vec<SimulationState>,
}

impl RunResult {
    /// Number of steps executed (snapshots minus the starting state).
    pub fn step_count(&self) -> u64 {
        (self.steps.len().saturating_sub(1)) as u64
    }

    /// The last snapshot. Present for any result produced by a runner,
    /// which always records at least the starting state.
    pub fn final_state(&self) -> Option<&SimulationState> {
        self.steps.last()
    }
}
