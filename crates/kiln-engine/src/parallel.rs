//! Worker-pool execution strategy.
//!
//! Distributes each step's site updates across a pool of worker threads.
//! Workers are spawned once per run inside `std::thread::scope` and fed
//! through bounded crossbeam channels; the step loop publishes the
//! previous snapshot behind an `Arc`, collects one reply per chunk, and
//! applies the merged updates in ascending site order. Because site RNG
//! is seeded per `(seed, step, site)`, the merged result is bit-identical
//! to the serial strategy's.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;

use kiln_core::{ReactionLibrary, SimulationState};

use crate::calculator::{ReactionCalculator, StepUpdate};
use crate::error::EngineError;
use crate::recipe::Recipe;
use crate::result::RunResult;
use crate::step;

/// One chunk of one step, handed to a worker.
struct Job {
    state: Arc<SimulationState>,
    sites: Range<usize>,
    step: u64,
    seed: u64,
}

/// A worker's reply: the chunk's starting site and its updates.
struct ChunkResult {
    start: usize,
    updates: Vec<StepUpdate>,
}

/// Runs one simulation across a pool of worker threads.
#[derive(Clone, Copy, Debug)]
pub struct ParallelRunner {
    workers: usize,
}

impl ParallelRunner {
    /// A runner with an explicit pool size (clamped to at least 1).
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Pool size.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Execute `recipe` against `library`, optionally seeded by a prior
    /// snapshot, recording every step.
    pub fn run(
        &self,
        recipe: &Recipe,
        library: &ReactionLibrary,
        initial: Option<&SimulationState>,
    ) -> Result<RunResult, EngineError> {
        let setup = step::prepare(recipe, library, initial)?;
        let calc = ReactionCalculator::new(library, &setup.graph, recipe.inertia, &recipe.atmosphere);
        let site_count = setup.state.site_count();
        let chunk_size = site_count.div_ceil(self.workers).max(1);

        thread::scope(|scope| -> Result<RunResult, EngineError> {
            let (job_tx, job_rx) = bounded::<Job>(self.workers * 2);
            let (result_tx, result_rx) = bounded::<ChunkResult>(self.workers * 2);

            for _ in 0..self.workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let calc = &calc;
                scope.spawn(move || {
                    while let Ok(job) = job_rx.recv() {
                        let updates =
                            step::compute_chunk(calc, &job.state, job.sites.clone(), job.step, job.seed);
                        if result_tx
                            .send(ChunkResult {
                                start: job.sites.start,
                                updates,
                            })
                            .is_err()
                        {
                            break;
                        }
                    }
                });
            }
            // Workers hold their own clones; replies should only flow
            // from them, and the step loop's recv() must not deadlock on
            // our unused endpoints.
            drop(job_rx);
            drop(result_tx);

            let mut steps = Vec::with_capacity(recipe.num_steps as usize + 1);
            let mut state = setup.state;
            steps.push(state.clone());

            for step_no in 1..=recipe.num_steps {
                let shared = Arc::new(state.clone());
                let mut chunks = 0;
                let mut start = 0;
                while start < site_count {
                    let end = (start + chunk_size).min(site_count);
                    job_tx
                        .send(Job {
                            state: Arc::clone(&shared),
                            sites: start..end,
                            step: step_no,
                            seed: recipe.seed,
                        })
                        .map_err(|_| EngineError::WorkerPool)?;
                    chunks += 1;
                    start = end;
                }

                let mut replies = Vec::with_capacity(chunks);
                for _ in 0..chunks {
                    replies.push(result_rx.recv().map_err(|_| EngineError::WorkerPool)?);
                }
                replies.sort_by_key(|r| r.start);
                let updates: Vec<StepUpdate> =
                    replies.into_iter().flat_map(|r| r.updates).collect();

                state = step::apply(&state, &updates);
                steps.push(state.clone());
            }

            // Closing the job channel lets the workers drain and exit.
            drop(job_tx);
            Ok(RunResult { steps })
        })
    }
}

impl Default for ParallelRunner {
    /// A pool sized to the machine's available parallelism.
    fn default() -> Self {
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::new(workers)
    }
}
