//! Parallel search-reduce over the candidate space.
//!
//! The index space `[0, 2^N)` is cut into fixed-size chunks. Each rayon
//! task derives its own index range from the chunk number, so workers share
//! nothing but the read-only matrix, the statistics counters, and the
//! incumbent lock in [`SearchState`].

use std::ops::Range;
use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPool;
use siteforge_core::{CandidateSpace, FeasibilityFilter, Objective, Result};
use tracing::{debug, trace};

use crate::event::SearchListener;
use crate::state::SearchState;
use crate::statistics::{ChunkCounts, StatisticsCollector};

/// One exhaustive pass, borrowed from the solver for its duration.
pub(crate) struct ExhaustiveSearch<'a> {
    pub(crate) space: CandidateSpace,
    pub(crate) filter: FeasibilityFilter,
    pub(crate) objective: Objective<'a>,
    pub(crate) state: &'a SearchState,
    pub(crate) statistics: &'a StatisticsCollector,
    pub(crate) listeners: &'a [Arc<dyn SearchListener>],
    pub(crate) chunk_size: u64,
    pub(crate) log_progress: bool,
}

impl ExhaustiveSearch<'_> {
    /// Processes every chunk on `pool`.
    ///
    /// Stops scheduling new chunks at the first error and returns it.
    pub(crate) fn run(&self, pool: &ThreadPool) -> Result<()> {
        let chunk_count = self.space.chunk_count(self.chunk_size);
        pool.install(|| {
            (0..chunk_count)
                .into_par_iter()
                .try_for_each(|chunk| self.search_chunk(chunk))
        })
    }

    fn search_chunk(&self, chunk: u64) -> Result<()> {
        let range = self.space.chunk(chunk, self.chunk_size);
        if self.log_progress {
            trace!(
                event = "chunk_start",
                chunk,
                start = range.start,
                end = range.end,
            );
        }

        let mut counts = ChunkCounts::default();
        let result = self.scan(range, &mut counts);
        self.statistics.record_chunk(&counts);
        if self.log_progress {
            trace!(
                event = "chunk_end",
                chunk,
                candidates_done = self.statistics.current_candidates_generated(),
                candidate_count = self.space.size(),
                elapsed_ms = self.statistics.elapsed().as_millis() as u64,
            );
        }
        result
    }

    fn scan(&self, range: Range<u64>, counts: &mut ChunkCounts) -> Result<()> {
        for assignment in self.space.range(range) {
            counts.generated += 1;
            if !self.filter.is_feasible(&assignment) {
                continue;
            }
            counts.feasible += 1;

            let cost = self.objective.evaluate(&assignment)?;
            counts.evaluated += 1;

            let improved = self.state.offer_observed(assignment, cost, |best, cost| {
                debug!(event = "new_best", cost, assignment = %best);
                for listener in self.listeners {
                    listener.on_best_improved(best, cost);
                }
            })?;
            if improved {
                counts.improvements += 1;
            }
        }
        Ok(())
    }
}
