//! Solver entry points.
//!
//! Logging levels:
//! - **INFO**: search start and end, problem scale, best cost
//! - **DEBUG**: every new incumbent
//! - **TRACE**: chunk dispatch (with `log_progress` enabled)

use std::fmt;
use std::sync::Arc;

use rayon::ThreadPoolBuilder;
use siteforge_config::SolverConfig;
use siteforge_core::{
    Assignment, CandidateSpace, Cost, DistanceMatrix, FeasibilityFilter, Objective, Result,
    SiteForgeError,
};
use tracing::{info, warn};

use crate::event::SearchListener;
use crate::search::ExhaustiveSearch;
use crate::state::SearchState;
use crate::statistics::{SearchStatistics, StatisticsCollector};

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// A minimum-cost feasible assignment. Among tied optima, whichever was
    /// installed first.
    pub assignment: Assignment,
    /// The global minimum cost over all feasible assignments.
    pub cost: Cost,
    /// Counters and timing for the run.
    pub statistics: SearchStatistics,
}

impl Solution {
    /// Returns the ids of the selected sites.
    pub fn selected_sites(&self) -> Vec<usize> {
        self.assignment.selected_sites().collect()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] cost {}", self.assignment, self.cost)
    }
}

/// Exhaustive fixed-cardinality site selection solver.
///
/// # Example
///
/// ```
/// use siteforge_config::{SolverConfig, ThreadCount};
/// use siteforge_core::DistanceMatrix;
/// use siteforge_solver::Solver;
///
/// let matrix = DistanceMatrix::new(&[[0, 5, 1], [5, 0, 9], [1, 9, 0]]).unwrap();
/// let solver = Solver::new(SolverConfig::new().with_thread_count(ThreadCount::Specific(2)));
///
/// let solution = solver.solve(&matrix, 3, 1).unwrap();
/// assert_eq!(solution.selected_sites(), vec![0]);
/// assert_eq!(solution.cost, 6);
/// ```
pub struct Solver {
    config: SolverConfig,
    listeners: Vec<Arc<dyn SearchListener>>,
}

impl Solver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            listeners: Vec::new(),
        }
    }

    /// Registers a search listener.
    pub fn with_listener(mut self, listener: Arc<dyn SearchListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Finds a minimum-cost assignment selecting exactly `k` of `n` sites.
    ///
    /// # Errors
    ///
    /// - [`SiteForgeError::InvalidInput`] if `n` does not match the matrix,
    ///   `n` exceeds [`MAX_SITES`](siteforge_core::MAX_SITES), `k > n`, or
    ///   the configuration is invalid. Raised before any candidate is
    ///   generated.
    /// - [`SiteForgeError::Computation`] if evaluation fails mid-search.
    ///   No partial result is returned.
    pub fn solve(&self, matrix: &DistanceMatrix, n: usize, k: usize) -> Result<Solution> {
        let (space, filter) = self.validate(matrix, n, k)?;

        let chunk_size = self.config.chunk_size;
        let chunk_count = space.chunk_count(chunk_size);
        let thread_count = self.config.thread_count.resolve(chunk_count);
        let pool = ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .thread_name(|i| format!("siteforge-worker-{}", i))
            .build()
            .map_err(|e| SiteForgeError::Computation(format!("worker pool: {}", e)))?;

        info!(
            event = "search_start",
            site_count = n,
            selection_size = k,
            candidate_count = space.size(),
            feasible_count = %filter.feasible_count(),
            thread_count,
            chunk_size,
        );
        for listener in &self.listeners {
            listener.on_search_started(n, k);
        }

        match self.run(matrix, space, filter, &pool, thread_count) {
            Ok(solution) => {
                info!(
                    event = "search_end",
                    best_cost = solution.cost,
                    assignment = %solution.assignment,
                    duration_ms = solution.statistics.duration.as_millis() as u64,
                    candidates = solution.statistics.candidates_generated,
                    evaluations = solution.statistics.evaluations,
                    improvements = solution.statistics.improvements,
                );
                for listener in &self.listeners {
                    listener.on_search_ended(&solution);
                }
                Ok(solution)
            }
            Err(error) => {
                warn!(event = "search_aborted", error = %error);
                for listener in &self.listeners {
                    listener.on_search_failed(&error);
                }
                Err(error)
            }
        }
    }

    fn validate(
        &self,
        matrix: &DistanceMatrix,
        n: usize,
        k: usize,
    ) -> Result<(CandidateSpace, FeasibilityFilter)> {
        if matrix.site_count() != n {
            return Err(SiteForgeError::InvalidInput(format!(
                "site count {} does not match the {}×{} distance matrix",
                n,
                matrix.site_count(),
                matrix.site_count()
            )));
        }
        let filter = FeasibilityFilter::new(n, k)?;
        let space = CandidateSpace::new(n)?;
        self.config
            .validate()
            .map_err(|e| SiteForgeError::InvalidInput(e.to_string()))?;
        Ok((space, filter))
    }

    fn run(
        &self,
        matrix: &DistanceMatrix,
        space: CandidateSpace,
        filter: FeasibilityFilter,
        pool: &rayon::ThreadPool,
        thread_count: usize,
    ) -> Result<Solution> {
        let state = SearchState::new();
        let statistics = StatisticsCollector::new();
        state.start()?;

        ExhaustiveSearch {
            space,
            filter,
            objective: Objective::new(matrix),
            state: &state,
            statistics: &statistics,
            listeners: &self.listeners,
            chunk_size: self.config.chunk_size,
            log_progress: self.config.log_progress,
        }
        .run(pool)?;

        let (assignment, cost) = state.finish()?.ok_or_else(|| {
            SiteForgeError::Computation(format!(
                "no feasible assignment selecting {} of {} sites was evaluated",
                filter.selection_size(),
                filter.site_count()
            ))
        })?;

        Ok(Solution {
            assignment,
            cost,
            statistics: statistics.into_statistics(thread_count, self.config.chunk_size),
        })
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl fmt::Debug for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Finds a minimum-cost assignment selecting exactly `k` of `n` sites,
/// using the default configuration.
///
/// # Example
///
/// ```
/// use siteforge_core::DistanceMatrix;
///
/// let matrix = DistanceMatrix::new(&[[4]]).unwrap();
/// let solution = siteforge_solver::solve(&matrix, 1, 1).unwrap();
/// assert_eq!(solution.assignment.to_bits(), vec![1]);
/// assert_eq!(solution.cost, 4);
/// ```
pub fn solve(matrix: &DistanceMatrix, n: usize, k: usize) -> Result<Solution> {
    Solver::default().solve(matrix, n, k)
}
