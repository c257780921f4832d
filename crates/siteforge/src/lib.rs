//! SiteForge - Exhaustive site selection in Rust
//!
//! Pick exactly K of N sites so that the summed distance rows of the picked
//! sites are as small as possible. Every one of the `2^N` assignments is
//! visited, so the answer is the global optimum.
//!
//! # Example
//!
//! ```rust
//! use siteforge::prelude::*;
//!
//! let matrix = DistanceMatrix::new(&[[0, 4, 9], [4, 0, 2], [9, 2, 0]]).unwrap();
//! let solution = solve(&matrix, 3, 1).unwrap();
//!
//! assert_eq!(solution.selected_sites(), vec![1]);
//! assert_eq!(solution.cost, 6);
//! ```

// Problem model
pub use siteforge_core::{
    Assignment, CandidateIter, CandidateSpace, Cost, DistanceMatrix, FeasibilityFilter,
    Objective, Result, SiteForgeError, MAX_SITES,
};

// Configuration
pub use siteforge_config::{ConfigError, SolverConfig, ThreadCount, DEFAULT_CHUNK_SIZE};

// Search engine
pub use siteforge_solver::{
    solve, CountingSearchListener, SearchListener, SearchPhase, SearchState, SearchStatistics,
    Solution, Solver,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{Assignment, Cost, DistanceMatrix, Result, SiteForgeError};
    pub use super::{SolverConfig, ThreadCount};
    pub use super::{solve, SearchListener, Solution, Solver};
}
