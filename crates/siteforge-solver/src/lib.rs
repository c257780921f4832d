//! SiteForge Solver Engine
//!
//! This crate provides the parallel exhaustive search:
//! - [`Solver`] and the [`solve`] shortcut
//! - [`SearchState`]: the mutex-guarded incumbent shared by all workers
//! - Statistics collection
//! - Event hooks for monitoring

pub mod event;
mod search;
pub mod solver;
pub mod state;
pub mod statistics;

pub use event::{CountingSearchListener, SearchListener};
pub use solver::{solve, Solution, Solver};
pub use state::{SearchPhase, SearchState};
pub use statistics::{ChunkCounts, SearchStatistics, StatisticsCollector};
