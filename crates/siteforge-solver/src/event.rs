//! Event hooks for search monitoring.
//!
//! Listeners are registered on a [`Solver`](crate::Solver) and receive
//! notifications when a search starts, when the incumbent improves, and
//! when the search ends or fails.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use siteforge_core::{Assignment, Cost};
//! use siteforge_solver::{SearchListener, Solver};
//!
//! #[derive(Debug)]
//! struct PrintListener;
//!
//! impl SearchListener for PrintListener {
//!     fn on_best_improved(&self, assignment: &Assignment, cost: Cost) {
//!         println!("New best: [{}] = {}", assignment, cost);
//!     }
//! }
//!
//! let solver = Solver::default().with_listener(Arc::new(PrintListener));
//! assert_eq!(solver.listener_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};

use siteforge_core::{Assignment, Cost, SiteForgeError};

use crate::solver::Solution;

/// Listener for search lifecycle events.
///
/// `on_best_improved` is called from worker threads while the incumbent
/// lock is held, so implementations must be quick and must not call back
/// into the search.
pub trait SearchListener: Send + Sync + Debug {
    /// Called when a new incumbent is installed.
    fn on_best_improved(&self, assignment: &Assignment, cost: Cost);

    /// Called once the inputs have been validated and workers are about to start.
    fn on_search_started(&self, _site_count: usize, _selection_size: usize) {}

    /// Called after all workers have joined and the result is final.
    fn on_search_ended(&self, _solution: &Solution) {}

    /// Called when an in-flight search is aborted.
    fn on_search_failed(&self, _error: &SiteForgeError) {}
}

/// A counting listener that tracks event occurrences.
///
/// Useful for testing.
#[derive(Debug, Default)]
pub struct CountingSearchListener {
    best_improved_count: AtomicUsize,
    search_started_count: AtomicUsize,
    search_ended_count: AtomicUsize,
    search_failed_count: AtomicUsize,
}

impl CountingSearchListener {
    /// Creates a new counting listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of incumbent improvements seen.
    pub fn best_improved_count(&self) -> usize {
        self.best_improved_count.load(Ordering::SeqCst)
    }

    /// Returns the number of search started events.
    pub fn search_started_count(&self) -> usize {
        self.search_started_count.load(Ordering::SeqCst)
    }

    /// Returns the number of search ended events.
    pub fn search_ended_count(&self) -> usize {
        self.search_ended_count.load(Ordering::SeqCst)
    }

    /// Returns the number of search failed events.
    pub fn search_failed_count(&self) -> usize {
        self.search_failed_count.load(Ordering::SeqCst)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.best_improved_count.store(0, Ordering::SeqCst);
        self.search_started_count.store(0, Ordering::SeqCst);
        self.search_ended_count.store(0, Ordering::SeqCst);
        self.search_failed_count.store(0, Ordering::SeqCst);
    }
}

impl SearchListener for CountingSearchListener {
    fn on_best_improved(&self, _assignment: &Assignment, _cost: Cost) {
        self.best_improved_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_search_started(&self, _site_count: usize, _selection_size: usize) {
        self.search_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_search_ended(&self, _solution: &Solution) {
        self.search_ended_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_search_failed(&self, _error: &SiteForgeError) {
        self.search_failed_count.fetch_add(1, Ordering::SeqCst);
    }
}
