//! Shared incumbent state for the parallel search.
//!
//! A single mutex guards the best cost and the best assignment together,
//! so the pair is always replaced as a unit and can never be observed
//! half-updated.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use siteforge_core::{Assignment, Cost, Result, SiteForgeError};

/// Lifecycle of a [`SearchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Created, not yet accepting candidates.
    Idle,
    /// Workers are offering candidates.
    Running,
    /// The incumbent has been handed out; no further offers are accepted.
    Completed,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchPhase::Idle => write!(f, "Idle"),
            SearchPhase::Running => write!(f, "Running"),
            SearchPhase::Completed => write!(f, "Completed"),
        }
    }
}

struct Inner {
    phase: SearchPhase,
    best_cost: Cost,
    best_assignment: Option<Assignment>,
}

/// Best-so-far state shared by every search worker.
///
/// Starts `Idle` with no incumbent. [`start`](Self::start)
/// moves it to `Running`, after which workers call [`offer`](Self::offer)
/// concurrently. Once all workers have joined, [`finish`](Self::finish)
/// moves it to `Completed` and hands out the incumbent.
///
/// # Examples
///
/// ```
/// use siteforge_core::Assignment;
/// use siteforge_solver::{SearchPhase, SearchState};
///
/// let state = SearchState::new();
/// state.start().unwrap();
///
/// assert!(state.offer(Assignment::from_bits(&[1, 0]).unwrap(), 9).unwrap());
/// assert!(state.offer(Assignment::from_bits(&[0, 1]).unwrap(), 4).unwrap());
/// assert!(!state.offer(Assignment::from_bits(&[1, 0]).unwrap(), 4).unwrap());
///
/// let (best, cost) = state.finish().unwrap().unwrap();
/// assert_eq!(best.to_bits(), vec![0, 1]);
/// assert_eq!(cost, 4);
/// assert_eq!(state.phase(), SearchPhase::Completed);
/// ```
pub struct SearchState {
    inner: Mutex<Inner>,
}

impl SearchState {
    /// Creates an idle state with no incumbent.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                phase: SearchPhase::Idle,
                best_cost: Cost::MAX,
                best_assignment: None,
            }),
        }
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> SearchPhase {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .phase
    }

    /// Moves the state from `Idle` to `Running`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteForgeError::Computation`] if the state is not idle;
    /// a state serves exactly one search.
    pub fn start(&self) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.phase != SearchPhase::Idle {
            return Err(SiteForgeError::Computation(format!(
                "cannot start a search in phase {}",
                inner.phase
            )));
        }
        inner.phase = SearchPhase::Running;
        Ok(())
    }

    /// Offers an evaluated feasible candidate.
    ///
    /// The first candidate is always installed, whatever its cost. Later
    /// ones replace the incumbent iff `cost` is strictly smaller than the
    /// current best cost. Returns whether it did.
    ///
    /// # Errors
    ///
    /// Returns [`SiteForgeError::Computation`] if the state is not running
    /// or the lock was poisoned by a panicking worker.
    pub fn offer(&self, assignment: Assignment, cost: Cost) -> Result<bool> {
        self.offer_observed(assignment, cost, |_, _| {})
    }

    /// Like [`offer`](Self::offer), but calls `on_improved` with the new
    /// incumbent before the lock is released.
    ///
    /// Improvements are therefore observed in the same order in which they
    /// were installed.
    pub fn offer_observed<F>(&self, assignment: Assignment, cost: Cost, on_improved: F) -> Result<bool>
    where
        F: FnOnce(&Assignment, Cost),
    {
        let mut inner = self.lock()?;
        if inner.phase != SearchPhase::Running {
            return Err(SiteForgeError::Computation(format!(
                "candidate offered in phase {}",
                inner.phase
            )));
        }
        if inner.best_assignment.is_some() && cost >= inner.best_cost {
            return Ok(false);
        }

        inner.best_cost = cost;
        let incumbent = inner.best_assignment.insert(assignment);
        on_improved(incumbent, cost);
        Ok(true)
    }

    /// Moves the state from `Running` to `Completed` and takes the incumbent.
    ///
    /// Returns `None` if no candidate was ever offered. Call only after
    /// every worker has joined.
    ///
    /// # Errors
    ///
    /// Returns [`SiteForgeError::Computation`] if the state is not running.
    pub fn finish(&self) -> Result<Option<(Assignment, Cost)>> {
        let mut inner = self.lock()?;
        if inner.phase != SearchPhase::Running {
            return Err(SiteForgeError::Computation(format!(
                "cannot finish a search in phase {}",
                inner.phase
            )));
        }
        inner.phase = SearchPhase::Completed;
        let cost = inner.best_cost;
        Ok(inner.best_assignment.take().map(|a| (a, cost)))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| SiteForgeError::Computation("search state lock poisoned".to_string()))
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchState")
            .field("phase", &self.phase())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(b: &[u8]) -> Assignment {
        Assignment::from_bits(b).unwrap()
    }

    #[test]
    fn test_new_is_idle() {
        let state = SearchState::new();
        assert_eq!(state.phase(), SearchPhase::Idle);
    }

    #[test]
    fn test_offer_before_start_fails() {
        let state = SearchState::new();
        let err = state.offer(bits(&[1]), 1).unwrap_err();
        assert!(err.is_computation());
    }

    #[test]
    fn test_start_twice_fails() {
        let state = SearchState::new();
        state.start().unwrap();
        assert_eq!(state.phase(), SearchPhase::Running);
        assert!(state.start().is_err());
    }

    #[test]
    fn test_strictly_smaller_replaces() {
        let state = SearchState::new();
        state.start().unwrap();

        assert!(state.offer(bits(&[1, 0, 0]), 10).unwrap());
        assert!(!state.offer(bits(&[0, 1, 0]), 10).unwrap());
        assert!(!state.offer(bits(&[0, 1, 0]), 11).unwrap());
        assert!(state.offer(bits(&[0, 0, 1]), 3).unwrap());

        let (best, cost) = state.finish().unwrap().unwrap();
        assert_eq!(best, bits(&[0, 0, 1]));
        assert_eq!(cost, 3);
    }

    #[test]
    fn test_first_offer_at_max_cost_is_installed() {
        let state = SearchState::new();
        state.start().unwrap();
        assert!(state.offer(bits(&[1, 0]), Cost::MAX).unwrap());
        assert!(!state.offer(bits(&[0, 1]), Cost::MAX).unwrap());
        assert_eq!(state.finish().unwrap(), Some((bits(&[1, 0]), Cost::MAX)));
    }

    #[test]
    fn test_finish_without_offers() {
        let state = SearchState::new();
        state.start().unwrap();
        assert_eq!(state.finish().unwrap(), None);
        assert_eq!(state.phase(), SearchPhase::Completed);
    }

    #[test]
    fn test_completed_rejects_offers_and_finish() {
        let state = SearchState::new();
        state.start().unwrap();
        state.finish().unwrap();

        assert!(state.offer(bits(&[1]), 0).unwrap_err().is_computation());
        assert!(state.finish().is_err());
        assert!(state.start().is_err());
    }

    #[test]
    fn test_finish_while_idle_fails() {
        let state = SearchState::new();
        assert!(state.finish().is_err());
    }

    #[test]
    fn test_on_improved_sees_new_incumbent() {
        let state = SearchState::new();
        state.start().unwrap();

        let mut seen = Vec::new();
        state
            .offer_observed(bits(&[1, 1]), 8, |a, c| seen.push((a.clone(), c)))
            .unwrap();
        state
            .offer_observed(bits(&[0, 1]), 9, |a, c| seen.push((a.clone(), c)))
            .unwrap();

        assert_eq!(seen, vec![(bits(&[1, 1]), 8)]);
    }

    #[test]
    fn test_concurrent_offers_keep_minimum() {
        let state = SearchState::new();
        state.start().unwrap();

        rayon::scope(|s| {
            for worker in 0..8u64 {
                let state = &state;
                s.spawn(move |_| {
                    for i in 0..500u64 {
                        let cost = 1_000 + ((i * 7919 + worker * 104_729) % 5_000);
                        state.offer(Assignment::from_index(worker, 4), cost).unwrap();
                    }
                });
            }
        });

        let (_, cost) = state.finish().unwrap().unwrap();
        assert_eq!(cost, 1_000);
    }

    #[test]
    fn test_debug() {
        let state = SearchState::new();
        assert_eq!(format!("{:?}", state), "SearchState { phase: Idle }");
    }
}
