//! Feasibility filter: exactly K of N sites selected.

use crate::assignment::Assignment;
use crate::error::{Result, SiteForgeError};

/// Accepts assignments that select exactly K of N sites.
///
/// The selection size is checked once, at construction, so a K larger
/// than N is reported before any search begins instead of silently
/// rejecting every candidate.
///
/// # Examples
///
/// ```
/// use siteforge_core::{Assignment, FeasibilityFilter};
///
/// let filter = FeasibilityFilter::new(4, 2).unwrap();
/// assert!(filter.is_feasible(&Assignment::from_bits(&[1, 0, 0, 1]).unwrap()));
/// assert!(!filter.is_feasible(&Assignment::from_bits(&[1, 1, 1, 0]).unwrap()));
/// assert_eq!(filter.feasible_count(), 6);
///
/// assert!(FeasibilityFilter::new(4, 5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeasibilityFilter {
    n: usize,
    k: usize,
}

impl FeasibilityFilter {
    /// Creates a filter for selecting `k` of `n` sites.
    ///
    /// # Errors
    ///
    /// Returns [`SiteForgeError::InvalidInput`] if `k > n`.
    pub fn new(n: usize, k: usize) -> Result<Self> {
        if k > n {
            return Err(SiteForgeError::InvalidInput(format!(
                "cannot select {} of {} sites",
                k, n
            )));
        }
        Ok(Self { n, k })
    }

    /// Returns the number of sites N.
    pub fn site_count(&self) -> usize {
        self.n
    }

    /// Returns the selection size K.
    pub fn selection_size(&self) -> usize {
        self.k
    }

    /// Returns true iff the assignment covers N sites and selects exactly K.
    #[inline]
    pub fn is_feasible(&self, assignment: &Assignment) -> bool {
        assignment.len() == self.n && assignment.selected_count() == self.k
    }

    /// Returns the number of feasible assignments, `C(N, K)`.
    pub fn feasible_count(&self) -> u128 {
        let k = self.k.min(self.n - self.k) as u128;
        let n = self.n as u128;
        // Each partial product is itself a binomial coefficient, so the
        // division is exact.
        (0..k).fold(1u128, |acc, i| acc * (n - i) / (i + 1))
    }
}
