//! Distance model: the immutable cost table between sites.

use std::fmt;

use crate::error::{Result, SiteForgeError};

/// Cost value produced by the distance model and the objective.
pub type Cost = u64;

/// An immutable N×N table of non-negative integer costs.
///
/// Entry `(i, j)` is the cost between site `i` and site `j`. The matrix is
/// not assumed to be symmetric. Rows are stored contiguously so that a whole
/// row can be handed out as a slice.
///
/// # Examples
///
/// ```
/// use siteforge_core::DistanceMatrix;
///
/// let matrix = DistanceMatrix::new(&[[0, 3], [4, 0]]).unwrap();
/// assert_eq!(matrix.site_count(), 2);
/// assert_eq!(matrix.cost(0, 1), 3);
/// assert_eq!(matrix.cost(1, 0), 4);
///
/// assert!(DistanceMatrix::new(&[[0, -1], [1, 0]]).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    costs: Vec<Cost>,
}

impl DistanceMatrix {
    /// Builds a matrix from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`SiteForgeError::InvalidInput`] if any row length differs
    /// from the number of rows, or if any entry is negative.
    pub fn new<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        let mut costs = Vec::with_capacity(n * n);

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(SiteForgeError::InvalidInput(format!(
                    "distance matrix is not square: row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            for (j, &value) in row.iter().enumerate() {
                costs.push(checked_cost(i, j, value)?);
            }
        }

        Ok(Self { n, costs })
    }

    /// Builds an `n`×`n` matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`SiteForgeError::InvalidInput`] if `data` does not hold
    /// exactly `n * n` entries, or if any entry is negative.
    pub fn from_flat(n: usize, data: Vec<i64>) -> Result<Self> {
        let expected = n.checked_mul(n).ok_or_else(|| {
            SiteForgeError::InvalidInput(format!("site count {} is too large", n))
        })?;
        if data.len() != expected {
            return Err(SiteForgeError::InvalidInput(format!(
                "distance matrix is not square: {} entries for {} sites",
                data.len(),
                n
            )));
        }

        let costs = data
            .into_iter()
            .enumerate()
            .map(|(idx, value)| checked_cost(idx / n, idx % n, value))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { n, costs })
    }

    /// Returns the number of sites N.
    #[inline]
    pub fn site_count(&self) -> usize {
        self.n
    }

    /// Returns true if the matrix has no sites.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Returns the cost between site `i` and site `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not below [`site_count`](Self::site_count).
    #[inline]
    pub fn cost(&self, i: usize, j: usize) -> Cost {
        assert!(
            i < self.n && j < self.n,
            "site index ({}, {}) out of bounds for {} sites",
            i,
            j,
            self.n
        );
        self.costs[i * self.n + j]
    }

    /// Returns the full cost row of site `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not below [`site_count`](Self::site_count).
    #[inline]
    pub fn row(&self, i: usize) -> &[Cost] {
        let start = i * self.n;
        &self.costs[start..start + self.n]
    }

    /// Iterates over all rows in site order.
    pub fn rows(&self) -> impl Iterator<Item = &[Cost]> {
        // chunks_exact panics on a zero chunk size
        self.costs.chunks_exact(self.n.max(1))
    }

    /// Returns the sum of every entry, or `None` on overflow.
    pub fn total(&self) -> Option<Cost> {
        self.costs
            .iter()
            .try_fold(0 as Cost, |acc, &c| acc.checked_add(c))
    }
}

fn checked_cost(i: usize, j: usize, value: i64) -> Result<Cost> {
    Cost::try_from(value).map_err(|_| {
        SiteForgeError::InvalidInput(format!(
            "negative cost {} at ({}, {})",
            value, i, j
        ))
    })
}

impl fmt::Debug for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistanceMatrix")
            .field("site_count", &self.n)
            .finish()
    }
}
