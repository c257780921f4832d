//! Objective evaluator.
//!
//! The cost of an assignment is `Σ_i Σ_j cost(i, j) * x[i]`: every selected
//! site contributes its whole distance row, to selected and unselected sites
//! alike. This is not a nearest-open-facility objective and must not be
//! turned into one; results are compared against values computed with
//! exactly this formula.

use crate::assignment::Assignment;
use crate::error::{Result, SiteForgeError};
use crate::matrix::{Cost, DistanceMatrix};

/// Scores assignments against a borrowed [`DistanceMatrix`].
///
/// # Examples
///
/// ```
/// use siteforge_core::{Assignment, DistanceMatrix, Objective};
///
/// let matrix = DistanceMatrix::new(&[[0, 1, 2], [3, 0, 4], [5, 6, 0]]).unwrap();
/// let objective = Objective::new(&matrix);
///
/// // Row 0 (0 + 1 + 2) plus row 2 (5 + 6 + 0).
/// let cost = objective.evaluate(&Assignment::from_bits(&[1, 0, 1]).unwrap()).unwrap();
/// assert_eq!(cost, 14);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Objective<'a> {
    matrix: &'a DistanceMatrix,
}

impl<'a> Objective<'a> {
    /// Creates an evaluator over `matrix`.
    pub fn new(matrix: &'a DistanceMatrix) -> Self {
        Self { matrix }
    }

    /// Computes the cost of `assignment`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteForgeError::Computation`] if the assignment does not
    /// cover exactly N sites, or if the sum overflows [`Cost`].
    pub fn evaluate(&self, assignment: &Assignment) -> Result<Cost> {
        let n = self.matrix.site_count();
        if assignment.len() != n {
            return Err(SiteForgeError::Computation(format!(
                "assignment covers {} sites, distance matrix has {}",
                assignment.len(),
                n
            )));
        }

        let mut sum: Cost = 0;
        for (site, (row, &selected)) in self.matrix.rows().zip(assignment.as_slice()).enumerate() {
            if !selected {
                continue;
            }
            sum = row
                .iter()
                .try_fold(sum, |acc, &c| acc.checked_add(c))
                .ok_or_else(|| {
                    SiteForgeError::Computation(format!(
                        "objective overflowed while adding row {}",
                        site
                    ))
                })?;
        }
        Ok(sum)
    }
}
