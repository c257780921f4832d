//! Reference search that shares no code with the solver.
//!
//! Walks k-combinations directly instead of filtering the full binary cube,
//! and scores them with explicit `cost(i, j)` lookups.

use siteforge_core::{Assignment, Cost, DistanceMatrix};

/// Scores `assignment` as `Σ_i Σ_j cost(i, j) * x[i]` with plain indexing.
pub fn row_sum_objective(matrix: &DistanceMatrix, assignment: &Assignment) -> Cost {
    let n = matrix.site_count();
    let mut sum = 0;
    for i in 0..n {
        let x = Cost::from(assignment.get(i).unwrap_or(false));
        for j in 0..n {
            sum += matrix.cost(i, j) * x;
        }
    }
    sum
}

/// Returns the minimum cost over all assignments selecting exactly `k`
/// sites, with the first combination (in lexicographic order) reaching it.
///
/// Returns `None` if `k` exceeds the site count.
pub fn brute_force_min(matrix: &DistanceMatrix, k: usize) -> Option<(Assignment, Cost)> {
    let n = matrix.site_count();
    if k > n {
        return None;
    }

    let mut best: Option<(Vec<usize>, Cost)> = None;
    let mut combo: Vec<usize> = (0..k).collect();
    loop {
        let assignment = Assignment::from_selected(n, combo.iter().copied()).ok()?;
        let cost = row_sum_objective(matrix, &assignment);
        if best.as_ref().map_or(true, |(_, b)| cost < *b) {
            best = Some((combo.clone(), cost));
        }

        // Advance to the next combination, rightmost position first.
        let Some(pos) = (0..k).rev().find(|&p| combo[p] < n - k + p) else {
            break;
        };
        combo[pos] += 1;
        for p in pos + 1..k {
            combo[p] = combo[p - 1] + 1;
        }
    }

    let (sites, cost) = best?;
    Some((Assignment::from_selected(n, sites).ok()?, cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::{cities_matrix, reference_assignment, REFERENCE_COST, STATION_COUNT};

    #[test]
    fn test_reference_cost() {
        let matrix = cities_matrix();
        assert_eq!(
            row_sum_objective(&matrix, &reference_assignment()),
            REFERENCE_COST
        );
    }

    #[test]
    fn test_brute_force_finds_reference() {
        let (assignment, cost) = brute_force_min(&cities_matrix(), STATION_COUNT).unwrap();
        assert_eq!(assignment, reference_assignment());
        assert_eq!(cost, REFERENCE_COST);
    }

    #[test]
    fn test_brute_force_edges() {
        let matrix = DistanceMatrix::new(&[[1, 2], [3, 4]]).unwrap();
        assert_eq!(brute_force_min(&matrix, 0).unwrap().1, 0);
        assert_eq!(brute_force_min(&matrix, 2).unwrap().1, 10);
        assert!(brute_force_min(&matrix, 3).is_none());
    }
}
