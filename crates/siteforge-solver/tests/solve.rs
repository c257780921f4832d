//! End-to-end search tests against the shared fixtures.

use std::sync::Arc;

use siteforge_config::{SolverConfig, ThreadCount};
use siteforge_core::{DistanceMatrix, FeasibilityFilter, Objective};
use siteforge_solver::{solve, CountingSearchListener, Solver};
use siteforge_test::{
    brute_force_min, cities_matrix, random_matrix, reference_assignment, row_sum_objective,
    CITY_COUNT, REFERENCE_COST, STATION_COUNT,
};

#[test]
fn test_fire_stations_match_reference() {
    let matrix = cities_matrix();
    let reference = Objective::new(&matrix)
        .evaluate(&reference_assignment())
        .unwrap();
    assert_eq!(reference, REFERENCE_COST);

    let solution = solve(&matrix, CITY_COUNT, STATION_COUNT).unwrap();
    assert!(solution.cost <= reference);
    assert_eq!(solution.cost, REFERENCE_COST);
    // The optimum is unique for this instance.
    assert_eq!(solution.assignment, reference_assignment());
    assert_eq!(solution.selected_sites(), vec![7, 8, 9, 10, 13, 14]);
}

#[test]
fn test_fire_stations_statistics() {
    let solution = solve(&cities_matrix(), CITY_COUNT, STATION_COUNT).unwrap();
    let stats = &solution.statistics;
    assert_eq!(stats.candidates_generated, 1 << 15);
    assert_eq!(stats.feasible_candidates, 5005);
    assert_eq!(stats.evaluations, 5005);
    assert!(stats.improvements >= 1);
}

#[test]
fn test_returned_cost_matches_objective() {
    for seed in 0..5 {
        let matrix = random_matrix(9, 50, seed);
        let solution = solve(&matrix, 9, 4).unwrap();
        let recomputed = row_sum_objective(&matrix, &solution.assignment);
        assert_eq!(solution.cost, recomputed, "seed {}", seed);
        assert!(FeasibilityFilter::new(9, 4)
            .unwrap()
            .is_feasible(&solution.assignment));
    }
}

#[test]
fn test_agrees_with_brute_force() {
    for seed in 0..10 {
        let n = 4 + (seed as usize % 7);
        let matrix = random_matrix(n, 100, seed);
        for k in 0..=n {
            let (_, expected) = brute_force_min(&matrix, k).unwrap();
            let solution = solve(&matrix, n, k).unwrap();
            assert_eq!(solution.cost, expected, "seed {} n {} k {}", seed, n, k);
        }
    }
}

#[test]
fn test_idempotent() {
    let matrix = random_matrix(12, 30, 42);
    let first = solve(&matrix, 12, 5).unwrap();
    let second = solve(&matrix, 12, 5).unwrap();
    assert_eq!(first.cost, second.cost);
}

#[test]
fn test_raising_an_entry_never_lowers_best_cost() {
    let n = 8;
    let base = random_matrix(n, 20, 7);
    let base_cost = solve(&base, n, 3).unwrap().cost;

    for (i, j) in [(0, 0), (2, 5), (7, 1), (4, 4)] {
        let data: Vec<i64> = (0..n * n)
            .map(|idx| {
                let value = base.cost(idx / n, idx % n) as i64;
                if idx == i * n + j {
                    value + 13
                } else {
                    value
                }
            })
            .collect();
        let raised = DistanceMatrix::from_flat(n, data).unwrap();
        let raised_cost = solve(&raised, n, 3).unwrap().cost;
        assert!(raised_cost >= base_cost, "entry ({}, {})", i, j);
    }
}

#[test]
fn test_select_none_and_all() {
    let matrix = random_matrix(6, 9, 3);

    let none = solve(&matrix, 6, 0).unwrap();
    assert_eq!(none.assignment.selected_count(), 0);
    assert_eq!(none.cost, 0);

    let all = solve(&matrix, 6, 6).unwrap();
    assert_eq!(all.assignment.selected_count(), 6);
    assert_eq!(Some(all.cost), matrix.total());
}

#[test]
fn test_k_above_n_is_invalid_input() {
    let matrix = cities_matrix();
    let listener = Arc::new(CountingSearchListener::new());
    let solver = Solver::default().with_listener(listener.clone());

    let err = solver.solve(&matrix, CITY_COUNT, CITY_COUNT + 1).unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(listener.search_started_count(), 0);
}

#[test]
fn test_thread_count_does_not_change_cost() {
    let matrix = cities_matrix();
    for thread_count in [ThreadCount::Specific(1), ThreadCount::Specific(3), ThreadCount::Unlimited] {
        let solver = Solver::new(
            SolverConfig::new()
                .with_thread_count(thread_count)
                .with_chunk_size(97),
        );
        let solution = solver.solve(&matrix, CITY_COUNT, STATION_COUNT).unwrap();
        assert_eq!(solution.cost, REFERENCE_COST, "{}", thread_count);
    }
}

#[test]
fn test_single_site_single_station() {
    let matrix = DistanceMatrix::new(&[[3]]).unwrap();
    let solution = solve(&matrix, 1, 1).unwrap();
    assert_eq!(solution.assignment.to_bits(), vec![1]);
    assert_eq!(solution.cost, 3);
}
