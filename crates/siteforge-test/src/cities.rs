//! The 15-city fire station instance.
//!
//! Choose 6 of 15 cities for fire stations. The reference assignment was
//! produced by an external MIP solver; its cost is also the unique optimum
//! of the row-sum objective.

use siteforge_core::{Assignment, Cost, DistanceMatrix};

/// Number of cities.
pub const CITY_COUNT: usize = 15;

/// Number of fire stations to place.
pub const STATION_COUNT: usize = 6;

/// Cost of [`reference_assignment`].
pub const REFERENCE_COST: Cost = 1219;

/// Pairwise travel distances between the cities.
pub const CITIES: [[i64; CITY_COUNT]; CITY_COUNT] = [
    [0, 12, 4, 8, 11, 17, 19, 31, 23, 27, 30, 36, 14, 26, 18],
    [12, 0, 8, 4, 1, 5, 31, 19, 27, 23, 20, 24, 26, 14, 22],
    [4, 8, 0, 4, 7, 13, 23, 27, 19, 23, 26, 32, 18, 22, 14],
    [8, 4, 4, 0, 3, 9, 27, 23, 23, 19, 22, 28, 22, 18, 18],
    [11, 1, 7, 3, 0, 6, 30, 20, 26, 22, 19, 25, 25, 15, 21],
    [17, 5, 13, 9, 6, 0, 36, 24, 32, 28, 25, 19, 31, 19, 27],
    [19, 31, 23, 27, 30, 36, 0, 12, 4, 8, 11, 17, 5, 17, 9],
    [31, 19, 27, 23, 20, 24, 12, 0, 8, 4, 1, 5, 17, 5, 13],
    [23, 27, 19, 23, 26, 32, 4, 8, 0, 4, 7, 13, 9, 13, 5],
    [27, 23, 23, 19, 22, 28, 8, 4, 4, 0, 3, 9, 13, 9, 9],
    [30, 20, 26, 22, 19, 25, 11, 1, 7, 3, 0, 6, 16, 6, 12],
    [36, 24, 32, 28, 25, 19, 17, 5, 13, 9, 6, 0, 22, 10, 18],
    [14, 26, 18, 22, 25, 31, 5, 17, 9, 13, 16, 22, 0, 12, 4],
    [26, 14, 22, 18, 15, 19, 17, 5, 13, 9, 6, 10, 12, 0, 8],
    [18, 22, 14, 18, 21, 27, 9, 13, 5, 9, 12, 18, 4, 8, 0],
];

/// Builds the city distance matrix.
pub fn cities_matrix() -> DistanceMatrix {
    DistanceMatrix::new(&CITIES).expect("city matrix is square and non-negative")
}

/// The externally computed station placement: cities 7, 8, 9, 10, 13, 14.
pub fn reference_assignment() -> Assignment {
    Assignment::from_bits(&[0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 1, 1])
        .expect("reference decisions are binary")
}
