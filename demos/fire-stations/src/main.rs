//! Fire Station Example
//!
//! Fifteen cities need six fire stations. Each city's row in the distance
//! table is the cost of building a station there, and the search picks the
//! six cities whose rows add up to the least.
//!
//! Reads `siteforge.toml` from the working directory if present.

use std::io::ErrorKind;
use std::path::Path;

use siteforge::prelude::*;
use siteforge::{ConfigError, FeasibilityFilter, Objective};

/// Number of cities.
const N: usize = 15;

/// Number of planned fire stations.
const K: usize = 6;

/// Distances between every pair of cities.
const CITIES: [[i64; N]; N] = [
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

/// Placement computed independently with a MIP solver.
const REFERENCE: [u8; N] = [0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 1, 1];

/// Reads the search configuration, using defaults only if `path` is absent.
fn load_config(path: impl AsRef<Path>) -> std::result::Result<SolverConfig, ConfigError> {
    match SolverConfig::load(path) {
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(SolverConfig::default()),
        other => other,
    }
}

fn main() -> Result<()> {
    siteforge::console::init();

    let config = load_config("siteforge.toml")
        .map_err(|e| SiteForgeError::InvalidInput(format!("siteforge.toml: {}", e)))?;
    let matrix = DistanceMatrix::new(&CITIES)?;
    let solution = Solver::new(config).solve(&matrix, N, K)?;

    for decision in solution.assignment.to_bits() {
        print!("{}, \t", decision);
    }
    println!("\n");

    let feasible = FeasibilityFilter::new(N, K)?.is_feasible(&solution.assignment);
    println!("Is feasible {}, Min: {}", feasible, solution.cost);

    let reference = Assignment::from_bits(&REFERENCE)?;
    let expected = Objective::new(&matrix).evaluate(&reference)?;
    println!("Expected (reference): {}", expected);

    Ok(())
}
