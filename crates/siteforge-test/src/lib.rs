//! Shared test fixtures for SiteForge crates.
//!
//! This crate provides data and pure reference functions for testing.
//!
//! - [`cities`] - the 15-city fire station instance and its known optimum
//! - [`random`] - seeded random distance matrices
//! - [`brute`] - an independent combination-based reference search
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! siteforge-test = { workspace = true }
//! ```

pub mod brute;
pub mod cities;
pub mod random;

pub use brute::{brute_force_min, row_sum_objective};
pub use cities::{
    cities_matrix, reference_assignment, CITIES, CITY_COUNT, REFERENCE_COST, STATION_COUNT,
};
pub use random::random_matrix;
