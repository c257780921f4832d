//! SiteForge Core - Core types for fixed-cardinality site selection
//!
//! This crate provides the pure building blocks of the exhaustive search:
//! - [`DistanceMatrix`]: immutable N×N table of non-negative costs
//! - [`Assignment`]: one 0/1 decision per site
//! - [`CandidateSpace`]: the index space `[0, 2^N)` and its lazy enumeration
//! - [`FeasibilityFilter`]: accepts assignments with exactly K selected sites
//! - [`Objective`]: scores an assignment against the matrix
//!
//! None of these types hold shared mutable state, so they can be used
//! from any number of worker threads at once.

pub mod assignment;
pub mod candidate;
pub mod error;
pub mod feasibility;
pub mod matrix;
pub mod objective;

pub use assignment::Assignment;
pub use candidate::{CandidateIter, CandidateSpace, MAX_SITES};
pub use error::{Result, SiteForgeError};
pub use feasibility::FeasibilityFilter;
pub use matrix::{Cost, DistanceMatrix};
pub use objective::Objective;
