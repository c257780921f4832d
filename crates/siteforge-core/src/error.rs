//! Error types for SiteForge

use thiserror::Error;

/// Main error type for SiteForge operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SiteForgeError {
    /// Precondition violation on the shape or range of the inputs.
    ///
    /// Always raised before a search starts.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure while evaluating candidates.
    ///
    /// Aborts the whole search; no partial result is produced.
    #[error("Computation error: {0}")]
    Computation(String),
}

impl SiteForgeError {
    /// Returns true for [`SiteForgeError::InvalidInput`].
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SiteForgeError::InvalidInput(_))
    }

    /// Returns true for [`SiteForgeError::Computation`].
    pub fn is_computation(&self) -> bool {
        matches!(self, SiteForgeError::Computation(_))
    }
}

/// Result type alias for SiteForge operations
pub type Result<T> = std::result::Result<T, SiteForgeError>;
