//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from I/O errors raised while loading network data.

use super::geo::InvalidCoordinate;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude/longitude outside the valid range
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Line record without a usable code
    #[error("line code must not be empty")]
    EmptyLineCode,

    /// Itinerary hops don't line up with its stops
    #[error("invalid itinerary: {0}")]
    InvalidItinerary(&'static str),
}
