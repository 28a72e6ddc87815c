//! Domain error types.
//!
//! These errors represent invariant violations when building domain values.
//! Parsing a single scalar has its own error type next to the scalar.

use super::Location;

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A segment would start and end at the same place
    #[error("segment starts and ends at {0}")]
    SameEndpoints(Location),
}
