//! Error types for the impulse resolution core.
//!
//! The core distinguishes configuration mistakes (caller-fixable, no state
//! change), invariant violations (a bug upstream — an infinite-mass body
//! moved, or a unilateral contact wants a large negative impulse), and LCP
//! solver residual failures (the sub-solver could not certify its answer).

use thiserror::Error;

/// Result type alias for resolution operations.
pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// Errors produced by collision matrix assembly and impulse resolution.
#[derive(Error, Debug, Clone)]
pub enum PhysicsError {
    /// A tuning parameter was outside its documented valid range.
    #[error("invalid configuration: {parameter} = {value}, expected {constraint}")]
    InvalidConfiguration {
        parameter: String,
        value: String,
        constraint: String,
    },

    /// `set_elasticity` (or similar broadcast) was called with no bodies present.
    #[error("invalid configuration: {0}")]
    EmptyWorld(String),

    /// An infinite-mass body was observed with non-zero velocity, or a
    /// unilateral contact impulse went negative beyond `TINY_IMPULSE`.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The LCP solver's reported residual exceeded the fixed tolerance
    /// (`1e-4`) on a joint row, or on a non-joint row with `j[i] > 0`.
    #[error(
        "LCP residual out of tolerance at row {row}: |a[{row}]| = {residual}, time = {time_hint}"
    )]
    ResidualOutOfTolerance {
        row: usize,
        residual: f64,
        time_hint: f64,
    },

    /// The serial strategy exceeded its absolute iteration ceiling.
    #[error("iteration ceiling ({ceiling}) exceeded after {iterations} iterations")]
    IterationCeilingExceeded { iterations: usize, ceiling: usize },

    /// Generic fallback for conditions that don't warrant a dedicated variant.
    #[error("physics error: {0}")]
    Generic(String),
}

impl PhysicsError {
    /// Creates an invariant-violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    /// Creates a generic error.
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic(message.into())
    }
}
