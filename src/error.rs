//! Error types for tensor operations.
//!
//! - [`Error`] — top-level error type.
//! - [`TensorError`] — tensor-specific errors.

/// Top-level error type for tensor operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Tensor operation error.
    #[error(transparent)]
    Tensor(#[from] TensorError),

    /// The execution kernel was asked to dispatch an unrecognized op family.
    #[error("{0}")]
    Dispatch(String),
}

/// Errors from tensor operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TensorError {
    /// Invalid shape for operation: broadcast incompatibility, reshape
    /// length mismatch, reduction axis out of range, or a pre-allocated
    /// destination of the wrong shape.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// Invalid axis, rank, or coordinates for operation: matmul called with
    /// a non-rank-2 operand, or a transpose permutation of the wrong length.
    #[error("invalid rank: {0}")]
    InvalidRank(String),

    /// Invalid index, axis, or coordinate for an operation.
    #[error("invalid index: {0}")]
    InvalidIndex(String),

    /// Operation constraint violated.
    #[error("{0}")]
    Constraint(String),
}
