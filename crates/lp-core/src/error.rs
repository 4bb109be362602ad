//! Error types for lp-hessian

use thiserror::Error;

/// lp-hessian error type
#[derive(Error, Debug)]
pub enum Error {
    /// Log-probability evaluation failed (e.g. a point outside the support)
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Parameter vector length disagrees with the model dimension
    #[error("Dimension mismatch: expected {expected} parameters, found {found}")]
    DimensionMismatch {
        /// Dimension declared by the model.
        expected: usize,
        /// Length of the supplied parameter vector.
        found: usize,
    },

    /// Invalid input to a differentiation engine
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// I/O error (diagnostic sink)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the failure originated in the model's evaluator
    /// (as opposed to invalid engine input).
    pub fn is_evaluation(&self) -> bool {
        matches!(self, Error::Evaluation(_) | Error::DimensionMismatch { .. } | Error::Io(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
