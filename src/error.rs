//! Error types for bayesfuse operations.
//!
//! Every fallible operation in the crate returns [`Result`]. The one
//! exception to "fail immediately" is posterior degeneracy: when every
//! hypothesis has zero support the posterior falls back to uniform and no
//! error is raised.

use thiserror::Error;

/// Main error type for bayesfuse operations.
///
/// # Examples
///
/// ```
/// use bayesfuse::error::BayesFuseError;
///
/// let err = BayesFuseError::UnregisteredModality("lidar".to_string());
/// assert!(err.to_string().contains("lidar"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BayesFuseError {
    /// A distribution was constructed with an out-of-domain parameter.
    #[error("Invalid parameter: {param} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// The requested capability is deliberately unsupported.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// An operation that needs at least one input received none.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Vector lengths disagree.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensionality
        expected: usize,
        /// Actual dimensionality
        actual: usize,
    },

    /// A scalar observation was given where a vector was expected, or the reverse.
    #[error("Observation shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Expected shape ("scalar" or "vector")
        expected: &'static str,
        /// Shape actually supplied
        found: &'static str,
    },

    /// Evidence referenced a modality with no registered likelihood function.
    #[error("No likelihood registered for modality: {0}")]
    UnregisteredModality(String),

    /// The prior table was empty or summed to zero.
    #[error("Prior table is empty or sums to zero")]
    EmptyPriors,

    /// A hypothesis name is not present in the prior table.
    #[error("Unknown hypothesis: {0}")]
    UnknownHypothesis(String),
}

impl BayesFuseError {
    /// Create an invalid parameter error with descriptive context
    #[must_use]
    pub fn invalid_parameter(param: &str, value: impl std::fmt::Display, constraint: &str) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyInput(context.to_string())
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, BayesFuseError>;
