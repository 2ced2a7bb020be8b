//! Error types for posterior-grid operations.
//!
//! Every fallible operation in the crate returns [`Result`], and the error
//! carries enough context for a front end to show a corrective message.

use thiserror::Error;

/// Main error type for posterior computations.
///
/// Failures are deterministic: the same inputs always produce the same
/// error, so there is nothing to retry.
///
/// # Examples
///
/// ```
/// use posterior_grid::error::PosteriorError;
///
/// let err = PosteriorError::invalid_argument("grid_points", 0, "> 0");
/// assert!(err.to_string().contains("grid_points"));
/// assert!(err.is_invalid_argument());
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PosteriorError {
    /// Malformed or out-of-domain input.
    #[error("Invalid argument: {param} = {value}, expected {constraint}")]
    InvalidArgument {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Normalization would divide by zero (or by a non-finite total).
    #[error("Numeric degeneracy: {context}")]
    NumericDegeneracy {
        /// What was being normalized and why it failed
        context: String,
    },
}

impl PosteriorError {
    /// Create an invalid-argument error from any displayable value.
    #[must_use]
    pub fn invalid_argument(
        param: &str,
        value: impl std::fmt::Display,
        constraint: &str,
    ) -> Self {
        Self::InvalidArgument {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create a numeric degeneracy error
    #[must_use]
    pub fn degenerate(context: impl Into<String>) -> Self {
        Self::NumericDegeneracy {
            context: context.into(),
        }
    }

    /// True for [`PosteriorError::InvalidArgument`].
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// True for [`PosteriorError::NumericDegeneracy`].
    #[must_use]
    pub fn is_numeric_degeneracy(&self) -> bool {
        matches!(self, Self::NumericDegeneracy { .. })
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, PosteriorError>;
