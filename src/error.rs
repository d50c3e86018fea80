//! Error types for formatknn operations.
//!
//! Classification itself never fails for well-formed input; errors only
//! surface when a corpus is built from inconsistent parts or a query does not
//! match the corpus layout.

use thiserror::Error;

/// Main error type for corpus construction and classification.
///
/// # Examples
///
/// ```
/// use formatknn::error::KnnError;
///
/// let err = KnnError::dimension_mismatch("query width", 12, 9);
/// assert!(err.to_string().contains("query width"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KnnError {
    /// Caller-supplied data is malformed (widths or lengths disagree).
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// The classifier cannot operate in its current state (e.g. no samples).
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the state violation
        message: String,
    },

    /// A tuning value is out of its legal range.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },
}

impl KnnError {
    /// Create an invalid-input error for a width or length disagreement.
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidInput {
            message: format!("{context} mismatch: expected {expected}, got {actual}"),
        }
    }

    /// Create the error raised when a corpus would hold zero samples.
    #[must_use]
    pub fn empty_corpus(context: &str) -> Self {
        Self::InvalidState {
            message: format!("empty corpus: {context}"),
        }
    }

    /// Create an invalid hyperparameter error.
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, KnnError>;
