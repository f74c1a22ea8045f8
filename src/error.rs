//! Error types for energia operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for energia operations.
///
/// Covers malformed input tables, degenerate fit/split/evaluation requests,
/// and the numeric failures of the linear solvers.
///
/// # Examples
///
/// ```
/// use energia::error::EnergiaError;
///
/// let err = EnergiaError::ShapeMismatch {
///     expected: "8 feature columns".to_string(),
///     actual: "9".to_string(),
/// };
/// assert!(err.to_string().contains("shape mismatch"));
/// ```
#[derive(Debug)]
pub enum EnergiaError {
    /// Input table is malformed (missing/unknown columns, non-numeric values).
    Schema {
        /// What was wrong with the table
        message: String,
    },

    /// Too few samples for the requested operation.
    InsufficientData {
        /// Number of samples supplied
        n_samples: usize,
        /// Minimum number of samples required
        required: usize,
    },

    /// Feature width or vector length doesn't match what the operation expects.
    ShapeMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Train/test fraction would produce an empty subset or lies outside (0, 1).
    InvalidFraction {
        /// Requested test fraction
        test_size: f32,
        /// Number of samples being split
        n_samples: usize,
    },

    /// Target has zero variance, so R² is undefined.
    DegenerateTarget {
        /// Number of samples in the constant target
        n_samples: usize,
    },

    /// Matrix is singular or rank-deficient (e.g. exactly collinear features).
    SingularMatrix {
        /// Magnitude of the failing pivot
        pivot: f32,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Operation requires a fitted model/transformer.
    NotFitted {
        /// Name of the unfitted component
        what: &'static str,
    },

    /// I/O error while reading a dataset file.
    Io(std::io::Error),
}

impl fmt::Display for EnergiaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergiaError::Schema { message } => {
                write!(f, "Schema error: {message}")
            }
            EnergiaError::InsufficientData {
                n_samples,
                required,
            } => {
                write!(
                    f,
                    "Insufficient data: got {n_samples} samples, need at least {required}"
                )
            }
            EnergiaError::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, got {actual}")
            }
            EnergiaError::InvalidFraction {
                test_size,
                n_samples,
            } => {
                write!(
                    f,
                    "Invalid test fraction {test_size} for {n_samples} samples: \
                     fraction must lie in (0, 1) and leave both subsets non-empty"
                )
            }
            EnergiaError::DegenerateTarget { n_samples } => {
                write!(
                    f,
                    "Degenerate target: zero variance across {n_samples} samples, R² is undefined"
                )
            }
            EnergiaError::SingularMatrix { pivot } => {
                write!(f, "Singular matrix detected: pivot = {pivot}, cannot solve")
            }
            EnergiaError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            EnergiaError::NotFitted { what } => {
                write!(f, "{what} is not fitted. Call fit() first")
            }
            EnergiaError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for EnergiaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnergiaError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EnergiaError {
    fn from(err: std::io::Error) -> Self {
        EnergiaError::Io(err)
    }
}

impl EnergiaError {
    /// Create a schema error with a descriptive message.
    #[must_use]
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a shape mismatch error from expected/actual column counts.
    #[must_use]
    pub fn column_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            expected: format!("{expected} feature columns"),
            actual: format!("{actual}"),
        }
    }

    /// Create a shape mismatch error from expected/actual lengths.
    #[must_use]
    pub fn length_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            expected: format!("{context} of length {expected}"),
            actual: format!("length {actual}"),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, EnergiaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_display() {
        let err = EnergiaError::schema("column 'wall_area' missing");
        assert!(err.to_string().contains("Schema error"));
        assert!(err.to_string().contains("wall_area"));
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = EnergiaError::InsufficientData {
            n_samples: 5,
            required: 9,
        };
        let msg = err.to_string();
        assert!(msg.contains("5 samples"));
        assert!(msg.contains("at least 9"));
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = EnergiaError::column_mismatch(8, 9);
        let msg = err.to_string();
        assert!(msg.contains("shape mismatch"));
        assert!(msg.contains("8 feature columns"));
        assert!(msg.contains('9'));
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = EnergiaError::length_mismatch("target vector", 10, 8);
        let msg = err.to_string();
        assert!(msg.contains("target vector of length 10"));
        assert!(msg.contains("length 8"));
    }

    #[test]
    fn test_invalid_fraction_display() {
        let err = EnergiaError::InvalidFraction {
            test_size: 0.0,
            n_samples: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid test fraction"));
        assert!(msg.contains("100 samples"));
    }

    #[test]
    fn test_degenerate_target_display() {
        let err = EnergiaError::DegenerateTarget { n_samples: 20 };
        let msg = err.to_string();
        assert!(msg.contains("zero variance"));
        assert!(msg.contains("20"));
    }

    #[test]
    fn test_singular_matrix_display() {
        let err = EnergiaError::SingularMatrix { pivot: 0.0 };
        assert!(err.to_string().contains("Singular matrix"));
    }

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = EnergiaError::InvalidHyperparameter {
            param: "alphas".to_string(),
            value: "[]".to_string(),
            constraint: "at least one value".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid hyperparameter"));
        assert!(msg.contains("alphas"));
    }

    #[test]
    fn test_not_fitted_display() {
        let err = EnergiaError::NotFitted {
            what: "LinearRegression",
        };
        assert!(err.to_string().contains("not fitted"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EnergiaError = io_err.into();
        assert!(matches!(err, EnergiaError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = EnergiaError::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_schema() {
        use std::error::Error;
        let err = EnergiaError::schema("bad header");
        assert!(err.source().is_none());
    }
}
