//! Error types for pipeline operations.
//!
//! Every stage reports failures through [`ElaError`]. Missing prerequisite
//! files carry the offending path so that a partial upstream failure is
//! visible at the first downstream stage that needs the file.

use std::fmt;
use std::path::PathBuf;

/// Main error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use bbob_ela::error::ElaError;
///
/// let err = ElaError::UnsupportedSamplingMethod("sobol".to_string());
/// assert!(err.to_string().contains("sobol"));
/// ```
#[derive(Debug)]
pub enum ElaError {
    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter or configuration value.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Sampling method name outside the supported enumeration.
    UnsupportedSamplingMethod(String),

    /// Feature class name with no extraction routine.
    UnsupportedFeatureClass(String),

    /// A file another stage should have produced does not exist.
    MissingInput {
        /// Expected location
        path: PathBuf,
    },

    /// A feature listing does not match the table schema.
    SchemaMismatch {
        /// Offending listing
        path: PathBuf,
        /// What differs
        message: String,
    },

    /// Malformed content in an input file.
    Parse {
        /// File being parsed
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Error description
        message: String,
    },

    /// A feature extraction routine could not produce its values.
    FeatureComputation {
        /// Feature class name
        class: String,
        /// Error description
        message: String,
    },

    /// I/O error (permission denied, disk full, ...).
    Io(std::io::Error),

    /// CSV reader/writer error.
    Csv(String),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for ElaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElaError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Matrix dimension mismatch: expected {expected}, got {actual}"
                )
            }
            ElaError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            ElaError::UnsupportedSamplingMethod(name) => {
                write!(f, "Sampling method {name} is not defined")
            }
            ElaError::UnsupportedFeatureClass(name) => {
                write!(f, "Feature class {name} is not supported")
            }
            ElaError::MissingInput { path } => {
                write!(f, "Missing input file: {}", path.display())
            }
            ElaError::SchemaMismatch { path, message } => {
                write!(
                    f,
                    "Feature schema mismatch in {}: {message}",
                    path.display()
                )
            }
            ElaError::Parse {
                path,
                line,
                message,
            } => {
                write!(
                    f,
                    "Parse error in {} at line {line}: {message}",
                    path.display()
                )
            }
            ElaError::FeatureComputation { class, message } => {
                write!(f, "Feature computation failed for {class}: {message}")
            }
            ElaError::Io(e) => write!(f, "I/O error: {e}"),
            ElaError::Csv(msg) => write!(f, "CSV error: {msg}"),
            ElaError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            ElaError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ElaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ElaError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ElaError {
    fn from(err: std::io::Error) -> Self {
        ElaError::Io(err)
    }
}

impl From<csv::Error> for ElaError {
    fn from(err: csv::Error) -> Self {
        ElaError::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for ElaError {
    fn from(err: serde_json::Error) -> Self {
        ElaError::Serialization(err.to_string())
    }
}

impl From<&str> for ElaError {
    fn from(msg: &str) -> Self {
        ElaError::Other(msg.to_string())
    }
}

impl From<String> for ElaError {
    fn from(msg: String) -> Self {
        ElaError::Other(msg)
    }
}

impl ElaError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create a feature computation error for `class`
    #[must_use]
    pub fn feature(class: &str, message: impl Into<String>) -> Self {
        Self::FeatureComputation {
            class: class.to_string(),
            message: message.into(),
        }
    }

    /// Maps a `NotFound` I/O error on `path` to [`ElaError::MissingInput`].
    #[must_use]
    pub fn from_io_at(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::MissingInput { path: path.into() }
        } else {
            Self::Io(err)
        }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for ElaError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, ElaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = ElaError::DimensionMismatch {
            expected: "100x10".to_string(),
            actual: "100x5".to_string(),
        };
        assert!(err.to_string().contains("dimension mismatch"));
        assert!(err.to_string().contains("100x10"));
        assert!(err.to_string().contains("100x5"));
    }

    #[test]
    fn test_unsupported_sampling_method_display() {
        let err = ElaError::UnsupportedSamplingMethod("sobol".to_string());
        assert_eq!(err.to_string(), "Sampling method sobol is not defined");
    }

    #[test]
    fn test_missing_input_display() {
        let err = ElaError::MissingInput {
            path: PathBuf::from("accuracy_multimodality_f3_DIM5.csv"),
        };
        assert!(err
            .to_string()
            .contains("accuracy_multimodality_f3_DIM5.csv"));
    }

    #[test]
    fn test_from_io_at_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ElaError::from_io_at(io_err, "x.csv");
        assert!(matches!(err, ElaError::MissingInput { .. }));
    }

    #[test]
    fn test_from_io_at_other_kind() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ElaError::from_io_at(io_err, "x.csv");
        assert!(matches!(err, ElaError::Io(_)));
    }

    #[test]
    fn test_from_str() {
        let err: ElaError = "test error".into();
        assert!(matches!(err, ElaError::Other(_)));
        assert!(err == "test error");
    }

    #[test]
    fn test_feature_helper() {
        let err = ElaError::feature("ela_level", "singular covariance");
        let msg = err.to_string();
        assert!(msg.contains("ela_level"));
        assert!(msg.contains("singular covariance"));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ElaError::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_other() {
        use std::error::Error;
        let err = ElaError::Other("test".to_string());
        assert!(err.source().is_none());
    }
}
