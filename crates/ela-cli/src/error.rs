//! Error types for the `ela` binary.
//!
//! Each failure family maps to its own process exit code.

use bbob_ela::error::ElaError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// A file an earlier stage should have produced is absent
    #[error("Missing input: {0}")]
    MissingInput(PathBuf),

    /// Bad argument or configuration value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed input file
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Some batch submissions were rejected by the queue
    #[error("{0} job submission(s) rejected")]
    JobsRejected(usize),

    /// Any other pipeline failure
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

impl CliError {
    /// Numeric process status for this error
    pub(crate) fn code(&self) -> u8 {
        match self {
            Self::Pipeline(_) => 1,
            Self::MissingInput(_) => 3,
            Self::InvalidArgument(_) => 4,
            Self::InvalidData(_) => 5,
            Self::JobsRejected(_) => 6,
            Self::Io(_) => 7,
        }
    }

    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl From<ElaError> for CliError {
    fn from(e: ElaError) -> Self {
        match e {
            ElaError::MissingInput { path } => Self::MissingInput(path),
            ElaError::Io(err) => Self::Io(err),
            ElaError::UnsupportedSamplingMethod(_)
            | ElaError::UnsupportedFeatureClass(_)
            | ElaError::InvalidHyperparameter { .. } => Self::InvalidArgument(e.to_string()),
            ElaError::Parse { .. }
            | ElaError::SchemaMismatch { .. }
            | ElaError::Csv(_)
            | ElaError::Serialization(_) => Self::InvalidData(e.to_string()),
            other => Self::Pipeline(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_keeps_path() {
        let err = CliError::from(ElaError::MissingInput {
            path: PathBuf::from("table.csv"),
        });
        assert!(matches!(err, CliError::MissingInput(ref p) if p == &PathBuf::from("table.csv")));
        assert_eq!(err.code(), 3);
    }

    #[test]
    fn test_error_families() {
        let err = CliError::from(ElaError::UnsupportedFeatureClass("gcm".into()));
        assert_eq!(err.code(), 4);
        let err = CliError::from(ElaError::Csv("bad".into()));
        assert_eq!(err.code(), 5);
        let err = CliError::from(ElaError::Other("boom".into()));
        assert_eq!(err.to_string(), "Pipeline error: boom");
    }
}
