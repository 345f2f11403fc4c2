//! Error types for trial reconstruction and batch processing

use std::fmt;
use std::path::PathBuf;

/// Main error type for all reconstruction operations
#[derive(Debug)]
pub enum StimulusError {
    /// A condition code fell outside the documented taxonomy
    ///
    /// Fatal for the trial that carried it, never for the batch.
    UnknownCondition {
        /// Experiment family the trial belongs to
        experiment: &'static str,
        /// Name of the offending field
        field: &'static str,
        /// Value found in the trial record
        value: i64,
    },

    /// A constrained sample could not be satisfied
    ///
    /// Raised only when the documented relaxation is itself impossible,
    /// i.e. the candidate pool is empty.
    InsufficientPool {
        /// Operation that ran out of candidates
        operation: &'static str,
        /// Number of distinct elements requested
        requested: usize,
        /// Number of elements available
        available: usize,
    },

    /// A defensive internal check failed
    ///
    /// Signals a programming bug, not bad input. The affected trial is
    /// skipped and the batch continues.
    InvariantViolation {
        /// Name of the violated check
        check: &'static str,
        /// Description of the observed state
        detail: String,
    },

    /// A trial file row was malformed or out of range
    TrialData {
        /// Path of the trial file
        path: PathBuf,
        /// 1-based line number of the offending row
        line: usize,
        /// Description of what's wrong with the row
        reason: String,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered stimulus image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for StimulusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCondition {
                experiment,
                field,
                value,
            } => {
                write!(f, "Unknown {experiment} condition: {field} = {value}")
            }
            Self::InsufficientPool {
                operation,
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient pool for {operation}: requested {requested}, available {available}"
                )
            }
            Self::InvariantViolation { check, detail } => {
                write!(f, "Invariant violation in {check}: {detail}")
            }
            Self::TrialData { path, line, reason } => {
                write!(f, "Bad trial data at {}:{line}: {reason}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for StimulusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for reconstruction results
pub type Result<T> = std::result::Result<T, StimulusError>;

impl From<std::io::Error> for StimulusError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an unknown condition error
pub const fn unknown_condition(
    experiment: &'static str,
    field: &'static str,
    value: i64,
) -> StimulusError {
    StimulusError::UnknownCondition {
        experiment,
        field,
        value,
    }
}

/// Create an insufficient pool error
pub const fn insufficient_pool(
    operation: &'static str,
    requested: usize,
    available: usize,
) -> StimulusError {
    StimulusError::InsufficientPool {
        operation,
        requested,
        available,
    }
}

/// Create an invariant violation error
pub fn invariant_violation(check: &'static str, detail: &impl ToString) -> StimulusError {
    StimulusError::InvariantViolation {
        check,
        detail: detail.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> StimulusError {
    StimulusError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let err = unknown_condition("dumbbell", "conditions", 9);
        assert_eq!(err.to_string(), "Unknown dumbbell condition: conditions = 9");

        let err = insufficient_pool("sample", 3, 1);
        assert_eq!(
            err.to_string(),
            "Insufficient pool for sample: requested 3, available 1"
        );
    }

    #[test]
    fn test_invariant_detail_is_preserved() {
        let err = invariant_violation("grid_bijection", &"cell (1, 2) double-occupied");
        match err {
            StimulusError::InvariantViolation { check, detail } => {
                assert_eq!(check, "grid_bijection");
                assert!(detail.contains("double-occupied"));
            }
            _ => unreachable!("Expected InvariantViolation error type"),
        }
    }
}
