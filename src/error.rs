//! Error types for reducing, fitting and formatting lab data
//!
//! This module defines the failures encountered when preparing measurements,
//! fitting a line, or loading an experiment, along with a convenient `Result` alias.

/// Broad classification of an [`Error`].
///
/// Callers that only care whether the data was malformed, or whether it was
/// well-formed but could not support a straight line, can match on this instead
/// of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied data or parameters that can never be valid.
    InvalidInput,

    /// The data was well-formed, but no unique line can be fitted through it.
    DegenerateFit,

    /// Reading an experiment file failed.
    Io,
}

/// Errors that can occur while processing lab measurements.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A repeated-measurement group had no measurements in it.
    #[error("Measurement group {index} is empty")]
    EmptyGroup {
        /// Index of the point whose group was empty
        index: usize,
    },

    /// Significant figures must be a positive count.
    #[error("Cannot round to {0} significant figures; the count must be positive")]
    InvalidFigures(i32),

    /// Axis padding must be a finite factor of at least 1.
    #[error("Axis padding must be finite and at least 1, found {0}")]
    InvalidPadding(f64),

    /// Two sequences that describe the same points have different lengths.
    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        /// What was being compared
        what: &'static str,
        /// The required length
        expected: usize,
        /// The length actually supplied
        found: usize,
    },

    /// A value was NaN or infinite.
    #[error("Non-finite value in {0}")]
    NonFinite(&'static str),

    /// An uncertainty was below zero.
    #[error("Uncertainty for point {index} is negative")]
    NegativeUncertainty {
        /// Index of the offending point
        index: usize,
    },

    /// A line needs at least two points.
    #[error("At least 2 points are needed to fit a line, found {0}")]
    TooFewPoints(usize),

    /// Every x-value is the same, so the design matrix (X^T X) is singular.
    #[error("Design matrix (X^T X) is singular; all {n} x-values are identical")]
    SingularMatrix {
        /// Number of data points
        n: usize,
    },

    /// Failed to solve the algebraic system during fitting.
    ///
    /// Contains a static string describing the solver error.
    #[error("Failed to solve: {0}")]
    Algebra(&'static str),

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// A row of a CSV experiment file could not be parsed.
    #[error("Failed to parse line {line}: {content}")]
    Csv {
        /// 1-based line number
        line: usize,
        /// The offending line
        content: String,
    },

    /// A JSON experiment file could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Experiment files must be `.json` or `.csv`.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Reading an experiment file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
impl Error {
    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyGroup { .. }
            | Error::InvalidFigures(_)
            | Error::InvalidPadding(_)
            | Error::LengthMismatch { .. }
            | Error::NonFinite(_)
            | Error::NegativeUncertainty { .. }
            | Error::CastFailed
            | Error::Csv { .. }
            | Error::Json(_)
            | Error::UnsupportedFormat(_) => ErrorKind::InvalidInput,

            Error::TooFewPoints(_) | Error::SingularMatrix { .. } | Error::Algebra(_) => {
                ErrorKind::DegenerateFit
            }

            Error::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type for lab data processing
pub type Result<T> = std::result::Result<T, Error>;
