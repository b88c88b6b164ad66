use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Degree, ValueColumn};

/// Binary-level error: a message plus the process exit code.
///
/// Exit codes:
/// - `2` input/configuration problems
/// - `3` no usable data (nothing parsed)
/// - `4` numerical or export failures
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Reasons a trend fit cannot be produced.
///
/// Each variant is a recoverable condition the front-end is expected to
/// present on its own terms; none of them indicates a bug.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// The series is empty: no row survived date normalization.
    #[error("No rows could be dated; nothing to fit.")]
    NoData,

    /// The date range selects no entries.
    #[error("No data between {start} and {end}.")]
    EmptyRange { start: NaiveDate, end: NaiveDate },

    /// Entries exist but none carries a value for the column.
    #[error("No values for column `{column}` in the selected view.")]
    NoValues { column: ValueColumn },

    /// Too few distinct dates to determine the polynomial.
    #[error(
        "Insufficient data for a degree-{degree} trend: need at least {required} distinct dates, have {available}."
    )]
    InsufficientData {
        degree: Degree,
        required: usize,
        available: usize,
    },

    /// Abscissas and ordinates handed to the solver differ in length.
    #[error("Mismatched fit input: {xs} abscissas, {ys} ordinates.")]
    LengthMismatch { xs: usize, ys: usize },

    /// The least-squares solver failed.
    #[error("Least-squares solve failed for a degree-{degree} trend.")]
    Singular { degree: Degree },
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let code = match err {
            FitError::NoData => 3,
            FitError::Singular { .. } | FitError::LengthMismatch { .. } => 4,
            _ => 2,
        };
        AppError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message_names_minimum() {
        let err = FitError::InsufficientData {
            degree: Degree::Quadratic,
            required: 3,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data for a degree-2 trend: need at least 3 distinct dates, have 2."
        );
    }

    #[test]
    fn fit_errors_map_to_exit_codes() {
        assert_eq!(AppError::from(FitError::NoData).exit_code(), 3);
        assert_eq!(
            AppError::from(FitError::Singular { degree: Degree::Linear }).exit_code(),
            4
        );
        let empty = FitError::EmptyRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        };
        assert_eq!(AppError::from(empty).exit_code(), 2);
    }
}
