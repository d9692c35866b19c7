//! Error types for projections, return estimation and series loading

use chrono::NaiveDate;
use thiserror::Error;

/// Broad class of a [`CalcError`], used by callers to pick a recovery policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied parameters that cannot be projected
    Validation,
    /// Historical data cannot support a trailing return
    Estimation,
    /// Result is not a finite number
    NumericOverflow,
}

/// Errors raised by the pure computation core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Degenerate annual return of {annual_return_percent}%: the fund would be wiped out")]
    DegenerateRate { annual_return_percent: f64 },

    #[error("Insufficient history: need at least 2 points, got {points}")]
    InsufficientHistory { points: usize },

    #[error("Comparison point on {date} has a zero value")]
    ZeroBaseValue { date: NaiveDate },

    #[error("Numeric overflow while computing {context}")]
    NumericOverflow { context: String },
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::InvalidInput { .. } | CalcError::DegenerateRate { .. } => ErrorKind::Validation,
            CalcError::InsufficientHistory { .. } | CalcError::ZeroBaseValue { .. } => ErrorKind::Estimation,
            CalcError::NumericOverflow { .. } => ErrorKind::NumericOverflow,
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput { field, reason: reason.into() }
    }
}

/// Errors raised while reading or converting historical NAV data
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date '{value}': {source}")]
    Date {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid NAV '{value}' on {date}")]
    Nav { date: NaiveDate, value: String },

    #[error("Provider returned status '{0}'")]
    Status(String),

    #[error("No history available for scheme {0}")]
    UnknownScheme(String),
}
