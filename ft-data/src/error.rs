/// Error types for table normalization.
use ft_season::SeasonParseError;
use ft_utils::error::InvalidDateError;
use std::fmt;
use thiserror::Error;

/// The kinds of source table the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatasetKind {
    FrostThaw,
    Span,
    Loading,
    MaxDepth,
    Incidents,
    DailyTemps,
    HourlyTemps,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatasetKind::FrostThaw => "frost/thaw",
            DatasetKind::Span => "frost span",
            DatasetKind::Loading => "cold/hot loading",
            DatasetKind::MaxDepth => "max frost depth",
            DatasetKind::Incidents => "incidents",
            DatasetKind::DailyTemps => "daily temperatures",
            DatasetKind::HourlyTemps => "hourly temperatures",
        };
        f.write_str(name)
    }
}

/// Errors raised while reading or normalizing a table.
///
/// `InvalidDate`, `InvalidSeason`, `InvalidNumber`, `MissingValue` and
/// `NegativeDuration` are row-level: the normalizers skip the row and keep
/// going. The rest abort the dataset.
#[derive(Error, Debug)]
pub enum DataError {
    /// A date column could not be parsed
    #[error("column {column}: {source}")]
    InvalidDate {
        column: String,
        #[source]
        source: InvalidDateError,
    },

    /// A season label column could not be parsed
    #[error("column {column}: {source}")]
    InvalidSeason {
        column: String,
        #[source]
        source: SeasonParseError,
    },

    /// A numeric column held something else
    #[error("column {column}: invalid number {value:?}")]
    InvalidNumber { column: String, value: String },

    /// A required text cell was empty
    #[error("column {column}: missing value")]
    MissingValue { column: String },

    /// A span record ends before it starts
    #[error("negative duration: end {end} is before start {start}")]
    NegativeDuration {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// The table does not have a column the dataset needs
    #[error("{dataset} data is missing required column {column:?}")]
    MissingRequiredColumn { dataset: DatasetKind, column: String },

    /// Nothing could be read for the dataset
    #[error("no {0} data available")]
    NoData(DatasetKind),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// True for errors that only affect a single row.
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            DataError::InvalidDate { .. }
                | DataError::InvalidSeason { .. }
                | DataError::InvalidNumber { .. }
                | DataError::MissingValue { .. }
                | DataError::NegativeDuration { .. }
        )
    }
}

/// Type alias for Results using DataError
pub type Result<T> = std::result::Result<T, DataError>;
