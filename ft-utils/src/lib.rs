//! Shared utility functions for the freeze tracker crates.

/// Date utility functions
pub mod dates {
    use crate::error::InvalidDateError;
    use chrono::{NaiveDate, NaiveDateTime};

    /// Date-only formats seen in the processed CSV files.
    /// `2010/07/01` is the hand-entered probe format, the others come from pandas exports.
    const DATE_FORMATS: [&str; 3] = ["%Y/%m/%d", "%Y-%m-%d", "%Y%m%d"];

    /// Date-time formats; only the date part is kept.
    const DATE_TIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
    ];

    /// Parse a calendar date in any of the formats used by the source CSVs.
    pub fn parse_date(s: &str) -> Result<NaiveDate, InvalidDateError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidDateError::new(s));
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(date);
            }
        }
        for format in DATE_TIME_FORMATS {
            if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(date_time.date());
            }
        }
        Err(InvalidDateError::new(s))
    }

    /// Build a date from separate year/month/day columns (IYEAR, IMONTH, IDAY).
    pub fn date_from_parts(
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<NaiveDate, InvalidDateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| InvalidDateError::new(format!("{year}-{month}-{day}")))
    }

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Format a NaiveDate as "YYYY/MM/DD", the probe data layout.
    pub fn format_slash_date(date: &NaiveDate) -> String {
        date.format("%Y/%m/%d").to_string()
    }

    /// Short label such as "Nov 10" (no zero padding on the day).
    pub fn format_month_day(date: &NaiveDate) -> String {
        date.format("%b %-d").to_string()
    }

}

/// Error types
pub mod error {
    use thiserror::Error;

    /// A field that should hold a calendar date could not be parsed as one.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[error("invalid date: {input:?}")]
    pub struct InvalidDateError {
        input: String,
    }

    impl InvalidDateError {
        pub fn new(input: impl Into<String>) -> Self {
            Self {
                input: input.into(),
            }
        }

        /// The offending input, untrimmed.
        pub fn input(&self) -> &str {
            &self.input
        }
    }
}
