//! Winter seasons.
//!
//! A season (a "winter year") runs from July 1 through June 30 of the
//! following calendar year and is labelled by both years, e.g. `2010-2011`.
//! Frost and degree-day charts overlay several seasons on one x-axis by
//! measuring every date as a day offset from the season's July 1.

use crate::date_range::DateRange;
use crate::error::SeasonParseError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First month of a season.
pub const SEASON_START_MONTH: u32 = 7;

/// Default first season start year shown by the dashboard.
pub const DEFAULT_FIRST_SEASON: i32 = 2010;

/// Default last season start year shown by the dashboard.
pub const DEFAULT_LAST_SEASON: i32 = 2022;

/// Days from July 1 through December 31, identical in every year.
const DAYS_JULY_THROUGH_DECEMBER: i64 = 184;

/// Zero-based ordinal of July 1 in a non-leap year.
const JULY_1_ORDINAL0: i64 = 181;

/// Start year of the season containing `date`: the date's own year from
/// July onwards, the previous year from January through June.
pub fn season_start_year(date: &NaiveDate) -> i32 {
    if date.month() >= SEASON_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    }
}

/// Season label such as `2010-2011` for the season containing `date`.
pub fn season_label(date: &NaiveDate) -> String {
    let start_year = season_start_year(date);
    format!("{}-{}", start_year, start_year + 1)
}

/// Days elapsed between July 1 of the season's start year and `date`.
///
/// July 1 is day 0 and June 30 is day 364 (365 when the season contains
/// February 29). Never negative.
pub fn day_offset_in_season(date: &NaiveDate) -> i64 {
    let ordinal0 = i64::from(date.ordinal0());
    if date.month() >= SEASON_START_MONTH {
        ordinal0 - JULY_1_ORDINAL0 - i64::from(is_leap_year(date.year()))
    } else {
        DAYS_JULY_THROUGH_DECEMBER + ordinal0
    }
}

/// Days between `date` and July 1 of an externally supplied season start
/// year. Unlike [`day_offset_in_season`] the start year is not derived from
/// the date, so the result is negative when the date precedes that July 1.
pub fn day_offset_from_start(date: &NaiveDate, start_year: i32) -> Option<i64> {
    let july_1 = NaiveDate::from_ymd_opt(start_year, SEASON_START_MONTH, 1)?;
    Some((*date - july_1).num_days())
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// One July 1 - June 30 season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Season {
    start: NaiveDate,
    end: NaiveDate,
}

impl Season {
    /// The season starting July 1 of `start_year`, if both of its endpoints
    /// are representable dates.
    pub fn new(start_year: i32) -> Option<Season> {
        let start = NaiveDate::from_ymd_opt(start_year, SEASON_START_MONTH, 1)?;
        let end = NaiveDate::from_ymd_opt(start_year.checked_add(1)?, 6, 30)?;
        Some(Season { start, end })
    }

    /// The season containing `date`.
    pub fn of(date: &NaiveDate) -> Option<Season> {
        Season::new(season_start_year(date))
    }

    /// Seasons starting in `first..=last`, oldest first.
    pub fn range(first: i32, last: i32) -> Vec<Season> {
        (first..=last).filter_map(Season::new).collect()
    }

    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    pub fn end_year(&self) -> i32 {
        self.end.year()
    }

    /// July 1 of the start year.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// June 30 of the end year (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Number of days in the season: 365, or 366 when it contains February 29.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Every date of the season, July 1 first.
    pub fn days(&self) -> DateRange {
        DateRange(self.start, self.end)
    }

    /// The season label, e.g. `2010-2011`.
    pub fn label(&self) -> String {
        self.to_string()
    }

    pub fn next(&self) -> Option<Season> {
        Season::new(self.start_year().checked_add(1)?)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year(), self.end_year())
    }
}

impl FromStr for Season {
    type Err = SeasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (first, second) = trimmed
            .split_once('-')
            .ok_or_else(|| SeasonParseError::new(s))?;
        let digits_only =
            |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
        if !digits_only(first) || !digits_only(second) {
            return Err(SeasonParseError::new(s));
        }
        let start_year: i32 = first.parse().map_err(|_| SeasonParseError::new(s))?;
        let end_year: i32 = second.parse().map_err(|_| SeasonParseError::new(s))?;
        if start_year.checked_add(1) != Some(end_year) {
            return Err(SeasonParseError::new(s));
        }
        Season::new(start_year).ok_or_else(|| SeasonParseError::new(s))
    }
}

impl From<Season> for String {
    fn from(value: Season) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Season {
    type Error = SeasonParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
