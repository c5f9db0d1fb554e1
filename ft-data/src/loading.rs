//! Cold/hot loading: cumulative freezing and thawing degree days per city.
//!
//! Source layout is the per-season file written by the yearly split
//! (`daily_temps_{season}_{city}.csv`), with `NAME` and `CITY` stamped on by
//! the loader. Required columns: `DATE,IYEAR,CUMM_COLD_F,CUMM_HOT_F,CITY`.

use crate::aggregate::SeasonalRecord;
use crate::error::{DataError, DatasetKind, Result};
use crate::normalize::{normalize_rows, season_cell, Normalized};
use crate::table::Table;
use chrono::NaiveDate;
use ft_season::{day_offset_from_start, City, Season};

pub const DATE: &str = "DATE";
pub const IYEAR: &str = "IYEAR";
pub const NAME: &str = "NAME";
pub const CITY: &str = "CITY";
pub const INDEX: &str = "INDEX";
pub const AVG_DAILY_TEMP_F: &str = "AVG_DAILY_TEMP_F";
pub const CUMM_COLD_F: &str = "CUMM_COLD_F";
pub const CUMM_HOT_F: &str = "CUMM_HOT_F";

const REQUIRED: [&str; 5] = [DATE, IYEAR, CUMM_COLD_F, CUMM_HOT_F, CITY];

#[derive(Debug, Clone, PartialEq)]
pub struct LoadingRow {
    pub date: NaiveDate,
    pub season: Season,
    /// Days between July 1 of the row's own season-start year and `date`.
    pub days_since_season_start: i64,
    /// Position within the season as written by the yearly split.
    pub index: Option<i64>,
    pub city: City,
    pub color: &'static str,
    pub avg_daily_temp_f: Option<f64>,
    pub cumulative_cold_f: f64,
    pub cumulative_hot_f: f64,
}

impl SeasonalRecord for LoadingRow {
    fn season(&self) -> Season {
        self.season
    }

    fn day_offset(&self) -> i64 {
        self.days_since_season_start
    }

    fn category(&self) -> Option<&City> {
        Some(&self.city)
    }
}

/// Attach season, day count and city color to each loading row.
///
/// The season-start year is taken from the row, not derived from `DATE`: the
/// `NAME` season label when present, otherwise `IYEAR`.
pub fn normalize(table: &Table) -> Result<Normalized<LoadingRow>> {
    normalize_rows(table, DatasetKind::Loading, &REQUIRED, |row| {
        let date = row.date(DATE)?;
        let season = match season_cell(row, NAME)? {
            Some(season) => season,
            None => {
                let year = row.required_integer(IYEAR)?;
                i32::try_from(year)
                    .ok()
                    .and_then(Season::new)
                    .ok_or_else(|| DataError::InvalidNumber {
                        column: IYEAR.to_string(),
                        value: year.to_string(),
                    })?
            }
        };
        let days_since_season_start = day_offset_from_start(&date, season.start_year())
            .ok_or_else(|| DataError::InvalidNumber {
                column: IYEAR.to_string(),
                value: season.start_year().to_string(),
            })?;
        let city = City::parse(row.required(CITY)?);
        let index = match row.get(INDEX) {
            Some(_) => Some(row.required_integer(INDEX)?),
            None => None,
        };
        Ok(Some(LoadingRow {
            date,
            season,
            days_since_season_start,
            index,
            color: city.display_color(),
            city,
            avg_daily_temp_f: row.number(AVG_DAILY_TEMP_F)?,
            cumulative_cold_f: row.required_number(CUMM_COLD_F)?,
            cumulative_hot_f: row.required_number(CUMM_HOT_F)?,
        }))
    })
}
