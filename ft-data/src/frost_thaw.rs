//! Frost and thaw depth probe readings.
//!
//! Source layout: `County,Date,THAW_DEPTH_in,FROST_DEPTH_in,SECONDARY_FROST_DEPTH_in`
//! with dates as `YYYY/MM/DD`. The secondary depth column is a legacy field
//! and is ignored. The prepared layout written by [`to_table`] adds `Winter`
//! and `days_after_Jul_1`; reading it back yields the same rows.

use crate::aggregate::SeasonalRecord;
use crate::error::{DatasetKind, Result};
use crate::normalize::{classify, normalize_rows, Normalized};
use crate::table::Table;
use chrono::NaiveDate;
use ft_season::Season;
use ft_utils::dates::format_slash_date;

pub const COUNTY: &str = "County";
pub const DATE: &str = "Date";
pub const THAW_DEPTH: &str = "THAW_DEPTH_in";
pub const FROST_DEPTH: &str = "FROST_DEPTH_in";
pub const SECONDARY_FROST_DEPTH: &str = "SECONDARY_FROST_DEPTH_in";
pub const WINTER: &str = "Winter";
pub const DAYS_AFTER_JUL_1: &str = "days_after_Jul_1";

const REQUIRED: [&str; 3] = [DATE, THAW_DEPTH, FROST_DEPTH];

/// One probe reading with its season attached.
#[derive(Debug, Clone, PartialEq)]
pub struct FrostThawRow {
    pub county: Option<String>,
    pub date: NaiveDate,
    pub season: Season,
    pub day_offset: i64,
    pub thaw_depth_in: Option<f64>,
    pub frost_depth_in: Option<f64>,
}

impl SeasonalRecord for FrostThawRow {
    fn season(&self) -> Season {
        self.season
    }

    fn day_offset(&self) -> i64 {
        self.day_offset
    }
}

/// Attach season and day offset to each reading. Rows with neither a thaw
/// nor a frost depth are dropped; rows with only one of them are kept.
pub fn normalize(table: &Table) -> Result<Normalized<FrostThawRow>> {
    normalize_rows(table, DatasetKind::FrostThaw, &REQUIRED, |row| {
        let date = row.date(DATE)?;
        let thaw_depth_in = row.number(THAW_DEPTH)?;
        let frost_depth_in = row.number(FROST_DEPTH)?;
        if thaw_depth_in.is_none() && frost_depth_in.is_none() {
            return Ok(None);
        }
        // Winter / days_after_Jul_1 from a prepared file are recomputed, not trusted
        let (season, day_offset) = classify(&date, DATE)?;
        Ok(Some(FrostThawRow {
            county: row.get(COUNTY).map(str::to_string),
            date,
            season,
            day_offset,
            thaw_depth_in,
            frost_depth_in,
        }))
    })
}

/// The prepared frost/thaw table, ready to be written as CSV.
pub fn to_table(rows: &[FrostThawRow]) -> Table {
    let mut table = Table::new([COUNTY, DATE, THAW_DEPTH, FROST_DEPTH, WINTER, DAYS_AFTER_JUL_1]);
    let number = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    for row in rows {
        table.push_row(vec![
            row.county.clone().unwrap_or_default(),
            format_slash_date(&row.date),
            number(row.thaw_depth_in),
            number(row.frost_depth_in),
            row.season.label(),
            row.day_offset.to_string(),
        ]);
    }
    table
}
