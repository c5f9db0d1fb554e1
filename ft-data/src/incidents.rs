//! Incident dates (frost-related road or pipe failures) shown as chart markers.

use crate::aggregate::SeasonalRecord;
use crate::error::{DatasetKind, Result};
use crate::normalize::{classify, normalize_rows, season_cell, Normalized};
use crate::table::Table;
use chrono::NaiveDate;
use ft_season::Season;
use log::warn;

pub const WINTER: &str = "Winter";
pub const DATE: &str = "Date";

#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRow {
    pub date: NaiveDate,
    pub season: Season,
    pub day_offset: i64,
}

impl SeasonalRecord for IncidentRow {
    fn season(&self) -> Season {
        self.season
    }

    fn day_offset(&self) -> i64 {
        self.day_offset
    }
}

/// Parse `Winter,Date` rows. The season always comes from the date; a
/// disagreeing `Winter` cell is logged and ignored.
pub fn normalize(table: &Table) -> Result<Normalized<IncidentRow>> {
    normalize_rows(table, DatasetKind::Incidents, &[DATE], |row| {
        let date = row.date(DATE)?;
        let (season, day_offset) = classify(&date, DATE)?;
        if let Ok(Some(labelled)) = season_cell(row, WINTER) {
            if labelled != season {
                warn!(
                    "incident {} is labelled {} but falls in {}",
                    date, labelled, season
                );
            }
        }
        Ok(Some(IncidentRow {
            date,
            season,
            day_offset,
        }))
    })
}
