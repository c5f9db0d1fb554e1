//! Freezing and thawing degree days from daily mean temperatures.
//!
//! A day colder than 32°F contributes `32 - t` cold degree-days, a warmer
//! one `t - 32` hot degree-days, with `t` rounded to a whole degree first.
//! Running totals restart every July 1, so each season's cumulative curve
//! starts at zero.

use crate::aggregate::{cumulative_sum, SeasonalRecord};
use crate::error::{DataError, DatasetKind, Result};
use crate::normalize::{classify, normalize_rows, Normalized};
use crate::table::{Row, Table};
use chrono::{Datelike, NaiveDate};
use ft_season::{day_offset_in_season, City, Season};
use ft_utils::dates::{date_from_parts, format_date};
use log::info;

pub const IYEAR: &str = "IYEAR";
pub const IMONTH: &str = "IMONTH";
pub const IDAY: &str = "IDAY";
pub const AVG_DAILY_TEMP_F: &str = "AVG_DAILY_TEMP_F";
pub const DATE: &str = "DATE";
pub const COLD_F: &str = "COLD_F";
pub const HOT_F: &str = "HOT_F";
pub const INDEX: &str = "INDEX";
pub const CUMM_COLD_F: &str = "CUMM_COLD_F";
pub const CUMM_HOT_F: &str = "CUMM_HOT_F";

/// Freezing point in °F.
pub const FREEZING_F: f64 = 32.0;

/// File name prefix of the per-season degree-day files.
pub const DAILY_TEMPS_PREFIX: &str = "daily_temps";

/// One day's mean temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTemp {
    pub date: NaiveDate,
    pub season: Season,
    pub avg_daily_temp_f: f64,
}

impl DailyTemp {
    pub fn new(date: NaiveDate, avg_daily_temp_f: f64) -> Result<DailyTemp> {
        let (season, _) = classify(&date, DATE)?;
        Ok(DailyTemp {
            date,
            season,
            avg_daily_temp_f,
        })
    }
}

impl SeasonalRecord for DailyTemp {
    fn season(&self) -> Season {
        self.season
    }

    fn day_offset(&self) -> i64 {
        day_offset_in_season(&self.date)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DegreeDayRow {
    pub date: NaiveDate,
    pub season: Season,
    /// Rounded mean temperature.
    pub avg_daily_temp_f: f64,
    pub cold_f: f64,
    pub hot_f: f64,
    /// 0-based position of the day within its season.
    pub index: usize,
    pub cumulative_cold_f: f64,
    pub cumulative_hot_f: f64,
}

/// Read the `IYEAR/IMONTH/IDAY` columns as a date.
pub(crate) fn date_from_row(row: &Row<'_>) -> Result<NaiveDate> {
    let part = |column: &str| -> Result<u32> {
        let value = row.required_integer(column)?;
        u32::try_from(value).map_err(|_| DataError::InvalidNumber {
            column: column.to_string(),
            value: value.to_string(),
        })
    };
    let year = row.required_integer(IYEAR)?;
    let year = i32::try_from(year).map_err(|_| DataError::InvalidNumber {
        column: IYEAR.to_string(),
        value: year.to_string(),
    })?;
    date_from_parts(year, part(IMONTH)?, part(IDAY)?).map_err(|source| DataError::InvalidDate {
        column: format!("{IYEAR}/{IMONTH}/{IDAY}"),
        source,
    })
}

/// Parse `IYEAR,IMONTH,IDAY,AVG_DAILY_TEMP_F` rows. Days without a
/// temperature are filtered.
pub fn parse_daily(table: &Table) -> Result<Normalized<DailyTemp>> {
    normalize_rows(
        table,
        DatasetKind::DailyTemps,
        &[IYEAR, IMONTH, IDAY, AVG_DAILY_TEMP_F],
        |row| {
            let date = date_from_row(row)?;
            row.number(AVG_DAILY_TEMP_F)?
                .map(|t| DailyTemp::new(date, t))
                .transpose()
        },
    )
}

/// One day's rounded temperature and its degree days, before running totals.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DegreeDay {
    day: DailyTemp,
    avg_daily_temp_f: f64,
    cold_f: f64,
    hot_f: f64,
}

impl DegreeDay {
    fn new(day: DailyTemp) -> DegreeDay {
        // pandas rounds half to even
        let t = day.avg_daily_temp_f.round_ties_even();
        DegreeDay {
            day,
            avg_daily_temp_f: t,
            cold_f: (FREEZING_F - t).max(0.0),
            hot_f: (t - FREEZING_F).max(0.0),
        }
    }
}

impl SeasonalRecord for DegreeDay {
    fn season(&self) -> Season {
        self.day.season
    }

    fn day_offset(&self) -> i64 {
        self.day.day_offset()
    }
}

/// Degree days for every input day, ordered by season and then date.
pub fn derive(days: Vec<DailyTemp>) -> Vec<DegreeDayRow> {
    let cold = cumulative_sum(days.into_iter().map(DegreeDay::new), |d| Some(d.cold_f));
    let totals = cumulative_sum(cold, |c| Some(c.row.hot_f));
    let mut output: Vec<DegreeDayRow> = Vec::with_capacity(totals.len());
    for total in totals {
        let cold = total.row;
        let day = cold.row;
        let index = match output.last() {
            Some(previous) if previous.season == day.day.season => previous.index + 1,
            _ => 0,
        };
        output.push(DegreeDayRow {
            date: day.day.date,
            season: day.day.season,
            avg_daily_temp_f: day.avg_daily_temp_f,
            cold_f: day.cold_f,
            hot_f: day.hot_f,
            index,
            cumulative_cold_f: cold.running_total,
            cumulative_hot_f: total.running_total,
        });
    }
    info!("derived degree days for {} days", output.len());
    output
}

/// The per-season file layout read back by the loading normalizer.
pub fn to_table<'a>(rows: impl IntoIterator<Item = &'a DegreeDayRow>) -> Table {
    let mut table = Table::new([
        IYEAR,
        IMONTH,
        IDAY,
        AVG_DAILY_TEMP_F,
        DATE,
        COLD_F,
        HOT_F,
        INDEX,
        CUMM_COLD_F,
        CUMM_HOT_F,
    ]);
    for row in rows {
        table.push_row(vec![
            row.date.year().to_string(),
            row.date.month().to_string(),
            row.date.day().to_string(),
            row.avg_daily_temp_f.to_string(),
            format_date(&row.date),
            row.cold_f.to_string(),
            row.hot_f.to_string(),
            row.index.to_string(),
            row.cumulative_cold_f.to_string(),
            row.cumulative_hot_f.to_string(),
        ]);
    }
    table
}

/// One table per season from `first` through `last` start year. Seasons
/// without data still get a (header-only) table.
pub fn split_by_season(rows: &[DegreeDayRow], first: i32, last: i32) -> Vec<(Season, Table)> {
    Season::range(first, last)
        .into_iter()
        .map(|season| {
            let table = to_table(rows.iter().filter(|row| row.season == season));
            info!("season {}: {} days", season, table.len());
            (season, table)
        })
        .collect()
}

/// `daily_temps_2010-2011_ely.csv` style file name.
pub fn season_file_name(prefix: &str, season: &Season, city: &City) -> String {
    format!("{}_{}_{}.csv", prefix, season, city.code().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading;

    const DAILY: &str = "\
IYEAR,IMONTH,IDAY,AVG_DAILY_TEMP_F
2011,1,2,11.5
2010,6,30,80
2010,7,1,70.4
2010,7,2,33
2011,1,1,10.5
2011,7,1,20
2011,7,2,
";

    fn derived() -> Vec<DegreeDayRow> {
        let days = parse_daily(&Table::from_csv_str(DAILY).unwrap()).unwrap();
        assert_eq!(days.filtered, 1);
        derive(days.rows)
    }

    #[test]
    fn test_degree_days() {
        let rows = derived();
        let summary: Vec<(String, usize, f64, f64, f64, f64)> = rows
            .iter()
            .map(|r| {
                (
                    format_date(&r.date),
                    r.index,
                    r.cold_f,
                    r.hot_f,
                    r.cumulative_cold_f,
                    r.cumulative_hot_f,
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("2010-06-30".to_string(), 0, 0.0, 48.0, 0.0, 48.0),
                ("2010-07-01".to_string(), 0, 0.0, 38.0, 0.0, 38.0),
                ("2010-07-02".to_string(), 1, 0.0, 1.0, 0.0, 39.0),
                ("2011-01-01".to_string(), 2, 22.0, 0.0, 22.0, 39.0),
                ("2011-01-02".to_string(), 3, 20.0, 0.0, 42.0, 39.0),
                ("2011-07-01".to_string(), 0, 12.0, 0.0, 12.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_split_by_season() {
        let rows = derived();
        let split = split_by_season(&rows, 2010, 2012);
        let sizes: Vec<(String, usize)> = split.iter().map(|(s, t)| (s.label(), t.len())).collect();
        assert_eq!(
            sizes,
            vec![
                ("2010-2011".to_string(), 4),
                ("2011-2012".to_string(), 1),
                ("2012-2013".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_split_files_feed_loading_normalizer() {
        let rows = derived();
        let (season, table) = split_by_season(&rows, 2010, 2010).remove(0);
        let table = table
            .with_constant(loading::NAME, &season.label())
            .with_constant(loading::CITY, "ELY");
        let loading = loading::normalize(&table).unwrap().rows;
        assert_eq!(loading.len(), 4);
        assert_eq!(loading[3].cumulative_cold_f, 42.0);
        assert_eq!(loading[3].index, Some(3));
        assert_eq!(loading[3].days_since_season_start, 185);
    }

    #[test]
    fn test_season_file_name() {
        let season: Season = "2019-2020".parse().unwrap();
        assert_eq!(
            season_file_name(DAILY_TEMPS_PREFIX, &season, &City::Orr),
            "daily_temps_2019-2020_orr.csv"
        );
    }
}
