//! Hourly NOAA readings reduced to daily mean temperatures.

use crate::degree_days::{date_from_row, DailyTemp, AVG_DAILY_TEMP_F, IDAY, IMONTH, IYEAR};
use crate::error::{DatasetKind, Result};
use crate::normalize::{normalize_rows, Normalized};
use crate::table::Table;
use chrono::{Datelike, NaiveDate};
use log::info;
use std::collections::BTreeMap;

pub const SOURCE: &str = "SOURCE";
pub const TMP_F: &str = "TMP_F";

/// NOAA source flag of the routine hourly observations.
pub const HOURLY_SOURCE: i64 = 7;

/// Average `TMP_F` per calendar day over the `SOURCE == 7` readings.
///
/// Other sources and readings without a temperature count as filtered.
/// Days come out in date order.
pub fn daily_means(table: &Table) -> Result<Normalized<DailyTemp>> {
    let readings = normalize_rows(
        table,
        DatasetKind::HourlyTemps,
        &[SOURCE, IYEAR, IMONTH, IDAY, TMP_F],
        |row| {
            if row.required_integer(SOURCE)? != HOURLY_SOURCE {
                return Ok(None);
            }
            let date = date_from_row(row)?;
            Ok(row.number(TMP_F)?.map(|t| (date, t)))
        },
    )?;

    let mut by_day: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for (date, t) in readings.rows {
        let entry = by_day.entry(date).or_insert((0.0, 0));
        entry.0 += t;
        entry.1 += 1;
    }
    let rows = by_day
        .into_iter()
        .map(|(date, (sum, count))| DailyTemp::new(date, sum / count as f64))
        .collect::<Result<Vec<_>>>()?;
    info!("averaged hourly readings into {} days", rows.len());
    Ok(Normalized {
        rows,
        skipped: readings.skipped,
        filtered: readings.filtered,
    })
}

/// The `IYEAR,IMONTH,IDAY,AVG_DAILY_TEMP_F` layout read by the degree-day step.
pub fn to_table(days: &[DailyTemp]) -> Table {
    let mut table = Table::new([IYEAR, IMONTH, IDAY, AVG_DAILY_TEMP_F]);
    for day in days {
        table.push_row(vec![
            day.date.year().to_string(),
            day.date.month().to_string(),
            day.date.day().to_string(),
            day.avg_daily_temp_f.to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::degree_days::parse_daily;

    const HOURLY: &str = "\
SOURCE,IYEAR,IMONTH,IDAY,IHOUR,TMP_F
7,2015.0,1,2,0,30.5
7,2015,1,1,0,10
4,2015,1,1,1,100
7,2015,1,1,2,20
7,2015,1,1,3,
7,2015,13,1,0,5
";

    #[test]
    fn test_daily_means() {
        let daily = daily_means(&Table::from_csv_str(HOURLY).unwrap()).unwrap();
        assert_eq!(daily.skipped, 1);
        assert_eq!(daily.filtered, 2);
        let means: Vec<(String, f64)> = daily
            .rows
            .iter()
            .map(|d| (d.date.to_string(), d.avg_daily_temp_f))
            .collect();
        assert_eq!(
            means,
            vec![("2015-01-01".to_string(), 15.0), ("2015-01-02".to_string(), 30.5)]
        );
        assert_eq!(daily.rows[0].season.label(), "2014-2015");
    }

    #[test]
    fn test_daily_table_feeds_degree_days() {
        let daily = daily_means(&Table::from_csv_str(HOURLY).unwrap()).unwrap().rows;
        let table = to_table(&daily);
        assert_eq!(table.headers(), ["IYEAR", "IMONTH", "IDAY", "AVG_DAILY_TEMP_F"]);
        assert_eq!(parse_daily(&table).unwrap().rows, daily);
    }
}
