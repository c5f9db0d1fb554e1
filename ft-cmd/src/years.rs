//! `make-years` and `import-hourly`: derive the daily and per-season
//! degree-day files from raw temperature exports.

use crate::config::DashboardConfig;
use crate::loader::{read_table, write_table};
use anyhow::Context;
use ft_data::degree_days::{self, season_file_name};
use ft_data::hourly;
use ft_season::City;
use log::info;
use std::path::{Path, PathBuf};

/// Split a city's daily temperatures into one degree-day file per season.
/// Returns the paths written.
pub fn run_make_years(
    config: &DashboardConfig,
    input: &Path,
    city: &str,
    first: Option<i32>,
    last: Option<i32>,
    output_dir: Option<&Path>,
) -> anyhow::Result<Vec<PathBuf>> {
    let city = City::parse(city);
    let first = first.unwrap_or(config.first_season);
    let last = last.unwrap_or(config.last_season);
    if first > last {
        anyhow::bail!("First season {} is after last season {}", first, last);
    }
    let output_dir = output_dir.unwrap_or(config.data_dir.as_path());

    let table = read_table(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let daily = degree_days::parse_daily(&table)?;
    info!(
        "Read {} days for {} ({} skipped, {} without temperature)",
        daily.len(),
        city,
        daily.skipped,
        daily.filtered
    );
    let rows = degree_days::derive(daily.rows);

    let mut written = Vec::new();
    for (season, table) in degree_days::split_by_season(&rows, first, last) {
        let path = output_dir.join(season_file_name(&config.loading_prefix, &season, &city));
        write_table(&table, &path)?;
        written.push(path);
    }
    info!("Wrote {} season files for {}", written.len(), city);
    Ok(written)
}

/// Reduce hourly readings to the daily mean file `make-years` reads.
pub fn run_import_hourly(input: &Path, output: &Path) -> anyhow::Result<()> {
    let table = read_table(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let daily = hourly::daily_means(&table)?;
    info!(
        "Averaged {} days ({} readings skipped, {} filtered)",
        daily.len(),
        daily.skipped,
        daily.filtered
    );
    write_table(&hourly::to_table(&daily.rows), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recompute::build_dashboard;
    use chrono::NaiveDate;
    use ft_data::Selection;

    const HOURLY: &str = "\
SOURCE,IYEAR,IMONTH,IDAY,IHOUR,TMP_F
7,2010,7,1,0,60
7,2010,7,1,12,80
4,2010,7,1,13,200
7,2010,12,31,0,0
7,2011,1,1,0,-4
7,2011,7,1,0,50
";

    #[test]
    fn test_import_hourly_then_make_years() {
        let dir = tempfile::tempdir().unwrap();
        let hourly_path = dir.path().join("hourly.csv");
        let daily_path = dir.path().join("daily_temps_orr.csv");
        std::fs::write(&hourly_path, HOURLY).unwrap();

        run_import_hourly(&hourly_path, &daily_path).unwrap();
        let daily = std::fs::read_to_string(&daily_path).unwrap();
        assert!(daily.starts_with("IYEAR,IMONTH,IDAY,AVG_DAILY_TEMP_F\n2010,7,1,70\n"));

        let config = DashboardConfig {
            first_season: 2010,
            last_season: 2011,
            ..DashboardConfig::default()
        }
        .with_data_dir(Some(dir.path().to_path_buf()));
        let written = run_make_years(&config, &daily_path, "orr", None, None, None).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["daily_temps_2010-2011_orr.csv", "daily_temps_2011-2012_orr.csv"]
        );

        let today = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let selection = Selection::parse_labels(["2010-2011"]).unwrap();
        let dashboard = build_dashboard(&config, &selection, today);
        let loading = dashboard.loading.ready().unwrap();
        let cold = &loading.seasons[0].cold[0];
        assert_eq!(cold.category, "ORR");
        // Dec 31 adds 32, Jan 1 adds 36
        let last = cold.points.last().unwrap();
        assert_eq!((last.x, last.y), (2, 68.0));
    }

    #[test]
    fn test_make_years_rejects_reversed_range() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::default();
        let input = dir.path().join("x.csv");
        let err = run_make_years(&config, &input, "ely", Some(2020), Some(2010), None).unwrap_err();
        assert!(err.to_string().contains("after last season"));
    }
}
