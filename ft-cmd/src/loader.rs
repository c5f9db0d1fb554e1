//! Reading and writing the processed CSV files.
//!
//! Files may be stored gzip-compressed: a path ending in `.gz` is always
//! decompressed, and a missing `name.csv` falls back to `name.csv.gz`.

use crate::config::DashboardConfig;
use anyhow::Context;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use ft_chart::SourceTables;
use ft_data::degree_days::season_file_name;
use ft_data::{loading, DataError, DatasetKind, Table};
use ft_season::Season;
use log::{info, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

fn gzip_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

fn is_not_found(e: &DataError) -> bool {
    matches!(e, DataError::Io(io) if io.kind() == ErrorKind::NotFound)
}

/// Read one CSV table from `path`.
pub fn read_table(path: &Path) -> ft_data::Result<Table> {
    let path = if !path.exists() && !is_gzip(path) && gzip_sibling(path).exists() {
        gzip_sibling(path)
    } else {
        path.to_path_buf()
    };
    let file = BufReader::new(File::open(&path)?);
    let table = if is_gzip(&path) {
        Table::from_reader(GzDecoder::new(file))?
    } else {
        Table::from_reader(file)?
    };
    info!("Read {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Write `table` as CSV, gzip-compressed when `path` ends in `.gz`.
/// Parent directories are created as needed.
pub fn write_table(table: &Table, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = BufWriter::new(
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
    );
    if is_gzip(path) {
        let mut encoder = GzEncoder::new(file, Compression::default());
        table.write_csv(&mut encoder)?;
        encoder.finish()?.flush()?;
    } else {
        table.write_csv(file)?;
    }
    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Read every per-season, per-city degree-day file and stack them, stamping
/// each file's season label and city on its rows. Missing files are
/// skipped; finding none at all is `NoData`.
pub fn load_loading(config: &DashboardConfig) -> ft_data::Result<Table> {
    let mut tables = Vec::new();
    for season in Season::range(config.first_season, config.last_season) {
        for city in &config.cities {
            let path = config.path(&season_file_name(&config.loading_prefix, &season, city));
            match read_table(&path) {
                Ok(table) => tables.push(
                    table
                        .with_constant(loading::NAME, &season.label())
                        .with_constant(loading::CITY, city.code()),
                ),
                Err(e) if is_not_found(&e) => {
                    warn!("Skipping missing loading file {}", path.display());
                }
                Err(e) => return Err(e),
            }
        }
    }
    if tables.is_empty() {
        return Err(DataError::NoData(DatasetKind::Loading));
    }
    info!("Loaded {} loading files", tables.len());
    Ok(Table::concat(tables))
}

/// Read every dataset the dashboard needs. Failures stay attached to their
/// dataset.
pub fn load_tables(config: &DashboardConfig) -> SourceTables {
    let read = |file: &str| {
        let path = config.path(file);
        read_table(&path).inspect_err(|e| warn!("Failed to read {}: {}", path.display(), e))
    };
    SourceTables {
        max_depth: read(&config.depth_file),
        span: read(&config.span_file),
        freeze_thaw: read(&config.freeze_thaw_file),
        loading: load_loading(config),
        incidents: read(&config.incidents_file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_season::City;

    const SPANS: &str = "Frost_Start,Frost_End\n2010/11/20,2011/04/30\n";

    fn config(dir: &Path) -> DashboardConfig {
        DashboardConfig {
            first_season: 2010,
            last_season: 2011,
            ..DashboardConfig::default()
        }
        .with_data_dir(Some(dir.to_path_buf()))
    }

    #[test]
    fn test_gzip_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let table = Table::from_csv_str(SPANS).unwrap();
        let path = dir.path().join("frost_span.csv.gz");
        write_table(&table, &path).unwrap();
        assert_eq!(read_table(&path).unwrap(), table);
        // plain name falls back to the compressed file
        assert_eq!(read_table(&dir.path().join("frost_span.csv")).unwrap(), table);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table(&dir.path().join("nope.csv")).unwrap_err();
        assert!(is_not_found(&err));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/spans.csv");
        write_table(&Table::from_csv_str(SPANS).unwrap(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SPANS);
    }

    #[test]
    fn test_load_loading_stamps_name_and_city() {
        let dir = tempfile::tempdir().unwrap();
        let daily = "IYEAR,IMONTH,IDAY,DATE,CUMM_COLD_F,CUMM_HOT_F\n2010,7,1,2010-07-01,0,38\n";
        std::fs::write(dir.path().join("daily_temps_2010-2011_ely.csv"), daily).unwrap();
        std::fs::write(dir.path().join("daily_temps_2011-2012_orr.csv"), daily).unwrap();
        let table = load_loading(&config(dir.path())).unwrap();
        assert_eq!(table.len(), 2);
        let stamped: Vec<(String, String)> = table
            .rows()
            .map(|r| {
                (
                    r.get(loading::NAME).unwrap().to_string(),
                    r.get(loading::CITY).unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(
            stamped,
            vec![
                ("2010-2011".to_string(), "ELY".to_string()),
                ("2011-2012".to_string(), "ORR".to_string()),
            ]
        );
        let rows = loading::normalize(&table).unwrap().rows;
        assert_eq!(rows[1].city, City::Orr);
        assert_eq!(rows[1].season.label(), "2011-2012");
    }

    #[test]
    fn test_load_loading_without_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_loading(&config(dir.path())),
            Err(DataError::NoData(DatasetKind::Loading))
        ));
    }

    #[test]
    fn test_load_tables_keeps_errors_per_dataset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("frost_span.csv"), SPANS).unwrap();
        let tables = load_tables(&config(dir.path()));
        assert!(tables.span.is_ok());
        assert!(tables.max_depth.is_err());
        assert!(tables.loading.is_err());
    }
}
