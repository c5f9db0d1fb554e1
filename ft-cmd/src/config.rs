//! Dashboard configuration: where the processed CSV files live and which
//! seasons and cities to load.

use anyhow::Context;
use ft_season::city::DEFAULT_CITIES;
use ft_season::{City, DEFAULT_FIRST_SEASON, DEFAULT_LAST_SEASON};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Every field has a default, so a config file only names what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the processed CSV files.
    pub data_dir: PathBuf,
    pub depth_file: String,
    pub span_file: String,
    /// Raw probe readings read by `prepare-freeze-thaw`.
    pub freeze_thaw_raw_file: String,
    /// Prepared probe readings read by the dashboard.
    pub freeze_thaw_file: String,
    pub incidents_file: String,
    /// Prefix of the per-season degree-day files.
    pub loading_prefix: String,
    pub cities: Vec<City>,
    pub first_season: i32,
    pub last_season: i32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/2_processed"),
            depth_file: "frost_depth.csv".to_string(),
            span_file: "frost_span.csv".to_string(),
            freeze_thaw_raw_file: "frost_stlouis.csv".to_string(),
            freeze_thaw_file: "frost_stlouis_out.csv".to_string(),
            incidents_file: "incidents.csv".to_string(),
            loading_prefix: ft_data::degree_days::DAILY_TEMPS_PREFIX.to_string(),
            cities: DEFAULT_CITIES.to_vec(),
            first_season: DEFAULT_FIRST_SEASON,
            last_season: DEFAULT_LAST_SEASON,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Override the data directory, e.g. from `--data-dir`.
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        self
    }

    /// `file` inside the data directory.
    pub fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }
}
