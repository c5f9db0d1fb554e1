//! `recompute`: build every chart for a selection and write it as JSON.

use crate::config::DashboardConfig;
use crate::loader::load_tables;
use anyhow::Context;
use chrono::{Local, NaiveDate};
use ft_chart::{recompute, Dashboard};
use ft_data::Selection;
use ft_season::Season;
use ft_utils::dates::parse_date;
use log::info;
use std::path::Path;

/// The seasons to show: `--all` selects the configured range, otherwise
/// exactly the labels given (possibly none).
pub fn selection_from_args(
    config: &DashboardConfig,
    seasons: &[String],
    all: bool,
) -> anyhow::Result<Selection> {
    if all {
        return Ok(Season::range(config.first_season, config.last_season)
            .into_iter()
            .collect());
    }
    Selection::parse_labels(seasons).context("Invalid season selection")
}

pub fn build_dashboard(
    config: &DashboardConfig,
    selection: &Selection,
    today: NaiveDate,
) -> Dashboard {
    let tables = load_tables(config);
    recompute(&tables, selection, today)
}

pub fn run_recompute(
    config: &DashboardConfig,
    seasons: &[String],
    all: bool,
    today: Option<&str>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let selection = selection_from_args(config, seasons, all)?;
    let today = match today {
        Some(s) => parse_date(s).context("Invalid --today date")?,
        None => Local::now().date_naive(),
    };
    info!(
        "Recomputing dashboard for {} seasons from {}",
        selection.len(),
        config.data_dir.display()
    );
    let dashboard = build_dashboard(config, &selection, today);
    let json = serde_json::to_string_pretty(&dashboard)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Dashboard written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
