//! `prepare-freeze-thaw`: write the prepared frost/thaw probe table.

use crate::config::DashboardConfig;
use crate::loader::{read_table, write_table};
use anyhow::Context;
use ft_data::frost_thaw;
use log::info;
use std::path::Path;

pub fn run_prepare_freeze_thaw(
    config: &DashboardConfig,
    input: Option<&Path>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let input = input.map_or_else(|| config.path(&config.freeze_thaw_raw_file), Path::to_path_buf);
    let output = output.map_or_else(|| config.path(&config.freeze_thaw_file), Path::to_path_buf);
    let table = read_table(&input).with_context(|| format!("Failed to read {}", input.display()))?;
    let normalized = frost_thaw::normalize(&table)?;
    info!(
        "Prepared {} frost/thaw rows ({} skipped, {} without depths)",
        normalized.len(),
        normalized.skipped,
        normalized.filtered
    );
    write_table(&frost_thaw::to_table(&normalized.rows), &output)
}
