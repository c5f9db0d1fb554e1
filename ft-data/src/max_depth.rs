//! Maximum frost depth per winter, one bar per season.

use crate::aggregate::SeasonalRecord;
use crate::error::{DataError, DatasetKind, Result};
use crate::normalize::{min_max_scale, normalize_rows, season_cell, Normalized};
use crate::table::Table;
use ft_season::Season;

pub const WINTER: &str = "Winter";
pub const MAX_FROST_DEPTH: &str = "Max_Frost_Depth_in";

const REQUIRED: [&str; 2] = [WINTER, MAX_FROST_DEPTH];

#[derive(Debug, Clone, PartialEq)]
pub struct MaxDepthRow {
    pub season: Season,
    pub max_frost_depth_in: f64,
    /// Depth min-max scaled over the row set it was computed for.
    pub normalized_depth: f64,
}

impl SeasonalRecord for MaxDepthRow {
    fn season(&self) -> Season {
        self.season
    }

    // One row per season, so every bar sits at the season start.
    fn day_offset(&self) -> i64 {
        0
    }
}

/// Parse `Winter,Max_Frost_Depth_in` rows. Rows with no depth are filtered.
pub fn normalize(table: &Table) -> Result<Normalized<MaxDepthRow>> {
    let normalized = normalize_rows(table, DatasetKind::MaxDepth, &REQUIRED, |row| {
        let season = season_cell(row, WINTER)?.ok_or_else(|| DataError::InvalidNumber {
            column: WINTER.to_string(),
            value: String::new(),
        })?;
        Ok(row.number(MAX_FROST_DEPTH)?.map(|depth| MaxDepthRow {
            season,
            max_frost_depth_in: depth,
            normalized_depth: 0.0,
        }))
    })?;
    Ok(Normalized {
        rows: normalize_depths(normalized.rows),
        ..normalized
    })
}

/// Rescale `normalized_depth` across exactly the given rows.
pub fn normalize_depths(mut rows: Vec<MaxDepthRow>) -> Vec<MaxDepthRow> {
    let depths: Vec<f64> = rows.iter().map(|r| r.max_frost_depth_in).collect();
    for (row, scaled) in rows.iter_mut().zip(min_max_scale(&depths)) {
        row.normalized_depth = scaled;
    }
    rows
}

/// Mean maximum depth, or None for no rows.
pub fn average_depth(rows: &[MaxDepthRow]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    let total: f64 = rows.iter().map(|r| r.max_frost_depth_in).sum();
    Some(total / rows.len() as f64)
}
