//! Shared pieces of the per-dataset normalizers.

use crate::error::{DataError, DatasetKind, Result};
use crate::table::{Row, Table};
use log::{debug, info, warn};

/// Output of a normalizer: the rows that survived plus how many were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub rows: Vec<T>,
    /// Rows dropped for row-level errors (bad dates, negative durations, ...).
    pub skipped: usize,
    /// Rows dropped by a dataset rule rather than an error, e.g. frost/thaw
    /// rows with no depth reading at all.
    pub filtered: usize,
}

impl<T> Normalized<T> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Map every row of `table` through `convert`.
///
/// `Ok(Some(_))` keeps the row, `Ok(None)` filters it out, a row-level
/// error is logged and skipped, and any other error aborts the dataset.
pub(crate) fn normalize_rows<T, F>(
    table: &Table,
    dataset: DatasetKind,
    required: &[&str],
    mut convert: F,
) -> Result<Normalized<T>>
where
    F: FnMut(&Row<'_>) -> Result<Option<T>>,
{
    table.require_columns(dataset, required)?;
    let mut rows = Vec::with_capacity(table.len());
    let mut skipped = 0usize;
    let mut filtered = 0usize;
    for row in table.rows() {
        match convert(&row) {
            Ok(Some(value)) => rows.push(value),
            Ok(None) => {
                debug!("{} row {} filtered", dataset, row.index());
                filtered += 1;
            }
            Err(e) if e.is_row_level() => {
                warn!("{} row {} skipped: {}", dataset, row.index(), e);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    info!(
        "{}: normalized {} rows, skipped {}, filtered {}",
        dataset,
        rows.len(),
        skipped,
        filtered
    );
    Ok(Normalized {
        rows,
        skipped,
        filtered,
    })
}

/// Min-max scale `values` into [0, 1].
///
/// When every value is equal (including a single value) the range is zero
/// and every result is `0.0`.
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values
        .iter()
        .map(|v| {
            if range > 0.0 && range.is_finite() {
                (v - min) / range
            } else {
                0.0
            }
        })
        .collect()
}

/// Season and day offset of a date read from `column`.
pub(crate) fn classify(
    date: &chrono::NaiveDate,
    column: &str,
) -> Result<(ft_season::Season, i64)> {
    let season = ft_season::Season::of(date).ok_or_else(|| DataError::InvalidDate {
        column: column.to_string(),
        source: ft_utils::error::InvalidDateError::new(date.to_string()),
    })?;
    Ok((season, ft_season::day_offset_in_season(date)))
}

/// An optional season-label cell such as `2010-2011`.
pub(crate) fn season_cell(row: &Row<'_>, column: &str) -> Result<Option<ft_season::Season>> {
    row.get(column)
        .map(|label| {
            label.parse().map_err(|source| DataError::InvalidSeason {
                column: column.to_string(),
                source,
            })
        })
        .transpose()
}
