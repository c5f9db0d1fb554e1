//! Frost span records: the first and last day of ground frost per winter.
//!
//! Source layout: `Frost_Start,Frost_End` as `YYYY/MM/DD` (other columns are
//! carried by the spreadsheet export and ignored).

use crate::aggregate::SeasonalRecord;
use crate::error::{DataError, DatasetKind, Result};
use crate::normalize::{classify, min_max_scale, normalize_rows, Normalized};
use crate::table::Table;
use chrono::NaiveDate;
use ft_season::Season;

pub const FROST_START: &str = "Frost_Start";
pub const FROST_END: &str = "Frost_End";

const REQUIRED: [&str; 2] = [FROST_START, FROST_END];

#[derive(Debug, Clone, PartialEq)]
pub struct SpanRow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// `end - start` in days, never negative.
    pub duration_days: i64,
    /// Season of the start date.
    pub season: Season,
    /// Day offset of the start date.
    pub day_offset: i64,
    /// `duration_days` min-max scaled over the row set it was computed for.
    pub normalized_duration: f64,
}

impl SpanRow {
    /// Day offset of the end date measured from the start date's July 1, so
    /// a span reads as one segment on a shared season axis.
    pub fn end_offset(&self) -> i64 {
        self.day_offset + self.duration_days
    }
}

impl SeasonalRecord for SpanRow {
    fn season(&self) -> Season {
        self.season
    }

    fn day_offset(&self) -> i64 {
        self.day_offset
    }
}

/// Parse span records, dropping any whose end precedes its start.
/// Durations are normalized across every row that survives.
pub fn normalize(table: &Table) -> Result<Normalized<SpanRow>> {
    let normalized = normalize_rows(table, DatasetKind::Span, &REQUIRED, |row| {
        let start = row.date(FROST_START)?;
        let end = row.date(FROST_END)?;
        if end < start {
            return Err(DataError::NegativeDuration { start, end });
        }
        let (season, day_offset) = classify(&start, FROST_START)?;
        Ok(Some(SpanRow {
            start,
            end,
            duration_days: (end - start).num_days(),
            season,
            day_offset,
            normalized_duration: 0.0,
        }))
    })?;
    Ok(Normalized {
        rows: normalize_durations(normalized.rows),
        ..normalized
    })
}

/// Recompute `normalized_duration` over exactly `rows`. Call again whenever
/// the row set changes (e.g. after filtering to the selected seasons).
/// Equal durations everywhere normalize to `0.0`.
pub fn normalize_durations(rows: Vec<SpanRow>) -> Vec<SpanRow> {
    let durations: Vec<f64> = rows.iter().map(|r| r.duration_days as f64).collect();
    let scaled = min_max_scale(&durations);
    rows.into_iter()
        .zip(scaled)
        .map(|(row, normalized_duration)| SpanRow {
            normalized_duration,
            ..row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{filter_to_selected, group_by_season, Selection};

    const SPANS: &str = "\
Frost_Start,Frost_End
2010/11/20,2011/04/30
2011/12/01,2012/03/31
2020/11/10,2020/11/05
2012/11/15,2013/05/15
not a date,2013/05/15
";

    #[test]
    fn test_durations_and_offsets() {
        let normalized = normalize(&Table::from_csv_str(SPANS).unwrap()).unwrap();
        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized.skipped, 2);

        let first = &normalized.rows[0];
        assert_eq!(first.season.label(), "2010-2011");
        assert_eq!(first.duration_days, 161);
        // Nov 20 is 142 days after July 1
        assert_eq!(first.day_offset, 142);
        assert_eq!(first.end_offset(), 303);
    }

    #[test]
    fn test_negative_duration_row_is_dropped() {
        let normalized = normalize(&Table::from_csv_str(SPANS).unwrap()).unwrap();
        assert!(normalized
            .rows
            .iter()
            .all(|r| r.start != NaiveDate::from_ymd_opt(2020, 11, 10).unwrap()));
        let selection = Selection::parse_labels(["2020-2021"]).unwrap();
        let groups = group_by_season(filter_to_selected(normalized.rows, &selection));
        assert!(groups.is_empty());
    }

    #[test]
    fn test_normalized_duration_range() {
        let rows = normalize(&Table::from_csv_str(SPANS).unwrap()).unwrap().rows;
        let values: Vec<f64> = rows.iter().map(|r| r.normalized_duration).collect();
        // durations 161, 121, 181
        assert!((values[0] - 40.0 / 60.0).abs() < 1e-9);
        assert_eq!(values[1], 0.0);
        assert_eq!(values[2], 1.0);
    }

    #[test]
    fn test_zero_variance_durations_are_zero() {
        let csv = "Frost_Start,Frost_End\n2010/11/01,2010/11/11\n2011/12/01,2011/12/11\n";
        let rows = normalize(&Table::from_csv_str(csv).unwrap()).unwrap().rows;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.normalized_duration == 0.0));
    }

    #[test]
    fn test_renormalize_selected_subset() {
        let rows = normalize(&Table::from_csv_str(SPANS).unwrap()).unwrap().rows;
        let selection = Selection::parse_labels(["2010-2011", "2012-2013"]).unwrap();
        let subset = normalize_durations(filter_to_selected(rows, &selection));
        let values: Vec<f64> = subset.iter().map(|r| r.normalized_duration).collect();
        assert_eq!(values, vec![0.0, 1.0]);
    }

    #[test]
    fn test_missing_end_column_aborts() {
        let table = Table::from_csv_str("Frost_Start\n2010/11/01\n").unwrap();
        assert!(matches!(
            normalize(&table),
            Err(DataError::MissingRequiredColumn { .. })
        ));
    }
}
