//! Grouping, selection and running totals over normalized rows.
//!
//! Everything here works on any row type implementing [`SeasonalRecord`], so
//! the same operations serve the chart builders and the degree-day totals.
//! Inputs are consumed and fresh collections are returned; nothing is cached
//! between calls.

use ft_season::{City, Season, SeasonParseError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A row that belongs to a season and sits at a day offset within it.
pub trait SeasonalRecord {
    fn season(&self) -> Season;

    /// Days after July 1 used for ordering within a season.
    fn day_offset(&self) -> i64;

    /// Series key within a season (the city for loading rows).
    fn category(&self) -> Option<&City> {
        None
    }
}

/// The seasons a user has ticked. Empty means "show nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection(BTreeSet<Season>);

impl Selection {
    /// Nothing selected.
    pub fn none() -> Self {
        Selection(BTreeSet::new())
    }

    /// Parse season labels such as `2010-2011`; any malformed label fails
    /// the whole selection.
    pub fn parse_labels<I, S>(labels: I) -> Result<Self, SeasonParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| label.as_ref().parse::<Season>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Selection)
    }

    pub fn contains(&self, season: &Season) -> bool {
        self.0.contains(season)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Selected seasons, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Season> {
        self.0.iter()
    }
}

impl FromIterator<Season> for Selection {
    fn from_iter<T: IntoIterator<Item = Season>>(iter: T) -> Self {
        Selection(iter.into_iter().collect())
    }
}

/// Keep the rows whose season is selected. An empty selection yields an
/// empty result, never "everything".
pub fn filter_to_selected<R, I>(rows: I, selected: &Selection) -> Vec<R>
where
    R: SeasonalRecord,
    I: IntoIterator<Item = R>,
{
    if selected.is_empty() {
        return Vec::new();
    }
    rows.into_iter()
        .filter(|row| selected.contains(&row.season()))
        .collect()
}

/// Group rows by season, each group sorted ascending by day offset. Rows
/// with equal offsets keep their input order.
pub fn group_by_season<R, I>(rows: I) -> BTreeMap<Season, Vec<R>>
where
    R: SeasonalRecord,
    I: IntoIterator<Item = R>,
{
    let mut groups: BTreeMap<Season, Vec<R>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.season()).or_default().push(row);
    }
    for group in groups.values_mut() {
        group.sort_by_key(|row| row.day_offset());
    }
    groups
}

/// A row with the running total of some value up to and including it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cumulative<R> {
    pub row: R,
    pub running_total: f64,
}

impl<R: SeasonalRecord> SeasonalRecord for Cumulative<R> {
    fn season(&self) -> Season {
        self.row.season()
    }

    fn day_offset(&self) -> i64 {
        self.row.day_offset()
    }

    fn category(&self) -> Option<&City> {
        self.row.category()
    }
}

/// Running totals of `value`, computed independently for every
/// (season, category) group in day-offset order. Rows without a value add
/// nothing but still carry the current total.
///
/// The result is ordered by season, then category, then day offset.
pub fn cumulative_sum<R, I, F>(rows: I, value: F) -> Vec<Cumulative<R>>
where
    R: SeasonalRecord,
    I: IntoIterator<Item = R>,
    F: Fn(&R) -> Option<f64>,
{
    let mut groups: BTreeMap<(Season, Option<City>), Vec<R>> = BTreeMap::new();
    for row in rows {
        let key = (row.season(), row.category().cloned());
        groups.entry(key).or_default().push(row);
    }
    let mut output = Vec::new();
    for (_, mut group) in groups {
        group.sort_by_key(|row| row.day_offset());
        let mut running_total = 0.0;
        for row in group {
            running_total += value(&row).unwrap_or(0.0);
            output.push(Cumulative { row, running_total });
        }
    }
    output
}
