//! Per-chart assembly: normalize, select, group, then shape for rendering.
//!
//! Each builder returns `Ok(None)` when the selection leaves nothing to draw
//! and propagates dataset-level errors so the caller can mark only that
//! chart unavailable.

use crate::color::{color_for_key, series_color};
use crate::guides::{incident_markers, incident_note, month_guides, today_marker};
use crate::models::{
    AggregateChart, CityInfo, DepthBar, DepthChart, FreezeThawChart, FreezeThawSeason, LineSeries,
    LoadingChart, LoadingSeason, Point, SpanChart, SpanSegment,
};
use chrono::NaiveDate;
use ft_data::incidents::IncidentRow;
use ft_data::loading::LoadingRow;
use ft_data::{
    filter_to_selected, frost_thaw, group_by_season, loading, max_depth, span, Result, Selection,
    Table,
};
use ft_season::City;
use ft_utils::dates::{format_date, format_month_day};
use std::collections::BTreeMap;

/// Frost depth and span readings are taken near Orr.
pub const FROST_CITY: City = City::Orr;

/// One bar per selected winter, colored by depth relative to the others.
pub fn depth_chart(table: &Table, selection: &Selection) -> Result<Option<DepthChart>> {
    let rows = max_depth::normalize(table)?.rows;
    let mut rows = max_depth::normalize_depths(filter_to_selected(rows, selection));
    let Some(average_in) = max_depth::average_depth(&rows) else {
        return Ok(None);
    };
    rows.sort_by_key(|row| row.season);
    let bars = rows
        .into_iter()
        .map(|row| DepthBar {
            season: row.season.label(),
            depth_in: row.max_frost_depth_in,
            color_key: row.normalized_depth,
            color: color_for_key(row.normalized_depth),
            label: format!("{:.1}", row.max_frost_depth_in),
        })
        .collect();
    Ok(Some(DepthChart {
        title: format!(
            "Max Frost Depth ({}) Avg: {:.0} in",
            FROST_CITY.display_name(),
            average_in
        ),
        bars,
        average_in,
    }))
}

/// One segment per selected span record with durations rescaled over the
/// selection.
pub fn span_chart(
    table: &Table,
    incidents: &[IncidentRow],
    selection: &Selection,
    today: NaiveDate,
) -> Result<Option<SpanChart>> {
    let rows = span::normalize(table)?.rows;
    let rows = span::normalize_durations(filter_to_selected(rows, selection));
    if rows.is_empty() {
        return Ok(None);
    }
    let segments = group_by_season(rows)
        .into_values()
        .flatten()
        .map(|row| SpanSegment {
            season: row.season.label(),
            x0: row.day_offset,
            x1: row.end_offset(),
            duration_days: row.duration_days,
            color_key: row.normalized_duration,
            color: color_for_key(row.normalized_duration),
            start_date: format_date(&row.start),
            end_date: format_date(&row.end),
            start_label: format_month_day(&row.start),
            end_label: format_month_day(&row.end),
        })
        .collect();
    Ok(Some(SpanChart {
        title: format!("Frost Span ({})", FROST_CITY.display_name()),
        segments,
        month_guides: month_guides(),
        today: today_marker(today),
        incidents: incident_markers(incidents),
    }))
}

/// Frost and thaw scatter series for each selected winter.
pub fn freeze_thaw_chart(
    table: &Table,
    selection: &Selection,
    today: NaiveDate,
) -> Result<Option<FreezeThawChart>> {
    let rows = frost_thaw::normalize(table)?.rows;
    let groups = group_by_season(filter_to_selected(rows, selection));
    let mut seasons = Vec::with_capacity(groups.len());
    for (season, rows) in groups {
        let Some(last_date) = rows.iter().map(|r| r.date).max() else {
            continue;
        };
        let points = |depth: fn(&frost_thaw::FrostThawRow) -> Option<f64>| -> Vec<Point> {
            rows.iter()
                .filter_map(|r| depth(r).map(|y| Point { x: r.day_offset, y }))
                .collect()
        };
        let frost = points(|r| r.frost_depth_in);
        let thaw = points(|r| r.thaw_depth_in);
        let max_frost_depth_in = frost.iter().map(|p| p.y).reduce(f64::max);
        let short_last_date = last_date.format("%m-%d");
        seasons.push(FreezeThawSeason {
            title: format!(
                "Frost, Thaw Depth Trends ({}, Last Data Point: {})",
                season, short_last_date
            ),
            season: season.label(),
            frost,
            thaw,
            last_date: format_date(&last_date),
            max_frost_depth_in,
        });
    }
    if seasons.is_empty() {
        return Ok(None);
    }
    Ok(Some(FreezeThawChart {
        seasons,
        month_guides: month_guides(),
        today: today_marker(today),
    }))
}

/// The x value of a loading row: its position in the season when the split
/// wrote one, else days since July 1.
fn loading_point(row: &LoadingRow, y: f64) -> Point {
    Point {
        x: row.index.unwrap_or(row.days_since_season_start),
        y,
    }
}

fn city_series(
    by_city: &BTreeMap<City, Vec<&LoadingRow>>,
    value: fn(&LoadingRow) -> f64,
) -> Vec<LineSeries> {
    by_city
        .iter()
        .map(|(city, rows)| LineSeries {
            category: city.code().to_string(),
            label: city.display_name(),
            color: city.display_color().to_string(),
            points: rows.iter().map(|r| loading_point(r, value(r))).collect(),
        })
        .collect()
}

/// Cumulative cold and hot curves per selected winter, one line per city.
pub fn loading_chart(
    table: &Table,
    incidents: &[IncidentRow],
    selection: &Selection,
) -> Result<Option<LoadingChart>> {
    let rows = loading::normalize(table)?.rows;
    let groups = group_by_season(filter_to_selected(rows, selection));
    if groups.is_empty() {
        return Ok(None);
    }
    let seasons = groups
        .iter()
        .map(|(season, rows)| {
            let mut by_city: BTreeMap<City, Vec<&LoadingRow>> = BTreeMap::new();
            for row in rows {
                by_city.entry(row.city.clone()).or_default().push(row);
            }
            LoadingSeason {
                season: season.label(),
                cold_title: format!("Cumulative Freezing Degree Days - {}", season),
                hot_title: format!("Cumulative Thawing Degree Days - {}", season),
                cold: city_series(&by_city, |r| r.cumulative_cold_f),
                hot: city_series(&by_city, |r| r.cumulative_hot_f),
                note: incident_note(season, incidents),
            }
        })
        .collect();
    Ok(Some(LoadingChart { seasons }))
}

/// Every selected winter's cumulative cold and hot curves for one city, one
/// line per season on a shared axis.
pub fn aggregate_chart(
    table: &Table,
    city: &City,
    selection: &Selection,
) -> Result<Option<AggregateChart>> {
    let rows = loading::normalize(table)?
        .rows
        .into_iter()
        .filter(|row| &row.city == city);
    let groups = group_by_season(filter_to_selected(rows, selection));
    if groups.is_empty() {
        return Ok(None);
    }
    let series = |value: fn(&LoadingRow) -> f64| -> Vec<LineSeries> {
        groups
            .iter()
            .enumerate()
            .map(|(position, (season, rows))| LineSeries {
                category: season.label(),
                label: season.label(),
                color: series_color(position).to_string(),
                points: rows.iter().map(|r| loading_point(r, value(r))).collect(),
            })
            .collect()
    };
    let name = city.display_name();
    Ok(Some(AggregateChart {
        city: CityInfo::from(city),
        cold_title: format!("Cumulative Freeze Degree Days ({})", name),
        hot_title: format!("Cumulative Thaw Degree Days ({})", name),
        cold: series(|r| r.cumulative_cold_f),
        hot: series(|r| r.cumulative_hot_f),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_data::{incidents, DataError};

    fn selection(labels: &[&str]) -> Selection {
        Selection::parse_labels(labels).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    }

    #[test]
    fn test_depth_chart() {
        let table = Table::from_csv_str(
            "Winter,Max_Frost_Depth_in\n2012-2013,60\n2010-2011,40\n2011-2012,20\n",
        )
        .unwrap();
        let chart = depth_chart(&table, &selection(&["2010-2011", "2012-2013"]))
            .unwrap()
            .unwrap();
        let seasons: Vec<&str> = chart.bars.iter().map(|b| b.season.as_str()).collect();
        assert_eq!(seasons, vec!["2010-2011", "2012-2013"]);
        assert_eq!(chart.bars[0].color, "#008000");
        assert_eq!(chart.bars[1].color, "#ff0000");
        assert_eq!(chart.bars[0].label, "40.0");
        assert_eq!(chart.average_in, 50.0);
        assert_eq!(chart.title, "Max Frost Depth (Orr, MN) Avg: 50 in");
    }

    #[test]
    fn test_depth_chart_empty_selection() {
        let table = Table::from_csv_str("Winter,Max_Frost_Depth_in\n2010-2011,40\n").unwrap();
        assert_eq!(depth_chart(&table, &Selection::none()).unwrap(), None);
    }

    #[test]
    fn test_span_chart() {
        let table = Table::from_csv_str(
            "Frost_Start,Frost_End\n\
2011/12/01,2012/03/31\n\
2010/11/20,2011/04/30\n\
2020/11/10,2020/11/05\n",
        )
        .unwrap();
        let selected = selection(&["2010-2011", "2011-2012", "2020-2021"]);
        let chart = span_chart(&table, &[], &selected, today()).unwrap().unwrap();
        assert_eq!(chart.title, "Frost Span (Orr, MN)");
        assert_eq!(chart.segments.len(), 2);
        let first = &chart.segments[0];
        assert_eq!(first.season, "2010-2011");
        assert_eq!((first.x0, first.x1), (142, 303));
        assert_eq!(first.start_label, "Nov 20");
        assert_eq!(first.end_label, "Apr 30");
        assert_eq!(first.color_key, 1.0);
        assert_eq!(chart.segments[1].color_key, 0.0);
        assert_eq!(chart.month_guides.len(), 12);
        assert_eq!(chart.today.offset, 184);
    }

    #[test]
    fn test_span_chart_equal_durations() {
        let table = Table::from_csv_str(
            "Frost_Start,Frost_End\n2010/11/20,2010/12/20\n2011/11/20,2011/12/20\n",
        )
        .unwrap();
        let chart = span_chart(&table, &[], &selection(&["2010-2011", "2011-2012"]), today())
            .unwrap()
            .unwrap();
        assert!(chart.segments.iter().all(|s| s.color_key == 0.0));
    }

    #[test]
    fn test_freeze_thaw_chart() {
        let table = Table::from_csv_str(
            "County,Date,THAW_DEPTH_in,FROST_DEPTH_in\n\
St. Louis,2011/03/20,6,52\n\
St. Louis,2010/12/01,,14\n\
St. Louis,2011/04/10,18,\n\
St. Louis,2012/01/10,,20\n",
        )
        .unwrap();
        let chart = freeze_thaw_chart(&table, &selection(&["2010-2011"]), today())
            .unwrap()
            .unwrap();
        assert_eq!(chart.seasons.len(), 1);
        let season = &chart.seasons[0];
        assert_eq!(season.frost.len(), 2);
        assert_eq!(season.thaw.len(), 2);
        assert!(season.frost[0].x < season.frost[1].x);
        assert_eq!(season.max_frost_depth_in, Some(52.0));
        assert_eq!(season.last_date, "2011-04-10");
        assert!(season.title.ends_with("Last Data Point: 04-10)"));
    }

    #[test]
    fn test_loading_chart() {
        let table = Table::from_csv_str(
            "DATE,IYEAR,INDEX,CUMM_COLD_F,CUMM_HOT_F,NAME,CITY\n\
2022-01-01,2022,184,900,3000,2021-2022,ORR\n\
2021-07-01,2021,0,0,40,2021-2022,ELY\n\
2022-01-01,2022,184,800,3100,2021-2022,ELY\n\
2022-07-01,2022,0,0,41,2022-2023,ELY\n",
        )
        .unwrap();
        let incident_table = Table::from_csv_str(
            "Winter,Date\n2021-2022,2022/03/31\n2021-2022,2022/04/23\n",
        )
        .unwrap();
        let incidents = incidents::normalize(&incident_table).unwrap().rows;
        let chart = loading_chart(&table, &incidents, &selection(&["2021-2022"]))
            .unwrap()
            .unwrap();
        assert_eq!(chart.seasons.len(), 1);
        let season = &chart.seasons[0];
        assert_eq!(season.note, "INCIDENT: 03/31, 04/23");
        let cities: Vec<&str> = season.cold.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(cities, vec!["ELY", "ORR"]);
        assert_eq!(season.cold[0].color, "#1f77b4");
        assert_eq!(
            season.cold[0].points,
            vec![Point { x: 0, y: 0.0 }, Point { x: 184, y: 800.0 }]
        );
        assert_eq!(season.hot[1].points, vec![Point { x: 184, y: 3000.0 }]);
    }

    const ELY_SEASONS: &str = "\
DATE,IYEAR,INDEX,CUMM_COLD_F,CUMM_HOT_F,NAME,CITY
2011-07-02,2011,1,0,70,2011-2012,ELY
2010-07-01,2010,0,0,38,2010-2011,ELY
2011-07-01,2011,0,0,35,2011-2012,ELY
2011-01-01,2010,184,1236,4000,2010-2011,ELY
2011-01-01,2010,184,1100,4100,2010-2011,ORR
2012-07-01,2012,0,0,30,2012-2013,ELY
";

    #[test]
    fn test_aggregate_chart_one_line_per_season() {
        let table = Table::from_csv_str(ELY_SEASONS).unwrap();
        let chart = aggregate_chart(&table, &City::Ely, &selection(&["2010-2011", "2011-2012"]))
            .unwrap()
            .unwrap();
        assert_eq!(chart.cold_title, "Cumulative Freeze Degree Days (Ely, MN)");
        assert_eq!(chart.hot_title, "Cumulative Thaw Degree Days (Ely, MN)");
        assert_eq!(chart.city.latitude, Some(47.9));
        let seasons: Vec<&str> = chart.cold.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(seasons, vec!["2010-2011", "2011-2012"]);
        assert_ne!(chart.cold[0].color, chart.cold[1].color);
        assert_eq!(chart.cold[0].color, chart.hot[0].color);
        assert_eq!(
            chart.cold[0].points,
            vec![Point { x: 0, y: 0.0 }, Point { x: 184, y: 1236.0 }]
        );
        assert_eq!(
            chart.hot[1].points,
            vec![Point { x: 0, y: 35.0 }, Point { x: 1, y: 70.0 }]
        );
    }

    #[test]
    fn test_aggregate_chart_other_city_or_empty_selection() {
        let table = Table::from_csv_str(ELY_SEASONS).unwrap();
        let orr = aggregate_chart(&table, &City::Orr, &selection(&["2010-2011", "2012-2013"]))
            .unwrap()
            .unwrap();
        assert_eq!(orr.cold.len(), 1);
        assert_eq!(orr.cold[0].points, vec![Point { x: 184, y: 1100.0 }]);
        assert_eq!(aggregate_chart(&table, &City::Ely, &Selection::none()).unwrap(), None);
        assert_eq!(
            aggregate_chart(&table, &City::parse("tower"), &selection(&["2010-2011"])).unwrap(),
            None
        );
    }

    #[test]
    fn test_missing_column_propagates() {
        let table = Table::from_csv_str("Frost_Start\n2010/11/20\n").unwrap();
        assert!(matches!(
            span_chart(&table, &[], &selection(&["2010-2011"]), today()),
            Err(DataError::MissingRequiredColumn { .. })
        ));
    }
}
