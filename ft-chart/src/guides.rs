//! Reference lines drawn over the season charts.

use crate::models::{Marker, MonthGuide};
use chrono::{Datelike, NaiveDate};
use ft_data::incidents::IncidentRow;
use ft_season::{day_offset_in_season, Season};
use ft_utils::dates::format_month_day;

pub const TODAY_COLOR: &str = "blue";
pub const INCIDENT_COLOR: &str = "red";

/// Any non-leap season; month starts shift by one day after February in
/// leap seasons, which the guides ignore.
const REFERENCE_SEASON_START: i32 = 2010;

/// Offsets of the first of each month, July through June.
pub fn month_guides() -> Vec<MonthGuide> {
    let Some(season) = Season::new(REFERENCE_SEASON_START) else {
        return Vec::new();
    };
    season
        .days()
        .filter(|date| date.day() == 1)
        .map(|date| MonthGuide {
            month: date.format("%b").to_string(),
            offset: day_offset_in_season(&date),
        })
        .collect()
}

/// Where today falls in its season.
pub fn today_marker(today: NaiveDate) -> Marker {
    Marker {
        label: "Today".to_string(),
        offset: day_offset_in_season(&today),
        color: TODAY_COLOR.to_string(),
    }
}

pub fn incident_markers(incidents: &[IncidentRow]) -> Vec<Marker> {
    incidents
        .iter()
        .map(|incident| Marker {
            label: format_month_day(&incident.date),
            offset: incident.day_offset,
            color: INCIDENT_COLOR.to_string(),
        })
        .collect()
}

/// `INCIDENT: 03/31, 04/23` for a season with incidents, otherwise empty.
pub fn incident_note(season: &Season, incidents: &[IncidentRow]) -> String {
    let mut dates: Vec<NaiveDate> = incidents
        .iter()
        .filter(|incident| incident.season == *season)
        .map(|incident| incident.date)
        .collect();
    if dates.is_empty() {
        return String::new();
    }
    dates.sort();
    let days: Vec<String> = dates.iter().map(|d| d.format("%m/%d").to_string()).collect();
    format!("INCIDENT: {}", days.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_data::{incidents, Table};

    fn incidents() -> Vec<IncidentRow> {
        let csv = "Winter,Date\n2021-2022,2022/04/23\n2021-2022,2022/03/31\n2022-2023,2023/04/15\n";
        incidents::normalize(&Table::from_csv_str(csv).unwrap())
            .unwrap()
            .rows
    }

    #[test]
    fn test_month_guides() {
        let guides = month_guides();
        let offsets: Vec<i64> = guides.iter().map(|g| g.offset).collect();
        assert_eq!(
            offsets,
            vec![0, 31, 62, 92, 123, 153, 184, 215, 243, 274, 304, 335]
        );
        assert_eq!(guides[0].month, "Jul");
        assert_eq!(guides[2].month, "Sep");
        assert_eq!(guides[11].month, "Jun");
    }

    #[test]
    fn test_today_marker() {
        let today = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let marker = today_marker(today);
        assert_eq!(marker.offset, 184);
        assert_eq!(marker.color, "blue");
    }

    #[test]
    fn test_incident_note() {
        let rows = incidents();
        let season: Season = "2021-2022".parse().unwrap();
        assert_eq!(incident_note(&season, &rows), "INCIDENT: 03/31, 04/23");
        let season: Season = "2022-2023".parse().unwrap();
        assert_eq!(incident_note(&season, &rows), "INCIDENT: 04/15");
        let season: Season = "2015-2016".parse().unwrap();
        assert_eq!(incident_note(&season, &rows), "");
    }

    #[test]
    fn test_incident_markers() {
        let markers = incident_markers(&incidents());
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[1].label, "Mar 31");
        assert_eq!(markers[1].offset, 273);
        assert!(markers.iter().all(|m| m.color == "red"));
    }
}
