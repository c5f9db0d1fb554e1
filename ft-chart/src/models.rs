//! Chart data models handed to the renderer.
//!
//! All structs derive `Serialize`; the renderer receives them as JSON. The x
//! axis of every season chart is the day offset after July 1.

use ft_season::City;
use serde::Serialize;

/// An (x, y) pair on a season-offset axis.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Point {
    pub x: i64,
    pub y: f64,
}

/// A dashed vertical line at the first day of a month.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthGuide {
    /// Short month name, e.g. "Sep".
    pub month: String,
    pub offset: i64,
}

/// A labelled vertical line (today, an incident).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Marker {
    pub label: String,
    pub offset: i64,
    pub color: String,
}

/// One winter's bar in the max frost depth chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DepthBar {
    pub season: String,
    pub depth_in: f64,
    /// Depth scaled to [0, 1] over the selected winters.
    pub color_key: f64,
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DepthChart {
    pub title: String,
    pub bars: Vec<DepthBar>,
    /// Mean of the selected winters, drawn as a horizontal line.
    pub average_in: f64,
}

/// A horizontal frost span segment, one per winter.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpanSegment {
    pub season: String,
    /// Offset of the first frost day.
    pub x0: i64,
    /// `x0 + duration_days`.
    pub x1: i64,
    pub duration_days: i64,
    /// Duration scaled to [0, 1] over the selected winters.
    pub color_key: f64,
    pub color: String,
    pub start_date: String,
    pub end_date: String,
    /// Text beside the segment ends, e.g. "Nov 20".
    pub start_label: String,
    pub end_label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpanChart {
    pub title: String,
    pub segments: Vec<SpanSegment>,
    pub month_guides: Vec<MonthGuide>,
    pub today: Marker,
    pub incidents: Vec<Marker>,
}

/// Frost and thaw depth readings for one winter.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FreezeThawSeason {
    pub season: String,
    pub title: String,
    pub frost: Vec<Point>,
    pub thaw: Vec<Point>,
    pub last_date: String,
    pub max_frost_depth_in: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FreezeThawChart {
    pub seasons: Vec<FreezeThawSeason>,
    pub month_guides: Vec<MonthGuide>,
    pub today: Marker,
}

/// One line of a multi-line chart, e.g. a city's cumulative cold curve.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineSeries {
    /// Series key (city code, or season label on the aggregate chart).
    pub category: String,
    pub label: String,
    pub color: String,
    pub points: Vec<Point>,
}

/// Cold and hot loading curves for one winter.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoadingSeason {
    pub season: String,
    pub cold_title: String,
    pub hot_title: String,
    pub cold: Vec<LineSeries>,
    pub hot: Vec<LineSeries>,
    /// "INCIDENT: 03/31, 04/23" or empty.
    pub note: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoadingChart {
    pub seasons: Vec<LoadingSeason>,
}

/// Display metadata for the city a chart is drawn for.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CityInfo {
    pub code: String,
    pub name: String,
    pub color: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&City> for CityInfo {
    fn from(city: &City) -> Self {
        let (latitude, longitude) = city.lat_lon().unzip();
        CityInfo {
            code: city.code().to_string(),
            name: city.display_name(),
            color: city.display_color().to_string(),
            latitude,
            longitude,
        }
    }
}

/// Every selected winter's cumulative curves for one city on a shared axis.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AggregateChart {
    pub city: CityInfo,
    pub cold_title: String,
    pub hot_title: String,
    /// One line per season, keyed by season label.
    pub cold: Vec<LineSeries>,
    pub hot: Vec<LineSeries>,
}
