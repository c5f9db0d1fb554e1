//! The single recompute entry point behind every selection change.

use crate::assemble::{aggregate_chart, depth_chart, freeze_thaw_chart, loading_chart, span_chart};
use crate::models::{AggregateChart, DepthChart, FreezeThawChart, LoadingChart, SpanChart};
use chrono::NaiveDate;
use ft_data::incidents::{self, IncidentRow};
use ft_data::{DataError, Selection, Table};
use ft_season::City;
use ft_utils::dates::format_date;
use log::{info, warn};
use serde::Serialize;

/// City whose winters are overlaid on the aggregate degree-day chart.
pub const AGGREGATE_CITY: City = City::Ely;

/// Raw tables for every dataset as the loader left them. A dataset that
/// could not be read carries its error and only its own chart is affected.
#[derive(Debug)]
pub struct SourceTables {
    pub max_depth: Result<Table, DataError>,
    pub span: Result<Table, DataError>,
    pub freeze_thaw: Result<Table, DataError>,
    pub loading: Result<Table, DataError>,
    pub incidents: Result<Table, DataError>,
}

/// Outcome for one chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", content = "chart", rename_all = "snake_case")]
pub enum ChartStatus<T> {
    Ready(T),
    /// Nothing selected, or nothing left after selection.
    Empty,
    /// The dataset could not be read or normalized.
    Unavailable(String),
}

impl<T> ChartStatus<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ChartStatus::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ChartStatus::Ready(chart) => Some(chart),
            _ => None,
        }
    }
}

/// Every chart for one selection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub selection: Vec<String>,
    pub today: String,
    pub max_depth: ChartStatus<DepthChart>,
    pub span: ChartStatus<SpanChart>,
    pub freeze_thaw: ChartStatus<FreezeThawChart>,
    pub loading: ChartStatus<LoadingChart>,
    pub aggregate: ChartStatus<AggregateChart>,
}

fn assemble<T>(
    name: &str,
    table: &Result<Table, DataError>,
    build: impl FnOnce(&Table) -> ft_data::Result<Option<T>>,
) -> ChartStatus<T> {
    let result = match table {
        Ok(table) => build(table),
        Err(e) => {
            warn!("{} chart unavailable: {}", name, e);
            return ChartStatus::Unavailable(e.to_string());
        }
    };
    match result {
        Ok(Some(chart)) => ChartStatus::Ready(chart),
        Ok(None) => {
            info!("{} chart is empty for this selection", name);
            ChartStatus::Empty
        }
        Err(e) => {
            warn!("{} chart unavailable: {}", name, e);
            ChartStatus::Unavailable(e.to_string())
        }
    }
}

/// Incidents only decorate other charts, so a bad incidents file means no
/// markers rather than an unavailable chart.
fn incident_rows(table: &Result<Table, DataError>) -> Vec<IncidentRow> {
    let normalized = match table {
        Ok(table) => incidents::normalize(table),
        Err(e) => {
            warn!("incidents unavailable: {}", e);
            return Vec::new();
        }
    };
    match normalized {
        Ok(normalized) => normalized.rows,
        Err(e) => {
            warn!("incidents unavailable: {}", e);
            Vec::new()
        }
    }
}

/// Rebuild every chart for `selection`. Tables are re-normalized on every
/// call; nothing is carried over from a previous selection.
pub fn recompute(tables: &SourceTables, selection: &Selection, today: NaiveDate) -> Dashboard {
    let incidents = incident_rows(&tables.incidents);
    let dashboard = Dashboard {
        selection: selection.iter().map(|s| s.label()).collect(),
        today: format_date(&today),
        max_depth: assemble("max depth", &tables.max_depth, |t| depth_chart(t, selection)),
        span: assemble("frost span", &tables.span, |t| {
            span_chart(t, &incidents, selection, today)
        }),
        freeze_thaw: assemble("freeze/thaw", &tables.freeze_thaw, |t| {
            freeze_thaw_chart(t, selection, today)
        }),
        loading: assemble("cold/hot loading", &tables.loading, |t| {
            loading_chart(t, &incidents, selection)
        }),
        aggregate: assemble("aggregate degree days", &tables.loading, |t| {
            aggregate_chart(t, &AGGREGATE_CITY, selection)
        }),
    };
    info!(
        "recomputed dashboard for {} seasons ({} incidents)",
        selection.len(),
        incidents.len()
    );
    dashboard
}
