//! Normalization and aggregation of the freeze tracker's CSV tables.
//!
//! Each dataset module turns a raw [`Table`] into typed rows carrying their
//! season and day offset; [`aggregate`] then selects, groups and accumulates
//! those rows for charting. Everything is a pure function of its input.

pub mod aggregate;
pub mod degree_days;
pub mod error;
pub mod frost_thaw;
pub mod hourly;
pub mod incidents;
pub mod loading;
pub mod max_depth;
pub mod normalize;
pub mod span;
pub mod table;

pub use aggregate::{
    cumulative_sum, filter_to_selected, group_by_season, Cumulative, SeasonalRecord, Selection,
};
pub use error::{DataError, DatasetKind, Result};
pub use normalize::{min_max_scale, Normalized};
pub use table::{Row, Table};
