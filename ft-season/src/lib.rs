//! Winter season classification for frost and degree-day data.
//!
//! Every chart on the dashboard compares seasons that run July 1 through
//! June 30. This crate owns that calendar arithmetic and the small amount of
//! city metadata shared by the data and chart crates.

pub mod city;
pub mod date_range;
pub mod error;
pub mod season;

pub use city::City;
pub use date_range::DateRange;
pub use error::SeasonParseError;
pub use season::{
    day_offset_from_start, day_offset_in_season, season_label, season_start_year, Season,
    DEFAULT_FIRST_SEASON, DEFAULT_LAST_SEASON,
};
