//! Chart data assembly for the freeze tracker dashboard.
//!
//! [`recompute`] is the pull-style entry point: given the loaded tables, the
//! selected seasons and today's date it rebuilds every chart from scratch.

pub mod assemble;
pub mod color;
pub mod dashboard;
pub mod guides;
pub mod models;

pub use dashboard::{recompute, ChartStatus, Dashboard, SourceTables};
