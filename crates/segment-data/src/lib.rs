//! Data layer for the SUP segment analyzer.
//!
//! Reads sessions and laps from the imported SQLite database, runs the
//! qualifying-segment search per session, aggregates the results and renders
//! the report.

pub mod aggregator;
pub mod analysis;
pub mod report;
pub mod store;

pub use segment_core as core;
