//! Core types for the SUP segment analyzer.
//!
//! Holds the session / lap data model, the qualifying-segment search,
//! analysis thresholds, summary statistics, report formatting helpers,
//! command-line settings and the shared error type.

pub mod criteria;
pub mod error;
pub mod formatting;
pub mod models;
pub mod segment;
pub mod settings;
pub mod stats;

pub use criteria::Criteria;
pub use error::{AnalyzerError, Result};
pub use models::{Lap, QualifyingSegment, Session, SessionResult};
pub use segment::{find_qualifying_segment, SegmentFinder};
