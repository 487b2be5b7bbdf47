use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// Sessions must be strictly longer than this to be analysed (km).
pub const DEFAULT_MIN_SESSION_DISTANCE_KM: f64 = 4.9;
/// A qualifying segment must cover at least this distance (km).
pub const DEFAULT_MIN_SEGMENT_DISTANCE_KM: f64 = 1.0;
/// A qualifying segment must sustain at least this weighted rate (strokes/min).
pub const DEFAULT_MIN_STROKE_RATE: f64 = 48.0;

/// Thresholds applied by the session analyzer and segment finder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub min_session_distance_km: f64,
    pub min_segment_distance_km: f64,
    pub min_stroke_rate: f64,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            min_session_distance_km: DEFAULT_MIN_SESSION_DISTANCE_KM,
            min_segment_distance_km: DEFAULT_MIN_SEGMENT_DISTANCE_KM,
            min_stroke_rate: DEFAULT_MIN_STROKE_RATE,
        }
    }
}

impl Criteria {
    /// Build and validate a set of thresholds.
    pub fn new(
        min_session_distance_km: f64,
        min_segment_distance_km: f64,
        min_stroke_rate: f64,
    ) -> Result<Self> {
        let criteria = Self {
            min_session_distance_km,
            min_segment_distance_km,
            min_stroke_rate,
        };
        criteria.validate()?;
        Ok(criteria)
    }

    /// Every threshold must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("minimum session distance", self.min_session_distance_km),
            ("minimum segment distance", self.min_segment_distance_km),
            ("minimum stroke rate", self.min_stroke_rate),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalyzerError::InvalidCriteria(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Session distance threshold in meters, as stored in the database.
    pub fn min_session_distance_m(&self) -> f64 {
        self.min_session_distance_km * 1000.0
    }

    /// Segment distance threshold in meters.
    pub fn min_segment_distance_m(&self) -> f64 {
        self.min_segment_distance_km * 1000.0
    }
}
