use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Placeholder shown when a session carries no start timestamp.
pub const UNKNOWN_DATE: &str = "Unknown";

/// One recorded paddling activity, as imported into the session database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Stable database identifier.
    pub id: i64,
    /// Start timestamp exactly as stored, e.g. `"2024-06-01 07:15:00"`.
    pub start_time: Option<String>,
    /// Total recorded distance in meters.
    pub total_distance: f64,
}

impl Session {
    /// Total distance in kilometres.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance / 1000.0
    }

    /// Calendar-date portion of the start timestamp (`"%Y-%m-%d"`), or
    /// [`UNKNOWN_DATE`] when the session has no start time.
    pub fn display_date(&self) -> String {
        match self.start_time.as_deref() {
            Some(raw) => calendar_date(raw),
            None => UNKNOWN_DATE.to_string(),
        }
    }
}

/// A recorded sub-interval of a session.
///
/// Every measurement is optional: activity files routinely contain laps with
/// no distance or stroke data, and those gaps must stay distinguishable from
/// a genuine zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lap {
    /// Position of the lap within its session (strictly increasing).
    pub lap_number: i64,
    /// Distance covered in meters.
    pub distance: Option<f64>,
    /// Elapsed time in seconds.
    pub time: Option<f64>,
    /// Number of paddle strokes.
    pub strokes: Option<i64>,
}

impl Lap {
    /// Build a lap with every measurement present.
    pub fn new(lap_number: i64, distance: f64, time: f64, strokes: i64) -> Self {
        Self {
            lap_number,
            distance: Some(distance),
            time: Some(time),
            strokes: Some(strokes),
        }
    }

    /// The lap's `(distance, time, strokes)` when all three are present and
    /// the elapsed time is positive.
    pub fn measurements(&self) -> Option<(f64, f64, i64)> {
        let (distance, time, strokes) = (self.distance?, self.time?, self.strokes?);
        if time <= 0.0 {
            return None;
        }
        Some((distance, time, strokes))
    }
}

/// A contiguous run of laps meeting both the distance and stroke-rate
/// thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyingSegment {
    pub start_lap: i64,
    pub end_lap: i64,
    pub distance_km: f64,
    /// Total strokes over total time, per minute.
    pub weighted_stroke_rate: f64,
    pub total_strokes: i64,
    pub total_time_sec: f64,
    /// Meters per stroke.
    pub avg_distance_per_stroke: f64,
}

impl QualifyingSegment {
    /// Elapsed time of the segment in minutes.
    pub fn total_time_min(&self) -> f64 {
        self.total_time_sec / 60.0
    }
}

/// Analysis outcome for a single session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub session_id: i64,
    /// Display date (see [`Session::display_date`]).
    pub date: String,
    pub total_distance_km: f64,
    pub qualifying_segment: Option<QualifyingSegment>,
}

impl SessionResult {
    pub fn is_qualifying(&self) -> bool {
        self.qualifying_segment.is_some()
    }

    /// Segment distance as a percentage of the whole session, when the
    /// session qualified. Guards against a zero session distance.
    pub fn segment_share_percent(&self) -> Option<f64> {
        let segment = self.qualifying_segment.as_ref()?;
        Some(crate::formatting::percentage(
            segment.distance_km,
            self.total_distance_km,
        ))
    }
}

// ── Timestamp helpers ─────────────────────────────────────────────────────────

/// Extract the calendar date from a stored timestamp string.
///
/// Recognises RFC 3339 and the common `"%Y-%m-%d %H:%M:%S"` family; anything
/// else falls back to the text before the first whitespace.
fn calendar_date(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return dt.date().format("%Y-%m-%d").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }

    debug!("calendar_date: unrecognised timestamp \"{}\"", raw);
    match trimmed.split_whitespace().next() {
        Some(token) => token.to_string(),
        None => UNKNOWN_DATE.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
