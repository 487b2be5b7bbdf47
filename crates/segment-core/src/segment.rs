//! Qualifying-segment search over the laps of a single session.
//!
//! A segment qualifies when a contiguous run of laps covers at least the
//! minimum segment distance while its weighted stroke rate (total strokes
//! over total time) stays at or above the minimum rate.
//!
//! The search returns the *first* such run in scan order, not the best one:
//! for each start lap the window is grown only until it first reaches the
//! distance threshold. If the rate is too low at that point the start is
//! abandoned, even if a longer window would recover the rate.

use tracing::debug;

use crate::criteria::Criteria;
use crate::models::{Lap, QualifyingSegment};

// ── Accumulator ───────────────────────────────────────────────────────────────

/// Running totals for one candidate window.
#[derive(Debug, Clone, Copy, Default)]
struct Window {
    distance: f64,
    time: f64,
    strokes: i64,
}

impl Window {
    fn add(&mut self, distance: f64, time: f64, strokes: i64) {
        self.distance += distance;
        self.time += time;
        self.strokes += strokes;
    }

    /// Strokes per minute over the whole window. `time` is always positive
    /// once at least one lap has been added.
    fn stroke_rate(&self) -> f64 {
        (self.strokes as f64 / self.time) * 60.0
    }
}

// ── SegmentFinder ─────────────────────────────────────────────────────────────

/// Scans ordered laps for the first qualifying segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentFinder {
    criteria: Criteria,
}

impl SegmentFinder {
    pub fn new(criteria: Criteria) -> Self {
        Self { criteria }
    }

    /// Find the first qualifying segment in `laps`, which must already be in
    /// ascending lap-number order.
    ///
    /// For every start index the window is extended lap by lap:
    /// * a lap with missing distance, time or strokes, or with a
    ///   non-positive time, ends the window (later starts are unaffected);
    /// * once the cumulative distance reaches the threshold the window
    ///   either qualifies (returned immediately) or the start is abandoned.
    pub fn find(&self, laps: &[Lap]) -> Option<QualifyingSegment> {
        let min_distance_m = self.criteria.min_segment_distance_m();

        for start in 0..laps.len() {
            let mut window = Window::default();

            for lap in &laps[start..] {
                let Some((distance, time, strokes)) = lap.measurements() else {
                    debug!(
                        "lap {} has incomplete data; window from lap {} truncated",
                        lap.lap_number, laps[start].lap_number
                    );
                    break;
                };

                window.add(distance, time, strokes);

                if window.distance < min_distance_m {
                    continue;
                }

                let rate = window.stroke_rate();
                if rate >= self.criteria.min_stroke_rate {
                    return Some(QualifyingSegment {
                        start_lap: laps[start].lap_number,
                        end_lap: lap.lap_number,
                        distance_km: window.distance / 1000.0,
                        weighted_stroke_rate: rate,
                        total_strokes: window.strokes,
                        total_time_sec: window.time,
                        avg_distance_per_stroke: window.distance / window.strokes as f64,
                    });
                }
                break;
            }
        }

        None
    }
}

/// Convenience wrapper around [`SegmentFinder::find`].
pub fn find_qualifying_segment(laps: &[Lap], criteria: &Criteria) -> Option<QualifyingSegment> {
    SegmentFinder::new(*criteria).find(laps)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
