//! Summary statistics over a full set of session results.

use segment_core::criteria::Criteria;
use segment_core::formatting::percentage;
use segment_core::models::{QualifyingSegment, SessionResult};
use segment_core::stats::SummaryStats;
use serde::Serialize;

// ── QualifyingSession ─────────────────────────────────────────────────────────

/// A session that contains a qualifying segment, with its share of the
/// session distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualifyingSession {
    pub session_id: i64,
    pub date: String,
    pub total_distance_km: f64,
    /// Segment distance as a percentage of the session distance.
    pub segment_share_percent: f64,
    pub segment: QualifyingSegment,
}

// ── NonQualifyingSession ──────────────────────────────────────────────────────

/// A session analysed without finding a qualifying segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonQualifyingSession {
    pub session_id: i64,
    pub date: String,
    pub total_distance_km: f64,
}

// ── ReportSummary ─────────────────────────────────────────────────────────────

/// Everything the report shows, computed once from the session results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub criteria: Criteria,
    pub total_sessions: usize,
    pub qualifying_count: usize,
    /// Share of sessions with a qualifying segment; `0.0` when there are no
    /// sessions.
    pub qualifying_percent: f64,
    /// Segment share of session distance; `None` without qualifying sessions.
    pub segment_share: Option<SummaryStats>,
    /// Distance per stroke in meters; `None` without qualifying sessions.
    pub distance_per_stroke: Option<SummaryStats>,
    pub qualifying: Vec<QualifyingSession>,
    pub non_qualifying: Vec<NonQualifyingSession>,
}

// ── ReportAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that turns session results into a [`ReportSummary`].
pub struct ReportAggregator;

impl ReportAggregator {
    /// Summarise `results`, keeping their order within each listing.
    pub fn summarize(results: &[SessionResult], criteria: &Criteria) -> ReportSummary {
        let mut qualifying = Vec::new();
        let mut non_qualifying = Vec::new();

        for result in results {
            match (&result.qualifying_segment, result.segment_share_percent()) {
                (Some(segment), Some(share)) => qualifying.push(QualifyingSession {
                    session_id: result.session_id,
                    date: result.date.clone(),
                    total_distance_km: result.total_distance_km,
                    segment_share_percent: share,
                    segment: segment.clone(),
                }),
                _ => non_qualifying.push(NonQualifyingSession {
                    session_id: result.session_id,
                    date: result.date.clone(),
                    total_distance_km: result.total_distance_km,
                }),
            }
        }

        let shares: Vec<f64> = qualifying
            .iter()
            .map(|q| q.segment_share_percent)
            .collect();
        let dps: Vec<f64> = qualifying
            .iter()
            .map(|q| q.segment.avg_distance_per_stroke)
            .collect();

        ReportSummary {
            criteria: *criteria,
            total_sessions: results.len(),
            qualifying_count: qualifying.len(),
            qualifying_percent: percentage(qualifying.len() as f64, results.len() as f64),
            segment_share: SummaryStats::from_values(&shares),
            distance_per_stroke: SummaryStats::from_values(&dps),
            qualifying,
            non_qualifying,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
