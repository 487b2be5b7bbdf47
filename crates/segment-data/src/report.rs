//! Text and JSON renderings of a [`ReportSummary`].
//!
//! The text layout (section order, rules, decimal places) is stable so that
//! downstream scripts can parse it.

use std::fmt;

use segment_core::criteria::Criteria;
use segment_core::error::Result;
use segment_core::formatting::{
    format_compact, format_km, format_percent, format_threshold,
};
use segment_core::models::SessionResult;

use crate::aggregator::{ReportAggregator, ReportSummary};

const RULE_WIDTH: usize = 70;

/// Summarise `results` and render the text report.
pub fn render_report(results: &[SessionResult], criteria: &Criteria) -> String {
    render_text(&ReportAggregator::summarize(results, criteria))
}

/// Render a summary as pretty-printed JSON.
pub fn render_json(summary: &ReportSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Render a summary as the plain-text report.
pub fn render_text(summary: &ReportSummary) -> String {
    TextReport(summary).to_string()
}

/// Plain-text view of a [`ReportSummary`].
struct TextReport<'a>(&'a ReportSummary);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(out, self.0)
    }
}

fn write_report(out: &mut fmt::Formatter<'_>, summary: &ReportSummary) -> fmt::Result {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let c = &summary.criteria;

    // ── Header and criteria ───────────────────────────────────────────────────
    writeln!(out, "{heavy}")?;
    writeln!(out, "SUP SESSION ANALYSIS: High Stroke Rate Segments")?;
    writeln!(out, "{heavy}")?;
    writeln!(out)?;
    writeln!(out, "Criteria:")?;
    writeln!(
        out,
        "  - Session distance: > {} km",
        format_threshold(c.min_session_distance_km)
    )?;
    writeln!(
        out,
        "  - Segment distance: >= {} km (consecutive laps)",
        format_threshold(c.min_segment_distance_km)
    )?;
    writeln!(
        out,
        "  - Stroke rate:      >= {} strokes/min (weighted avg)",
        format_threshold(c.min_stroke_rate)
    )?;
    writeln!(out)?;

    // ── Summary ───────────────────────────────────────────────────────────────
    writeln!(out, "{light}")?;
    writeln!(out, "SUMMARY")?;
    writeln!(out, "{light}")?;
    writeln!(
        out,
        "  Total sessions > {}km:     {}",
        format_compact(c.min_session_distance_km),
        summary.total_sessions
    )?;
    writeln!(
        out,
        "  Sessions with qualifying segment: {}",
        summary.qualifying_count
    )?;
    if summary.total_sessions > 0 {
        writeln!(
            out,
            "  Percentage:                       {}%",
            format_percent(summary.qualifying_percent)
        )?;
    }

    if let Some(share) = &summary.segment_share {
        writeln!(out)?;
        writeln!(out, "  Segment % of session (qualifying):")?;
        writeln!(
            out,
            "    Average: {}%  |  Min: {}%  |  Max: {}%",
            format_percent(share.average),
            format_percent(share.min),
            format_percent(share.max)
        )?;
    }

    if let Some(dps) = &summary.distance_per_stroke {
        writeln!(out)?;
        writeln!(out, "  Distance per stroke (qualifying):")?;
        writeln!(
            out,
            "    Average: {:.2} m  |  Min: {:.2} m  |  Max: {:.2} m",
            dps.average, dps.min, dps.max
        )?;
    }
    writeln!(out)?;

    // ── Qualifying sessions ───────────────────────────────────────────────────
    if !summary.qualifying.is_empty() {
        writeln!(out, "{light}")?;
        writeln!(out, "QUALIFYING SESSIONS")?;
        writeln!(out, "{light}")?;
        writeln!(out)?;

        for session in &summary.qualifying {
            let seg = &session.segment;
            writeln!(
                out,
                "  {}  |  {} km total",
                session.date,
                format_km(session.total_distance_km)
            )?;
            writeln!(
                out,
                "    Segment: Laps {}-{}  |  {}% of session",
                seg.start_lap,
                seg.end_lap,
                format_percent(session.segment_share_percent)
            )?;
            writeln!(
                out,
                "    Distance: {} km  |  Stroke Rate: {:.1} spm  |  DPS: {:.2} m  |  Time: {:.1} min",
                format_km(seg.distance_km),
                seg.weighted_stroke_rate,
                seg.avg_distance_per_stroke,
                seg.total_time_min()
            )?;
            writeln!(out)?;
        }
    }

    // ── Non-qualifying sessions ───────────────────────────────────────────────
    if !summary.non_qualifying.is_empty() {
        writeln!(out, "{light}")?;
        writeln!(
            out,
            "NON-QUALIFYING SESSIONS (no {}km segment >= {} spm)",
            format_compact(c.min_segment_distance_km),
            format_compact(c.min_stroke_rate)
        )?;
        writeln!(out, "{light}")?;
        for session in &summary.non_qualifying {
            writeln!(
                out,
                "  {}  |  {} km",
                session.date,
                format_km(session.total_distance_km)
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{heavy}")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
