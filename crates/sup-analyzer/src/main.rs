mod bootstrap;

use anyhow::{Context, Result};
use segment_core::settings::Settings;
use segment_data::aggregator::ReportAggregator;
use segment_data::analysis::analyze_sessions;
use segment_data::report::{render_json, render_text};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("SUP analyzer v{} starting", env!("CARGO_PKG_VERSION"));

    let criteria = settings.criteria()?;
    tracing::info!(
        "Criteria: session > {} km, segment >= {} km, rate >= {} spm",
        criteria.min_session_distance_km,
        criteria.min_segment_distance_km,
        criteria.min_stroke_rate
    );

    let db_path = bootstrap::discover_database_path(settings.db.as_deref())?;

    let results = analyze_sessions(&db_path, &criteria).map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;

    let summary = ReportAggregator::summarize(&results, &criteria);
    tracing::info!(
        "{} of {} sessions have a qualifying segment",
        summary.qualifying_count,
        summary.total_sessions
    );

    if settings.wants_json() {
        let json = render_json(&summary).context("Failed to render JSON report")?;
        println!("{}", json);
    } else {
        print!("{}", render_text(&summary));
    }

    Ok(())
}
