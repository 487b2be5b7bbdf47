use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use segment_core::error::AnalyzerError;
use segment_core::settings::APP_DIR_NAME;

/// File name the importer gives the session database.
pub const DATABASE_FILE_NAME: &str = "sup_analysis.db";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.sup-analyzer/` exists so settings can be persisted.
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(home.join(APP_DIR_NAME))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// Logs go to stderr so the report on stdout stays machine-readable. Colour
/// is only used when stderr is a terminal. Falls back to `"warn"` if the
/// level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(tracing_level(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}

/// Map CLI level names onto tracing's lowercase directives.
fn tracing_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

// ── Database discovery ─────────────────────────────────────────────────────────

/// Locate the session database.
///
/// An explicit path is used as-is. Otherwise the following are checked in
/// order and the first existing one wins:
/// 1. `./sup_analysis.db`
/// 2. `~/.sup-analyzer/sup_analysis.db`
pub fn discover_database_path(explicit: Option<&Path>) -> Result<PathBuf, AnalyzerError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let mut candidates = vec![PathBuf::from(DATABASE_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(APP_DIR_NAME).join(DATABASE_FILE_NAME));
    }

    let fallback = candidates[0].clone();
    candidates
        .into_iter()
        .find(|p| p.exists())
        .ok_or(AnalyzerError::StoreNotFound(fallback))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
