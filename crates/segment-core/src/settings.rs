use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::criteria::{
    Criteria, DEFAULT_MIN_SEGMENT_DISTANCE_KM, DEFAULT_MIN_SESSION_DISTANCE_KM,
    DEFAULT_MIN_STROKE_RATE,
};
use crate::error::Result;

/// Directory under the home directory holding persisted state.
pub const APP_DIR_NAME: &str = ".sup-analyzer";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Find high stroke-rate segments in recorded SUP sessions
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sup-analyzer",
    about = "Find high stroke-rate segments in recorded SUP sessions",
    version
)]
pub struct Settings {
    /// Path to the session database (discovered automatically if omitted)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Only analyse sessions longer than this many km
    #[arg(long, default_value_t = DEFAULT_MIN_SESSION_DISTANCE_KM)]
    pub min_session_km: f64,

    /// Minimum distance of a qualifying segment in km
    #[arg(long, default_value_t = DEFAULT_MIN_SEGMENT_DISTANCE_KM)]
    pub min_segment_km: f64,

    /// Minimum weighted stroke rate of a qualifying segment (strokes/min)
    #[arg(long, default_value_t = DEFAULT_MIN_STROKE_RATE)]
    pub min_stroke_rate: f64,

    /// Report format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.sup-analyzer/last_used.json`.
///
/// Only the report format is remembered. The database path is discovered on
/// every run and thresholds fall back to their defaults unless given.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(APP_DIR_NAME).join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, fall back to the last-used format when none was
    /// given, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("Could not clear {}: {}", config_path.display(), e);
            }
            return Self::apply_debug_flag(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins over the persisted value.
        if !is_arg_explicitly_set(&matches, "format") {
            if let Some(v) = last.format {
                settings.format = v;
            }
        }

        settings = Self::apply_debug_flag(settings);

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::warn!("Could not persist settings to {}: {}", config_path.display(), e);
        }

        settings
    }

    /// The validated analysis thresholds.
    pub fn criteria(&self) -> Result<Criteria> {
        Criteria::new(
            self.min_session_km,
            self.min_segment_km,
            self.min_stroke_rate,
        )
    }

    /// Whether the report should be emitted as JSON.
    pub fn wants_json(&self) -> bool {
        self.format == "json"
    }

    fn apply_debug_flag(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            format: Some(s.format.clone()),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
