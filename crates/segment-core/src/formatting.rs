/// Calculate `(part / whole) * 100`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use segment_core::formatting::percentage;
///
/// assert!((percentage(1.0, 5.0) - 20.0).abs() < 1e-9);
/// assert_eq!(percentage(3.0, 0.0), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    (part / whole) * 100.0
}

/// Format a threshold so it always shows at least one decimal place.
///
/// # Examples
///
/// ```
/// use segment_core::formatting::format_threshold;
///
/// assert_eq!(format_threshold(4.9), "4.9");
/// assert_eq!(format_threshold(1.0), "1.0");
/// assert_eq!(format_threshold(48.0), "48.0");
/// assert_eq!(format_threshold(52.25), "52.25");
/// ```
pub fn format_threshold(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Format a threshold in its shortest form, dropping a trailing `.0`.
///
/// # Examples
///
/// ```
/// use segment_core::formatting::format_compact;
///
/// assert_eq!(format_compact(1.0), "1");
/// assert_eq!(format_compact(48.0), "48");
/// assert_eq!(format_compact(4.9), "4.9");
/// ```
pub fn format_compact(value: f64) -> String {
    format!("{}", value)
}

/// Format a distance in kilometres with two decimals.
pub fn format_km(km: f64) -> String {
    format!("{:.2}", km)
}

/// Format a percentage value with one decimal (no `%` sign).
pub fn format_percent(value: f64) -> String {
    format!("{:.1}", value)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
