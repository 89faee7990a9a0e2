//! Fractional-hour parsing and formatting.
//!
//! Times of day are stored as hours since midnight with fractional
//! minutes (9.25 = 09:15). The CLI accepts `9`, `9.25`, or `9:15`.

/// Format a fractional hour as `HH:MM`. Values at or past 24 are not
/// wrapped (a block ending exactly at midnight prints `24:00`).
pub fn format_hour(hour: f64) -> String {
    let total_minutes = (hour * 60.0).round() as i64;
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Format a block's interval as `HH:MM-HH:MM`.
pub fn format_range(start_hour: f64, duration: f64) -> String {
    format!(
        "{}-{}",
        format_hour(start_hour),
        format_hour(start_hour + duration)
    )
}

/// Format a duration in hours as `2h`, `45m`, or `1h 30m`.
pub fn format_duration(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let (h, m) = (total_minutes / 60, total_minutes % 60);
    match (h, m) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Parse an hour-of-day or duration string: `9`, `9.25`, or `9:15`.
/// Returns `None` for anything unparseable (including minutes >= 60).
pub fn parse_hour(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Some((h, m)) = s.split_once(':') {
        let hours: u32 = h.parse().ok()?;
        let minutes: u32 = m.parse().ok()?;
        if m.len() != 2 || minutes >= 60 {
            return None;
        }
        return Some(hours as f64 + minutes as f64 / 60.0);
    }
    let value: f64 = s.parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}
