//! Human-readable time formatting for play-head, trimmer and cook status displays.

/// Format seconds as `H:MM:SS`.
///
/// ```
/// use clipline::format_hms;
/// assert_eq!(format_hms(0.0), "0:00:00");
/// assert_eq!(format_hms(3875.4), "1:04:35");
/// ```
pub fn format_hms(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Format seconds as `MM:SS`, the play-head display.
///
/// Minutes are not wrapped into hours.
pub fn format_mm_ss(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format seconds with two decimals and a narrow unit, e.g. `4.25s`.
pub fn format_seconds(secs: f64) -> String {
    format!("{secs:.2}s")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/format.rs"]
mod tests;
