//! Human-readable byte sizes

const KB: u64 = 1024;
const UNITS: [&str; 3] = ["KB", "MB", "GB"];

/// Format a byte count using base-1024 units and one decimal place.
///
/// Counts below 1 KB are printed as whole bytes; anything at or above 1 GB
/// stays in GB. The unit is picked after rounding, so a value that would
/// print as `1024.0` moves up to the next unit.
pub fn format_size(bytes: u64) -> String {
    if bytes < KB {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / KB as f64;
    let mut unit = 0;
    while unit + 1 < UNITS.len() && (value * 10.0).round() / 10.0 >= KB as f64 {
        value /= KB as f64;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
