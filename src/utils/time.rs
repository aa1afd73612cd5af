//! Time parsing and formatting utilities
//!
//! Labels on the timeline are whole seconds: fractions are floored, never
//! rounded, so a label never shows a time the playhead has not reached yet.

/// Format seconds as `HH:MM:SS`
///
/// Negative and non-finite values render as `00:00:00`. Hours are not
/// wrapped, so a 100 hour recording renders as `100:00:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Format seconds as `HH-MM-SS`, safe for use in file names
pub fn format_time_for_filename(seconds: f64) -> String {
    format_time(seconds).replace(':', "-")
}

/// Parse `H:M:S`, `M:S` or `S` into seconds
///
/// Each field is read as a leading integer, so `"30.5"` and `"30s"` are both
/// 30. A field with no leading digits counts as zero and an empty string
/// parses as zero, matching the lenient text inputs next to the timeline.
/// Range checks are the caller's job.
pub fn parse_time(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let parts: Vec<f64> = trimmed
        .split(':')
        .map(leading_integer)
        .collect();

    match parts.as_slice() {
        [hours, minutes, secs] => hours * 3600.0 + minutes * 60.0 + secs,
        [minutes, secs] => minutes * 60.0 + secs,
        [secs] => *secs,
        // More than three fields: only the leading one is meaningful
        [first, ..] => *first,
        [] => 0.0,
    }
}

/// Optional sign followed by the leading ASCII digits of `field`, or zero
fn leading_integer(field: &str) -> f64 {
    let field = field.trim();
    let (sign, rest) = match field.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, field.strip_prefix('+').unwrap_or(field)),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    rest[..digits]
        .parse::<f64>()
        .map(|value| sign * value)
        .unwrap_or(0.0)
}

/// Format a byte count for display (`-` when unknown)
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "-".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;
    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let rounded = (size * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit_index])
}
