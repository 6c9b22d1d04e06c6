//! Bracketed timestamp parsing and formatting.
//!
//! Analysis text carries timestamps as `[HH:MM:SS]` or `[MM:SS]`, sometimes
//! backtick-wrapped. This module converts those to seconds and back.

/// Parse a timestamp string to total seconds.
///
/// Strips enclosing brackets, backticks and whitespace, then splits on `:`.
/// Three parts are read as H:M:S, two as M:S. Any other shape, or a
/// non-numeric component, yields `None` so callers can tell "no timestamp"
/// apart from a genuine `00:00:00`.
///
/// # Examples
/// ```
/// use klip_models::timestamp::parse_timestamp;
/// assert_eq!(parse_timestamp("[00:10:50]"), Some(650.0));
/// assert_eq!(parse_timestamp("05:30"), Some(330.0));
/// assert_eq!(parse_timestamp("ab:cd"), None);
/// ```
pub fn parse_timestamp(ts: &str) -> Option<f64> {
    let ts = ts.trim().trim_matches(|c| c == '[' || c == ']' || c == '`').trim();
    if ts.is_empty() {
        return None;
    }

    let parts: Vec<&str> = ts.split(':').collect();
    match parts.len() {
        2 => {
            // MM:SS
            let minutes: f64 = parts[0].trim().parse().ok()?;
            let seconds: f64 = parts[1].trim().parse().ok()?;
            if minutes < 0.0 || seconds < 0.0 {
                return None;
            }
            Some(minutes * 60.0 + seconds)
        }
        3 => {
            // HH:MM:SS
            let hours: f64 = parts[0].trim().parse().ok()?;
            let minutes: f64 = parts[1].trim().parse().ok()?;
            let seconds: f64 = parts[2].trim().parse().ok()?;
            if hours < 0.0 || minutes < 0.0 || seconds < 0.0 {
                return None;
            }
            Some(hours * 3600.0 + minutes * 60.0 + seconds)
        }
        _ => None,
    }
}

/// Coercing variant of [`parse_timestamp`]: unparseable input becomes `0.0`.
///
/// Kept for display paths that want the legacy "default to zero" contract.
/// The extractor uses the strict form so a malformed timeline drops the
/// section instead of fabricating a clip starting at time zero.
pub fn parse_timestamp_lenient(ts: &str) -> f64 {
    parse_timestamp(ts).unwrap_or(0.0)
}

/// Format seconds into an `HH:MM:SS` string.
///
/// Each unit is floored and zero-padded to 2 digits; the hour field is always
/// emitted, even when zero.
///
/// # Examples
/// ```
/// use klip_models::timestamp::format_seconds;
/// assert_eq!(format_seconds(650.0), "00:10:50");
/// assert_eq!(format_seconds(3661.0), "01:01:01");
/// ```
pub fn format_seconds(total_secs: f64) -> String {
    let total = total_secs.max(0.0).floor() as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_hh_mm_ss() {
        assert_eq!(parse_timestamp("00:00:00"), Some(0.0));
        assert_eq!(parse_timestamp("00:01:00"), Some(60.0));
        assert_eq!(parse_timestamp("01:00:00"), Some(3600.0));
        assert_eq!(parse_timestamp("00:11:28"), Some(688.0));
    }

    #[test]
    fn test_parse_timestamp_mm_ss() {
        assert_eq!(parse_timestamp("05:30"), Some(330.0));
        assert_eq!(parse_timestamp("10:50"), Some(650.0));
    }

    #[test]
    fn test_parse_timestamp_wrapped() {
        assert_eq!(parse_timestamp("[00:10:50]"), Some(650.0));
        assert_eq!(parse_timestamp("`[00:10:50]`"), Some(650.0));
        assert_eq!(parse_timestamp("  [05:30]  "), Some(330.0));
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("  "), None);
        assert_eq!(parse_timestamp("ab:cd"), None);
        assert_eq!(parse_timestamp("90"), None);
        assert_eq!(parse_timestamp("1:2:3:4"), None);
        assert_eq!(parse_timestamp("-1:30"), None);
    }

    #[test]
    fn test_parse_timestamp_lenient() {
        assert_eq!(parse_timestamp_lenient("05:30"), 330.0);
        assert_eq!(parse_timestamp_lenient("ab:cd"), 0.0);
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "00:00:00");
        assert_eq!(format_seconds(90.0), "00:01:30");
        assert_eq!(format_seconds(3661.0), "01:01:01");
        assert_eq!(format_seconds(650.0), "00:10:50");
    }

    #[test]
    fn test_roundtrip() {
        // parse(format(n)) == floor(n) for integer seconds n >= 0
        for n in [0u64, 1, 59, 60, 61, 650, 3599, 3600, 86399] {
            let formatted = format_seconds(n as f64);
            assert_eq!(parse_timestamp(&formatted), Some(n as f64));
        }
    }
}
