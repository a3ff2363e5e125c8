use chrono::{DateTime, Utc};

use crate::models::transaction::parse_timestamp;

/// Label for records without a usable timestamp
pub const UNKNOWN_AGE: &str = "unknown";

/// Unit ladder: each entry is reached once the previous unit's count hits `ratio`
const UNITS: [(&str, i64); 5] = [
    ("min", 60),
    ("hour", 60),
    ("day", 24),
    ("month", 30),
    ("year", 12),
];

/// Coarse relative age of `created_at` as seen from `now`
///
/// Examples: "just now", "1 min ago", "5 hours ago", "2 months ago".
/// Missing or unparseable timestamps give [`UNKNOWN_AGE`].
pub fn format_age(created_at: Option<&str>, now: DateTime<Utc>) -> String {
    match created_at.and_then(parse_timestamp) {
        Some(ts) => format_elapsed_secs((now - ts).num_seconds()),
        None => UNKNOWN_AGE.to_string(),
    }
}

/// Relative-age label for an elapsed number of seconds
pub fn format_elapsed_secs(seconds: i64) -> String {
    // Future timestamps (clock skew) read as fresh
    if seconds < 60 {
        return "just now".to_string();
    }

    let mut count = seconds;
    let mut unit = "second";
    for (name, ratio) in UNITS {
        if count < ratio {
            break;
        }
        count /= ratio;
        unit = name;
    }

    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_reference_points() {
        assert_eq!(format_elapsed_secs(0), "just now");
        assert_eq!(format_elapsed_secs(59), "just now");
        assert_eq!(format_elapsed_secs(90), "1 min ago");
        assert_eq!(format_elapsed_secs(3600), "1 hour ago");
        assert_eq!(format_elapsed_secs(90000), "1 day ago");
    }

    #[test]
    fn test_plurals() {
        assert_eq!(format_elapsed_secs(120), "2 mins ago");
        assert_eq!(format_elapsed_secs(59 * 60), "59 mins ago");
        assert_eq!(format_elapsed_secs(23 * 3600), "23 hours ago");
        assert_eq!(format_elapsed_secs(3 * 86400), "3 days ago");
    }

    #[test]
    fn test_months_and_years() {
        assert_eq!(format_elapsed_secs(30 * 86400), "1 month ago");
        assert_eq!(format_elapsed_secs(65 * 86400), "2 months ago");
        assert_eq!(format_elapsed_secs(360 * 86400), "1 year ago");
        assert_eq!(format_elapsed_secs(3 * 360 * 86400), "3 years ago");
    }

    #[test]
    fn test_future_and_missing() {
        assert_eq!(format_elapsed_secs(-500), "just now");

        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(format_age(None, now), UNKNOWN_AGE);
        assert_eq!(format_age(Some("garbage"), now), UNKNOWN_AGE);
    }

    #[test]
    fn test_format_age_from_iso() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let created = (now - Duration::minutes(5)).format("%Y-%m-%dT%H:%M:%S").to_string();
        assert_eq!(format_age(Some(&created), now), "5 mins ago");
        assert_eq!(format_age(Some("2025-06-01T10:00:00Z"), now), "2 hours ago");
    }
}
