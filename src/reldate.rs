//! Relative-date formatting for post timestamps ("2 days ago").

use chrono::{DateTime, Utc};

use crate::locale::Catalog;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_DAY: i64 = 86400;

/// Picks the message template and its numeric argument for an elapsed time.
///
/// First match wins. `diff` is elapsed whole seconds, `day_diff` elapsed
/// whole days.
fn bucket(diff: i64, day_diff: i64) -> (&'static str, Option<i64>) {
    if diff < 60 {
        ("Just now", None)
    } else if diff < 120 {
        ("1 minute ago", None)
    } else if diff < SECS_PER_HOUR {
        ("%d minutes ago", Some(diff / SECS_PER_MINUTE))
    } else if diff < 2 * SECS_PER_HOUR {
        ("1 hour ago", None)
    } else if day_diff == 0 && diff < SECS_PER_DAY {
        ("%d hours ago", Some(diff / SECS_PER_HOUR))
    } else if day_diff == 1 {
        ("Yesterday", None)
    } else if day_diff < 7 {
        ("%d days ago", Some(day_diff))
    } else if day_diff < 31 {
        ("%d weeks ago", Some((day_diff + 6) / 7))
    } else {
        ("5+ weeks ago", None)
    }
}

/// Converts a timestamp string to a localized relative-date string.
///
/// Returns `None` for a malformed timestamp or one in the future, signaling
/// that no age should be displayed.
pub fn make_localized(date_str: &str, now: DateTime<Utc>, catalog: &Catalog) -> Option<String> {
    let date = DateTime::parse_from_rfc3339(date_str).ok()?;
    let diff = now.signed_duration_since(date).num_seconds();
    if diff < 0 {
        return None;
    }

    let day_diff = diff / SECS_PER_DAY;
    let (template, count) = bucket(diff, day_diff);
    Some(catalog.format(template, count))
}

/// Converts a timestamp string to an English relative-date string.
pub fn make(date_str: &str, now: DateTime<Utc>) -> Option<String> {
    make_localized(date_str, now, &Catalog::english())
}
