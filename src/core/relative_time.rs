//! Human-readable "how long ago" strings for the note list.

use chrono::{DateTime, Local};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Format the time elapsed between `modified` and `now`.
///
/// A modification time in the future (clock skew) reads as "just now".
pub fn format_relative(modified: DateTime<Local>, now: DateTime<Local>) -> String {
    let secs = now.signed_duration_since(modified).num_seconds();

    if secs < MINUTE {
        return "just now".to_string();
    }
    if secs < HOUR {
        return plural(secs / MINUTE, "minute");
    }
    if secs < DAY {
        return plural(secs / HOUR, "hour");
    }
    if secs < WEEK {
        let days = secs / DAY;
        if days == 1 {
            return "yesterday".to_string();
        }
        return format!("{days} days ago");
    }
    if secs < MONTH {
        return plural(secs / WEEK, "week");
    }
    if secs < YEAR {
        return plural(secs / MONTH, "month");
    }
    plural(secs / YEAR, "year")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
