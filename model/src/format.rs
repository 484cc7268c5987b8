use std::fmt::Display;

use chrono::{LocalResult, TimeZone};

const FORMAT: &str = "%b %-d, %H:%M:%S";

/// Seconds since the Unix epoch, as local time like "Jan 5, 14:03:22". Never fails: non-finite
/// times are "N/A", and times chrono can't represent are "Invalid Date".
pub fn format_timestamp(ts: f64) -> String {
    format_timestamp_in(ts, &chrono::Local)
}

pub fn format_timestamp_in<Tz: TimeZone>(ts: f64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    if !ts.is_finite() {
        return "N/A".to_string();
    }
    let secs = ts.floor();
    if secs < i64::MIN as f64 || secs > i64::MAX as f64 {
        return "Invalid Date".to_string();
    }
    let nanos = (((ts - secs) * 1e9) as u32).min(999_999_999);
    match tz.timestamp_opt(secs as i64, nanos) {
        LocalResult::Single(time) | LocalResult::Ambiguous(time, _) => {
            time.format(FORMAT).to_string()
        }
        LocalResult::None => "Invalid Date".to_string(),
    }
}
