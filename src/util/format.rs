use chrono::{DateTime, Local, TimeZone, Utc};
use humansize::{BINARY, format_size as humansize_format};
use std::fmt::Display;
use std::time::Duration;

/// Shown in place of a missing timestamp or duration
pub const NO_VALUE: &str = "-";

/// Bytes as a human-readable binary size (e.g. "1.5 MiB")
pub fn format_size(bytes: u64) -> String {
    humansize_format(bytes, BINARY)
}

/// Timestamp in the local timezone, or "-" when absent
pub fn format_date(time: Option<DateTime<Utc>>) -> String {
    format_date_in(time, &Local)
}

pub fn format_date_in<Tz>(time: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match time {
        Some(t) => t.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => NO_VALUE.to_string(),
    }
}

/// Wall time between two timestamps, to the second
pub fn format_elapsed(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> String {
    let (Some(start), Some(end)) = (start, end) else {
        return NO_VALUE.to_string();
    };
    match (end - start).to_std() {
        Ok(elapsed) => {
            humantime::format_duration(Duration::from_secs(elapsed.as_secs())).to_string()
        }
        Err(_) => NO_VALUE.to_string(),
    }
}

/// First group of a uuid, "unknown" when empty
pub fn short_uuid(uuid: &str) -> &str {
    if uuid.is_empty() {
        return "unknown";
    }
    uuid.split('-').next().unwrap_or(uuid)
}
