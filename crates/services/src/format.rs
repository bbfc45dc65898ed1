//! Small display helpers shared by session views and exports.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Renders whole seconds as `m:ss`.
#[must_use]
pub fn format_clock(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Admin tables show `N/A` for a missing or zero duration.
#[must_use]
pub fn format_time_taken(secs: Option<u32>) -> String {
    match secs {
        Some(secs) if secs > 0 => format_clock(secs),
        _ => "N/A".to_owned(),
    }
}

/// Short numeric date on the local calendar, e.g. `11/14/2023`.
#[must_use]
pub fn format_short_date(date: DateTime<Utc>) -> String {
    format_short_date_in(date, &Local)
}

/// Short numeric date as seen from `tz`.
#[must_use]
pub fn format_short_date_in<Tz>(date: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.with_timezone(tz).format("%-m/%-d/%Y").to_string()
}

/// Lowercases a topic name and collapses whitespace runs into `-`.
#[must_use]
pub fn topic_slug(topic: &str) -> String {
    topic
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
