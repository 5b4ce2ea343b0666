use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Renders a timestamp the way `en-US` locales print dates, in server local
/// time, e.g. `10/16/2026, 1:05:09 PM`.
pub fn format_date_time(datetime: &DateTime<Utc>) -> String {
    format_in_zone(&datetime.with_timezone(&Local))
}

pub fn format_in_zone<Tz>(datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    datetime.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
