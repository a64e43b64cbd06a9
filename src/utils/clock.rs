use chrono::{DateTime, Local, TimeZone};

/// 月/日/年 12 小時制，例如 `01/08/23 04:24:00 PM`
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%y %I:%M:%S %p";

pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

pub fn now() -> String {
    format_timestamp(&Local::now())
}
