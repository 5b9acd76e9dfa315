use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use time_tz::{ToTimezone, timezones};

/// Canonical calendar-day key exchanged with the record store.
pub const DAY_KEY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

pub fn format_day_key(date: Date) -> String {
    date.format(DAY_KEY_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

pub fn parse_day_key(value: &str) -> crate::Result<Date> {
    match Date::parse(value.trim(), DAY_KEY_FORMAT) {
        Ok(date) => Ok(date),
        Err(e) => crate::user!("invalid day key '{}': {}", value, e),
    }
}

/// Current calendar day in the given IANA time zone.
///
/// The wall-clock time is dropped, so every caller in the same zone gets the
/// same day regardless of the hour it runs.
pub fn today(timezone: &str) -> crate::Result<Date> {
    today_from(OffsetDateTime::now_utc(), timezone)
}

pub fn today_from(now: OffsetDateTime, timezone: &str) -> crate::Result<Date> {
    let Some(tz) = timezones::get_by_name(timezone) else {
        crate::user!("unknown time zone '{}'", timezone);
    };

    Ok(now.to_timezone(tz).date())
}

pub fn is_known_timezone(timezone: &str) -> bool {
    timezones::get_by_name(timezone).is_some()
}

/// Serde adapter storing a [`Date`] as its `yyyy-MM-dd` key.
pub mod day_key {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_day_key(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_day_key(&value).map_err(serde::de::Error::custom)
    }
}
