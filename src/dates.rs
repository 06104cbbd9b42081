use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

/// Calendar-day format used by query params and weight entries.
pub const YMD: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse_ymd(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, YMD)
}

/// The UTC day `now` falls on. All bucketing and range queries run on UTC
/// day boundaries; the process's local time zone is never consulted.
pub fn utc_today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Half-open range `[midnight, next midnight)` of a UTC calendar day.
pub fn day_bounds(day: Date) -> (OffsetDateTime, OffsetDateTime) {
    let start = day.midnight().assume_utc();
    (start, start + Duration::days(1))
}

/// Half-open range covering `days_back` days before `day` through the end
/// of `day` itself.
pub fn trailing_bounds(day: Date, days_back: i64) -> (OffsetDateTime, OffsetDateTime) {
    let (_, end) = day_bounds(day);
    let start = (day - Duration::days(days_back)).midnight().assume_utc();
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn parses_iso_calendar_dates() {
        assert_eq!(parse_ymd("2025-06-30").ok(), Some(date!(2025 - 06 - 30)));
        assert!(parse_ymd("30/06/2025").is_err());
        assert!(parse_ymd("not-a-date").is_err());
    }

    #[test]
    fn day_bounds_are_half_open_utc() {
        let (start, end) = day_bounds(date!(2025 - 06 - 30));
        assert_eq!(start, datetime!(2025 - 06 - 30 00:00 UTC));
        assert_eq!(end, datetime!(2025 - 07 - 01 00:00 UTC));
    }

    #[test]
    fn trailing_bounds_cover_the_whole_window() {
        let (start, end) = trailing_bounds(date!(2025 - 06 - 30), 30);
        assert_eq!(start, datetime!(2025 - 05 - 31 00:00 UTC));
        assert_eq!(end, datetime!(2025 - 07 - 01 00:00 UTC));
    }
}
