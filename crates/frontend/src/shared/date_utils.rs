/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

/// 2024-03-15 -> "15.03.2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Optional date, "—" when empty
pub fn format_date_opt(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "—".to_string())
}

/// 14:02:26 -> "14:02"
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// UTC timestamp -> "15.03.2024 14:02" in the browser's zone
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&chrono::Local)
        .format("%d.%m.%Y %H:%M")
        .to_string()
}

/// Value for `<input type="date">`
pub fn date_input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse `<input type="date">`; empty or malformed input gives `None`
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parse `<input type="time">`, which may or may not carry seconds
pub fn parse_time_input(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(d(2024, 3, 15)), "15.03.2024");
        assert_eq!(format_date_opt(None), "—");
    }

    #[test]
    fn test_date_input_round_trip() {
        assert_eq!(date_input_value(d(2026, 4, 1)), "2026-04-01");
        assert_eq!(parse_date_input("2026-04-01"), Some(d(2026, 4, 1)));
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("01.04.2026"), None);
    }

    #[test]
    fn test_time_input_with_and_without_seconds() {
        let t = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(parse_time_input("09:30"), Some(t));
        assert_eq!(parse_time_input("09:30:00"), Some(t));
        assert_eq!(parse_time_input("9.30"), None);
        assert_eq!(format_time(t), "09:30");
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(d(2026, 2, 28)), d(2026, 2, 1));
        assert_eq!(month_start(d(2026, 2, 1)), d(2026, 2, 1));
    }
}
