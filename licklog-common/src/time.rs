//! Timestamp utilities

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a practice date as `M/D/YYYY`
///
/// Always reads the UTC calendar fields so a stored midnight-UTC date never
/// shifts to the previous day.
pub fn format_practice_date(date: &DateTime<Utc>) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Parse a form date (`YYYY-MM-DD`) into midnight UTC of that day
pub fn parse_form_date(input: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Last second of the UTC calendar day containing `date`
pub fn end_of_day(date: &DateTime<Utc>) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&date.date_naive().and_time(last))
}
