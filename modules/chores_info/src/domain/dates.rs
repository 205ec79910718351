//! Date and time parsing shared by the REST and tool surfaces.

use chrono::{Local, NaiveDate, NaiveTime, Timelike};

use crate::domain::error::DomainError;

pub const DATE_FORMAT_MESSAGE: &str = "Invalid date format. Use YYYY-MM-DD, e.g., 2025-10-30";
pub const TIME_FORMAT_MESSAGE: &str = "Invalid time format. Use HH:MM or HH:MM:SS, e.g., 14:30";

/// Current calendar date in the server's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Strict ISO `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    let s = raw.trim();
    // chrono accepts unpadded fields; ISO dates are always 10 chars
    if s.len() != 10 {
        return Err(DomainError::invalid_format("date", DATE_FORMAT_MESSAGE));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| DomainError::invalid_format("date", DATE_FORMAT_MESSAGE))
}

/// `None` for a missing or blank value.
pub fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    non_blank(raw).map(parse_date).transpose()
}

/// Missing or blank means today.
pub fn resolve_date(raw: Option<&str>) -> Result<NaiveDate, DomainError> {
    Ok(parse_optional_date(raw)?.unwrap_or_else(today))
}

/// Two-digit fields only: `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`.
fn is_padded_time(s: &str) -> bool {
    let b = s.as_bytes();
    match b.len() {
        5 => b[2] == b':',
        8 => b[2] == b':' && b[5] == b':',
        n if n > 9 => b[2] == b':' && b[5] == b':' && b[8] == b'.',
        _ => false,
    }
}

/// `HH:MM` or `HH:MM:SS` (fractional seconds tolerated).
pub fn parse_time(raw: &str) -> Result<NaiveTime, DomainError> {
    let s = raw.trim();
    // chrono accepts unpadded fields
    if !is_padded_time(s) {
        return Err(DomainError::invalid_format("time", TIME_FORMAT_MESSAGE));
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S%.f"))
        .map_err(|_| DomainError::invalid_format("time", TIME_FORMAT_MESSAGE))
}

/// `None` for a missing or blank value.
pub fn parse_optional_time(raw: Option<&str>) -> Result<Option<NaiveTime>, DomainError> {
    non_blank(raw).map(parse_time).transpose()
}

/// `HH:MM`, or `HH:MM:SS` when the seconds are not zero.
pub fn format_time(t: NaiveTime) -> String {
    if t.second() == 0 && t.nanosecond() == 0 {
        t.format("%H:%M").to_string()
    } else {
        t.format("%H:%M:%S").to_string()
    }
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}
