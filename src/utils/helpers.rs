//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

/// Storage format of appointment dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Storage format of slot start times
pub const TIME_FORMAT: &str = "%H:%M";
/// Storage format of creation/registration timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const MONTH_NAMES: [&str; 12] = [
    "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь",
    "Июль", "Август", "Сентябрь", "Октябрь", "Ноябрь", "Декабрь",
];

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// First eight characters of an identifier, for display
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parse a slot time, accepting an optional seconds part
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Month title for calendar headers, e.g. "Октябрь 2026"
pub fn month_title(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{} {}", MONTH_NAMES[date.month0() as usize], date.year())
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
