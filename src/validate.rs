//! Pure checks on user input. Nothing here touches the clock except
//! [`validate_date`], which reads today's local date and defers to
//! [`validate_date_on`].

use chrono::{Days, Local, NaiveDate};

/// Format accepted for travel dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How far ahead of today a travel date may be, inclusive.
pub const MAX_DAYS_AHEAD: u64 = 90;

/// True if `name` is non-empty and, once trimmed, holds only letters, spaces and hyphens.
pub fn validate_city_code(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    name.trim().chars().all(|c| is_letter(c) || c == ' ' || c == '-')
}

// Letter numbers such as Roman numerals are alphabetic but not letters.
fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}

/// Parse a `YYYY-MM-DD` date: four year digits, then one or two digits each
/// for month and day. No sign, no whitespace.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('-');
    let shape_ok = matches!(
        (parts.next(), parts.next(), parts.next(), parts.next()),
        (Some(y), Some(m), Some(d), None)
            if digits(y, 4..=4) && digits(m, 1..=2) && digits(d, 1..=2)
    );
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

fn digits(part: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
}

/// True if `date` falls within `[today, today + MAX_DAYS_AHEAD]`.
pub fn date_in_window(date: NaiveDate, today: NaiveDate) -> bool {
    match today.checked_add_days(Days::new(MAX_DAYS_AHEAD)) {
        Some(last) => today <= date && date <= last,
        None => false,
    }
}

pub fn validate_date_on(text: &str, today: NaiveDate) -> bool {
    parse_date(text).is_some_and(|date| date_in_window(date, today))
}

pub fn validate_date(text: &str) -> bool {
    validate_date_on(text, today())
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
