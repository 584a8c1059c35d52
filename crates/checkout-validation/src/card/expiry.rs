//! Expiry parsing, checking and live formatting

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base year added to two-digit expiry years (`29` → 2029)
pub const DEFAULT_CENTURY: i32 = 2000;
/// Inserted by [`format_expiry`] between month and year
pub const EXPIRY_SEPARATOR: &str = " / ";
const EXPIRY_DIGITS: usize = 4;

/// Calendar month; ordering is chronological
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// `None` unless `month` is in 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// `mm` in 1..=12 and 20`yy` not before `today`'s month
pub fn is_valid_expiry(mm: u32, yy: u32, today: YearMonth) -> bool {
    is_valid_expiry_in(mm, yy, DEFAULT_CENTURY, today)
}

/// Same as [`is_valid_expiry`] with an explicit century base
pub fn is_valid_expiry_in(mm: u32, yy: u32, century: i32, today: YearMonth) -> bool {
    if yy > 99 {
        return false;
    }
    full_year(century, yy)
        .and_then(|year| YearMonth::new(year, mm))
        .is_some_and(|expiry| expiry >= today)
}

/// Split the display shape `MM / YY` into its numeric month and year.
///
/// Whitespace around the slash is optional. The month may be one or two
/// digits and must be in 1..=12; the year must be exactly two digits.
pub fn expiry_parts(s: &str) -> Option<(u32, u32)> {
    let mut parts = s.split('/');
    let month = parts.next()?.trim();
    let year = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if month.is_empty() || month.len() > 2 || !all_digits(month) {
        return None;
    }
    if year.len() != 2 || !all_digits(year) {
        return None;
    }

    let month: u32 = month.parse().ok()?;
    let year: u32 = year.parse().ok()?;
    (1..=12).contains(&month).then_some((month, year))
}

/// Parse `MM / YY` into a calendar month under `century`
pub fn parse_expiry(s: &str, century: i32) -> Option<YearMonth> {
    let (month, yy) = expiry_parts(s)?;
    YearMonth::new(full_year(century, yy)?, month)
}

fn full_year(century: i32, yy: u32) -> Option<i32> {
    century.checked_add(i32::try_from(yy).ok()?)
}

/// Live display format: at most `MMYY` digits, `" / "` once two are typed
pub fn format_expiry(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(EXPIRY_DIGITS)
        .collect();

    if digits.len() < 2 {
        return digits;
    }
    let (month, year) = digits.split_at(2);
    format!("{month}{EXPIRY_SEPARATOR}{year}")
}
