//! Source of "today" for expiry checks

use crate::card::YearMonth;
use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    fn current_month(&self) -> YearMonth;
}

/// Reads the local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_month(&self) -> YearMonth {
        YearMonth::from_date(&Local::now().date_naive())
    }
}

/// Always reports the same month
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(YearMonth);

impl FixedClock {
    pub fn new(month: YearMonth) -> Self {
        Self(month)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(YearMonth::from_date(&date))
    }
}

impl Clock for FixedClock {
    fn current_month(&self) -> YearMonth {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::from_date(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
        assert_eq!(clock.current_month(), YearMonth::new(2025, 6).unwrap());
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.current_month() > YearMonth::new(2020, 12).unwrap());
    }
}
