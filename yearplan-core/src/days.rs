//! Calendar day keys and date helpers.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day, keyed by its canonical `YYYY-MM-DD` string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        DayKey(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(DayKey)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Inclusive range of days between `self` and `other`, in either order.
    pub fn range_to(&self, other: DayKey) -> Vec<DayKey> {
        let (from, to) = if self <= &other {
            (self.0, other.0)
        } else {
            (other.0, self.0)
        };
        from.iter_days()
            .take_while(|d| *d <= to)
            .map(DayKey)
            .collect()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        DayKey(date)
    }
}

impl FromStr for DayKey {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DAY_KEY_FORMAT)
            .map(DayKey)
            .map_err(|_| PlannerError::InvalidDate(s.to_string()))
    }
}

impl TryFrom<String> for DayKey {
    type Error = PlannerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DayKey> for String {
    fn from(day: DayKey) -> Self {
        day.to_string()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

/// Every day of `month` in `year`. Empty for an invalid month.
pub fn month_days(year: i32, month: u32) -> Vec<DayKey> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(DayKey)
        .collect()
}

/// Every day of `year`.
pub fn year_days(year: i32) -> Vec<DayKey> {
    (1..=12).flat_map(|m| month_days(year, m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let day: DayKey = "2024-03-01".parse().unwrap();
        assert_eq!(day, DayKey::from_ymd(2024, 3, 1).unwrap());
        assert_eq!(day.to_string(), "2024-03-01");
        assert!("2024-13-01".parse::<DayKey>().is_err());
        assert!("March 1st".parse::<DayKey>().is_err());
    }

    #[test]
    fn test_weekend() {
        // 2024-03-02 was a Saturday
        assert!(DayKey::from_ymd(2024, 3, 2).unwrap().is_weekend());
        assert!(DayKey::from_ymd(2024, 3, 3).unwrap().is_weekend());
        assert!(!DayKey::from_ymd(2024, 3, 4).unwrap().is_weekend());
    }

    #[test]
    fn test_range_is_inclusive_and_order_independent() {
        let a = DayKey::from_ymd(2024, 2, 28).unwrap();
        let b = DayKey::from_ymd(2024, 3, 1).unwrap();
        let forward = a.range_to(b);
        assert_eq!(forward.len(), 3);
        assert_eq!(forward, b.range_to(a));
    }

    #[test]
    fn test_year_days() {
        assert_eq!(year_days(2024).len(), 366);
        assert_eq!(year_days(2025).len(), 365);
        assert_eq!(month_days(2025, 2).len(), 28);
        assert!(month_days(2025, 13).is_empty());
    }
}
