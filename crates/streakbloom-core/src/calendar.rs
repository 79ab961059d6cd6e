//! Local calendar-day arithmetic and ISO week keys.
//!
//! Everything here works on `NaiveDate`: wall-clock days with no time of day
//! and no timezone. Callers convert "now" to a local date once, at the edge.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string into a calendar day.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] if the string is not a real date.
pub fn parse_day(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DAY_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Format a calendar day as `YYYY-MM-DD`.
pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Whole days from `from` to `to`. Negative when `to` is earlier.
pub fn day_gap(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// ISO-8601 week identifier, rendered as `YYYY-Www`.
///
/// The year is the ISO week-numbering year, which differs from the calendar
/// year for a few days around Dec 29 - Jan 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    year: i32,
    week: u32,
}

impl WeekKey {
    /// Week key of the Monday-started week containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u32 {
        self.week
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, week) = s
            .split_once("-W")
            .ok_or_else(|| format!("invalid week key: {s}"))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid week key year: {s}"))?;
        let week: u32 = week
            .parse()
            .map_err(|_| format!("invalid week key number: {s}"))?;

        // Reject keys naming a week the year does not have (e.g. W53 in a 52-week year).
        let exists = NaiveDate::from_isoywd_opt(year, week, chrono::Weekday::Mon).is_some();
        if !exists {
            return Err(format!("week key out of range: {s}"));
        }
        Ok(Self { year, week })
    }
}

impl Serialize for WeekKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Convenience wrapper returning the rendered key for `date`.
pub fn iso_week_key(date: NaiveDate) -> String {
    WeekKey::of(date).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reference_week_keys() {
        assert_eq!(iso_week_key(day(2024, 1, 1)), "2024-W01");
        assert_eq!(iso_week_key(day(2020, 12, 31)), "2020-W53");
        assert_eq!(iso_week_key(day(2021, 1, 1)), "2020-W53");
    }

    #[test]
    fn test_year_boundary_belongs_to_next_year() {
        // Monday 2024-12-30 starts 2025-W01.
        assert_eq!(iso_week_key(day(2024, 12, 30)), "2025-W01");
        assert_eq!(iso_week_key(day(2024, 12, 29)), "2024-W52");
    }

    #[test]
    fn test_week_changes_on_monday() {
        let sunday = day(2024, 3, 10);
        let monday = day(2024, 3, 11);
        assert_ne!(WeekKey::of(sunday), WeekKey::of(monday));
        assert_eq!(WeekKey::of(monday), WeekKey::of(day(2024, 3, 17)));
    }

    #[test]
    fn test_week_key_parse_and_serde() {
        let key: WeekKey = "2020-W53".parse().unwrap();
        assert_eq!(key, WeekKey::of(day(2021, 1, 1)));
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2020-W53\"");

        let back: WeekKey = serde_json::from_str("\"2024-W01\"").unwrap();
        assert_eq!(back.year(), 2024);
        assert_eq!(back.week(), 1);
    }

    #[test]
    fn test_week_key_rejects_garbage() {
        assert!("2024-01".parse::<WeekKey>().is_err());
        assert!("abcd-W01".parse::<WeekKey>().is_err());
        assert!("2021-W53".parse::<WeekKey>().is_err());
        assert!("2024-W00".parse::<WeekKey>().is_err());
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(parse_day("2024-02-29").unwrap(), day(2024, 2, 29));
        assert_eq!(parse_day(" 2024-03-01 ").unwrap(), day(2024, 3, 1));
        assert_eq!(
            parse_day("2023-02-29"),
            Err(ValidationError::InvalidDate("2023-02-29".into()))
        );
        assert!(parse_day("yesterday").is_err());
    }

    #[test]
    fn test_format_and_gap() {
        assert_eq!(format_day(day(2024, 1, 5)), "2024-01-05");
        assert_eq!(day_gap(day(2024, 2, 28), day(2024, 3, 1)), 2);
        assert_eq!(day_gap(day(2024, 3, 1), day(2024, 3, 1)), 0);
        assert_eq!(day_gap(day(2024, 3, 2), day(2024, 3, 1)), -1);
    }
}
