//! Shared traits and the year-month key used to bucket events.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Month, NaiveDate};
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities held in the event store.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    /// Magnitude as recorded; always positive for valid entities.
    fn amount(&self) -> f64;

    /// Amount with its direction applied (income positive, expense negative).
    fn signed_amount(&self) -> f64;
}

/// Calendar month used as the grouping and sort key for balance summaries.
///
/// Ordering is chronological: `year` is compared before `month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Truncates a date to its year-month.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// English month name, e.g. `January`.
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|value| Month::try_from(value).ok())
            .map(|month| month.name())
            .unwrap_or("Unknown")
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        MonthKey::from_date(date)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (year, month) = value
            .trim()
            .split_once('-')
            .ok_or_else(|| MonthKeyError::Malformed(value.to_string()))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| MonthKeyError::Malformed(value.to_string()))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| MonthKeyError::Malformed(value.to_string()))?;
        MonthKey::new(year, month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors that can occur when constructing [`MonthKey`] values.
pub enum MonthKeyError {
    InvalidMonth(u32),
    Malformed(String),
}

impl fmt::Display for MonthKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthKeyError::InvalidMonth(month) => {
                write!(f, "month must be between 1 and 12, got {month}")
            }
            MonthKeyError::Malformed(raw) => write!(f, "expected YYYY-MM, got `{raw}`"),
        }
    }
}

impl std::error::Error for MonthKeyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_keys_order_chronologically() {
        let dec = MonthKey::new(2024, 12).unwrap();
        let jan = MonthKey::new(2025, 1).unwrap();
        let feb = MonthKey::new(2025, 2).unwrap();
        let mut keys = vec![feb, dec, jan];
        keys.sort();
        assert_eq!(keys, vec![dec, jan, feb]);
    }

    #[test]
    fn month_key_renders_and_parses_padded_form() {
        let key = MonthKey::from_date(NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
        assert_eq!(key.to_string(), "2025-03");
        assert_eq!("2025-03".parse::<MonthKey>().unwrap(), key);
        assert_eq!(key.month_name(), "March");
    }

    #[test]
    fn month_key_rejects_out_of_range_month() {
        assert_eq!(
            "2025-13".parse::<MonthKey>(),
            Err(MonthKeyError::InvalidMonth(13))
        );
        assert!(matches!(
            "202501".parse::<MonthKey>(),
            Err(MonthKeyError::Malformed(_))
        ));
    }

    #[test]
    fn month_key_serializes_as_string() {
        let key = MonthKey::new(2025, 1).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2025-01\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
