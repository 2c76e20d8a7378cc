//! Calendar month keys.
//!
//! Period records are keyed by a strict `YYYY-MM` string. Because the format
//! is fixed-width and zero-padded, lexicographic ordering of keys is the same
//! as chronological ordering, which the ADW window relies on.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A validated calendar month in `YYYY-MM` form.
///
/// # Example
///
/// ```
/// use payroll_engine::models::MonthKey;
///
/// let june: MonthKey = "2025-06".parse().unwrap();
/// assert_eq!(june.year(), 2025);
/// assert_eq!(june.month(), 6);
/// assert_eq!(june.days_in_month(), 30);
/// assert!("2025-6".parse::<MonthKey>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    /// Parses a strict `YYYY-MM` key.
    pub fn parse(value: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidMonth {
            value: value.to_string(),
        };

        let bytes = value.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        if !bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || b.is_ascii_digit())
        {
            return Err(invalid());
        }

        NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").map_err(|_| invalid())?;

        Ok(Self(value.to_string()))
    }

    /// Builds a key from a year and a 1-based month.
    pub fn from_year_month(year: i32, month: u32) -> EngineResult<Self> {
        Self::parse(&format!("{year:04}-{month:02}"))
    }

    /// Builds a key from parts known to be in range; the month is clamped to 1-12.
    pub(crate) fn from_parts(year: i32, month: u32) -> Self {
        Self(format!("{:04}-{:02}", year.clamp(0, 9999), month.clamp(1, 12)))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day().year()
    }

    /// The 1-based calendar month.
    pub fn month(&self) -> u32 {
        self.first_day().month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Validated at construction.
        NaiveDate::parse_from_str(&format!("{}-01", self.0), "%Y-%m-%d")
            .unwrap_or(NaiveDate::MIN)
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    /// Number of calendar days in the month.
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// The following month.
    pub fn next(&self) -> Self {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        Self::from_parts(year, month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MonthKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.0
    }
}
