//! Month axis primitives.
//!
//! Records are keyed by calendar month (`"YYYY-MM"` strings in the persisted
//! JSON). `Month` makes that key a real ordered type with calendar
//! arithmetic, `MonthRange` is the display filter, and `MonthIndex` answers
//! "most recent month at or before" lookups over sorted data.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{Error, Result, ValidationError};

/// A calendar month, ordered chronologically.
///
/// The derived ordering on `(year, month)` agrees with lexicographic order
/// of the zero-padded `"YYYY-MM"` string, so data sorted either way lines up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month, rejecting values that cannot round-trip through the
    /// `"YYYY-MM"` key format.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(Error::Validation(ValidationError::InvalidMonth(format!(
                "{}-{}",
                year, month
            ))));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The previous calendar month.
    pub fn pred(self) -> Month {
        if self.month == 1 {
            Month {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Month {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The next calendar month.
    pub fn succ(self) -> Month {
        if self.month == 12 {
            Month {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Month {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Whole months elapsed since `earlier`; negative when `earlier` is
    /// actually later.
    pub fn months_since(self, earlier: Month) -> i32 {
        (self.year - earlier.year) * 12 + self.month as i32 - earlier.month as i32
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Parse by appending a day so chrono validates the year and month.
        let date = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")?;
        Month::new(date.year(), date.month())
    }
}

impl Serialize for Month {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive month window used to trim what the charts render.
///
/// A range restricts the month axis after everything has been computed from
/// the full history. It is never an input to an engine. Persisted as the
/// frontend's `{startMonth, endMonth}` pair, open ends as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthRange {
    #[serde(default, rename = "startMonth")]
    pub start: Option<Month>,
    #[serde(default, rename = "endMonth")]
    pub end: Option<Month>,
}

impl MonthRange {
    pub fn new(start: Option<Month>, end: Option<Month>) -> Self {
        Self { start, end }
    }

    /// Whether `month` falls inside the window. Open ends match everything.
    pub fn contains(&self, month: Month) -> bool {
        self.start.map_or(true, |start| month >= start)
            && self.end.map_or(true, |end| month <= end)
    }
}

/// Sorted, deduplicated month axis extracted from a record set.
///
/// Backward lookups are binary searches, so a search crosses gaps of any
/// length without walking month by month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthIndex {
    months: Vec<Month>,
}

impl MonthIndex {
    /// The most recent indexed month at or before `month`, if any.
    pub fn latest_at_or_before(&self, month: Month) -> Option<Month> {
        match self.months.binary_search(&month) {
            Ok(i) => Some(self.months[i]),
            Err(0) => None,
            Err(i) => Some(self.months[i - 1]),
        }
    }

    /// The most recent indexed month strictly before `month`, if any.
    pub fn latest_before(&self, month: Month) -> Option<Month> {
        match self.months.binary_search(&month) {
            Ok(0) | Err(0) => None,
            Ok(i) | Err(i) => Some(self.months[i - 1]),
        }
    }

    /// The indexed months in ascending order.
    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

impl FromIterator<Month> for MonthIndex {
    fn from_iter<I: IntoIterator<Item = Month>>(iter: I) -> Self {
        let mut months: Vec<Month> = iter.into_iter().collect();
        months.sort_unstable();
        months.dedup();
        Self { months }
    }
}
