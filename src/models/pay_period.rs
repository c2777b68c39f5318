//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type identifying one monthly
//! payroll cycle.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A (year, month) pair identifying one payroll cycle.
///
/// Construct through [`PayPeriod::new`], which rejects months outside 1..=12.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(2024, 2).unwrap();
/// assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPayPeriod")]
pub struct PayPeriod {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPayPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPayPeriod> for PayPeriod {
    type Error = EngineError;

    fn try_from(raw: RawPayPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
    }
}

impl PayPeriod {
    /// Creates a pay period, failing with `InvalidPeriod` for a bad month.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    /// Returns the pay period that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        (28..=31)
            .rev()
            .find_map(|day| NaiveDate::from_ymd_opt(self.year, self.month, day))
            .unwrap_or_else(|| self.first_day())
    }

    /// The period immediately after this one.
    ///
    /// Fails with `InvalidPeriod` past the last month chrono can represent.
    pub fn next(&self) -> EngineResult<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Checks if a given date falls within this month (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
