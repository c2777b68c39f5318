//! Calendar lookups used by the payroll formula.
//!
//! The number of days in a month is supplied through the [`Calendar`] trait
//! so tests can pin it and callers can swap in a different calendar.

use chrono::Datelike;

use crate::error::EngineResult;
use crate::models::PayPeriod;

/// Source of calendar facts for payroll.
pub trait Calendar: Send + Sync {
    /// Number of calendar days in the period's month.
    fn days_in_month(&self, period: PayPeriod) -> EngineResult<u32>;
}

/// The proleptic Gregorian calendar.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{Calendar, GregorianCalendar};
/// use payroll_engine::models::PayPeriod;
///
/// let calendar = GregorianCalendar;
/// assert_eq!(calendar.days_in_month(PayPeriod::new(2024, 2).unwrap()).unwrap(), 29);
/// assert_eq!(calendar.days_in_month(PayPeriod::new(2023, 2).unwrap()).unwrap(), 28);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GregorianCalendar;

impl Calendar for GregorianCalendar {
    fn days_in_month(&self, period: PayPeriod) -> EngineResult<u32> {
        Ok(period.last_day().day())
    }
}

/// A calendar where every month has the same length.
#[derive(Debug, Clone, Copy)]
pub struct FixedMonthCalendar {
    days: u32,
}

impl FixedMonthCalendar {
    /// Creates a calendar whose months all have `days` days.
    pub fn new(days: u32) -> Self {
        Self { days }
    }
}

impl Calendar for FixedMonthCalendar {
    fn days_in_month(&self, _period: PayPeriod) -> EngineResult<u32> {
        Ok(self.days)
    }
}
