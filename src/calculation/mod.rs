//! Calculation logic for the payroll engine.
//!
//! This module contains the pure functions behind payroll: worked and
//! overtime hours from clock events, month-length lookup, monthly attendance
//! aggregation, salary structure selection, and the payroll formula itself.
//! Nothing here touches storage.

mod calendar;
mod payroll_formula;
mod salary_resolver;
mod summary;
mod time_arithmetic;

pub use calendar::{Calendar, FixedMonthCalendar, GregorianCalendar};
pub use payroll_formula::{
    PayrollComputation, WARNING_NEGATIVE_NET, WARNING_NO_HOURLY_RATE, compute_payroll,
};
pub use salary_resolver::select_structure;
pub use summary::summarize_records;
pub use time_arithmetic::{
    DEFAULT_STANDARD_DAILY_HOURS, DailyHoursSplit, overtime_hours, round_half_up,
    split_daily_hours, worked_hours,
};
