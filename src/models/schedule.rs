//! Work schedule model.

use chrono::{NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::round_half_up;

/// Expected working hours for one employee on one weekday, valid over
/// `[effective_from, effective_to)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSchedule {
    /// Unique identifier for the schedule.
    pub id: Uuid,
    /// The employee the schedule belongs to.
    pub employee_id: Uuid,
    /// The weekday the schedule applies to.
    pub day_of_week: Weekday,
    /// Expected start of the working day.
    pub start_time: NaiveTime,
    /// Expected end of the working day.
    pub end_time: NaiveTime,
    /// Unpaid break length in minutes.
    pub break_minutes: u32,
    /// False for scheduled days off.
    pub is_working_day: bool,
    /// First date the schedule applies (inclusive).
    pub effective_from: NaiveDate,
    /// Date the schedule stops applying (exclusive), if bounded.
    pub effective_to: Option<NaiveDate>,
}

/// Input for assigning a work schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkSchedule {
    /// The employee the schedule belongs to.
    pub employee_id: Uuid,
    /// The weekday the schedule applies to.
    pub day_of_week: Weekday,
    /// Expected start of the working day.
    pub start_time: NaiveTime,
    /// Expected end of the working day.
    pub end_time: NaiveTime,
    /// Unpaid break length in minutes.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    /// False for scheduled days off.
    #[serde(default = "default_working_day")]
    pub is_working_day: bool,
    /// First date the schedule applies (inclusive).
    pub effective_from: NaiveDate,
    /// Date the schedule stops applying (exclusive), if bounded.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
}

fn default_break_minutes() -> u32 {
    60
}

fn default_working_day() -> bool {
    true
}

impl WorkSchedule {
    /// Scheduled hours for the day: span minus break, zero on days off.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::WorkSchedule;
    /// use chrono::{NaiveDate, NaiveTime, Weekday};
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let schedule = WorkSchedule {
    ///     id: Uuid::new_v4(),
    ///     employee_id: Uuid::new_v4(),
    ///     day_of_week: Weekday::Mon,
    ///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
    ///     break_minutes: 30,
    ///     is_working_day: true,
    ///     effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///     effective_to: None,
    /// };
    /// assert_eq!(schedule.scheduled_hours(), Decimal::new(8, 0));
    /// ```
    pub fn scheduled_hours(&self) -> Decimal {
        if !self.is_working_day {
            return Decimal::ZERO;
        }
        let span = (self.end_time - self.start_time).num_minutes();
        let worked = (span - i64::from(self.break_minutes)).max(0);
        round_half_up(Decimal::from(worked) / Decimal::from(60))
    }

    /// Whether the schedule's effective range contains `date`.
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        date >= self.effective_from && self.effective_to.is_none_or(|end| date < end)
    }

    /// Whether two half-open effective ranges share at least one day.
    pub fn overlaps(&self, from: NaiveDate, to: Option<NaiveDate>) -> bool {
        let starts_before_other_ends = to.is_none_or(|end| self.effective_from < end);
        let other_starts_before_self_ends = self.effective_to.is_none_or(|end| from < end);
        starts_before_other_ends && other_starts_before_self_ends
    }
}
