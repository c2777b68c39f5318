//! Attendance record model and related types.
//!
//! One [`AttendanceRecord`] exists per employee per calendar day. Worked and
//! overtime hours are derived from the clock timestamps by the attendance
//! ledger before the record is stored.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The outcome recorded for an employee's day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Worked a normal day.
    #[default]
    Present,
    /// Did not attend.
    Absent,
    /// Arrived late.
    Late,
    /// Left before the end of the day.
    EarlyLeave,
    /// Worked part of the day.
    HalfDay,
    /// Public or company holiday.
    Holiday,
    /// Sick leave.
    SickLeave,
    /// Vacation leave.
    Vacation,
    /// Personal leave.
    PersonalLeave,
}

impl AttendanceStatus {
    /// Returns true for the statuses that count as leave days.
    pub fn is_leave(&self) -> bool {
        matches!(
            self,
            AttendanceStatus::SickLeave | AttendanceStatus::Vacation | AttendanceStatus::PersonalLeave
        )
    }

    /// The stable snake_case name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::EarlyLeave => "early_leave",
            AttendanceStatus::HalfDay => "half_day",
            AttendanceStatus::Holiday => "holiday",
            AttendanceStatus::SickLeave => "sick_leave",
            AttendanceStatus::Vacation => "vacation",
            AttendanceStatus::PersonalLeave => "personal_leave",
        }
    }
}

/// A single employee-day of attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee the record belongs to.
    pub employee_id: Uuid,
    /// The calendar day being recorded.
    pub date: NaiveDate,
    /// When the employee clocked in.
    pub clock_in: Option<NaiveDateTime>,
    /// When the employee clocked out.
    pub clock_out: Option<NaiveDateTime>,
    /// When the break started.
    pub break_start: Option<NaiveDateTime>,
    /// When the break ended.
    pub break_end: Option<NaiveDateTime>,
    /// Worked hours, set when both clock timestamps are present.
    pub total_hours: Option<Decimal>,
    /// Hours beyond the standard day, set alongside `total_hours`.
    pub overtime_hours: Option<Decimal>,
    /// The day's status.
    pub status: AttendanceStatus,
    /// Free-form notes.
    pub notes: String,
    /// Whether a manager approved the record.
    pub is_approved: bool,
    /// Who approved the record.
    pub approved_by: Option<Uuid>,
    /// When the record was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last changed.
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Returns true if both clock timestamps are present.
    pub fn has_clock_pair(&self) -> bool {
        self.clock_in.is_some() && self.clock_out.is_some()
    }
}

/// Input for recording a day of attendance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttendance {
    /// The employee the record belongs to.
    pub employee_id: Uuid,
    /// The calendar day being recorded.
    pub date: NaiveDate,
    /// When the employee clocked in.
    #[serde(default)]
    pub clock_in: Option<NaiveDateTime>,
    /// When the employee clocked out.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
    /// When the break started.
    #[serde(default)]
    pub break_start: Option<NaiveDateTime>,
    /// When the break ended.
    #[serde(default)]
    pub break_end: Option<NaiveDateTime>,
    /// The day's status.
    #[serde(default)]
    pub status: AttendanceStatus,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Replacement values for an existing attendance record.
///
/// Every field replaces the stored value; callers fetch the record first and
/// send back what should be kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    /// When the employee clocked in.
    #[serde(default)]
    pub clock_in: Option<NaiveDateTime>,
    /// When the employee clocked out.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
    /// When the break started.
    #[serde(default)]
    pub break_start: Option<NaiveDateTime>,
    /// When the break ended.
    #[serde(default)]
    pub break_end: Option<NaiveDateTime>,
    /// The day's status.
    pub status: AttendanceStatus,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}
