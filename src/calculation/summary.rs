//! Monthly attendance aggregation.

use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, AttendanceStatus, MonthSummary};

/// Aggregates one month of attendance records into a [`MonthSummary`].
///
/// The caller passes only records for the month being summarized.
///
/// - `days_worked` counts `present` records
/// - `total_hours` and `overtime_hours` sum every record, treating unset
///   hours as zero
/// - `leave_days` counts sick, vacation, and personal leave records
/// - `absent_days` counts `absent` records
pub fn summarize_records<'a, I>(records: I) -> MonthSummary
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    records
        .into_iter()
        .fold(MonthSummary::default(), |mut summary, record| {
            match record.status {
                AttendanceStatus::Present => summary.days_worked += 1,
                AttendanceStatus::Absent => summary.absent_days += 1,
                status if status.is_leave() => summary.leave_days += 1,
                _ => {}
            }
            summary.total_hours += record.total_hours.unwrap_or(Decimal::ZERO);
            summary.overtime_hours += record.overtime_hours.unwrap_or(Decimal::ZERO);
            summary
        })
}
