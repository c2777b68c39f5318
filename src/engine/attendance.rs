//! Attendance ledger.
//!
//! Records one attendance entry per employee per day, derives worked and
//! overtime hours from the clock timestamps, gates approval, and aggregates
//! a month of records for payroll.
//!
//! Hours are derived here, before the record reaches the store, every time
//! the clock or break timestamps are written.

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::PayrollEngine;
use crate::calculation::{split_daily_hours, summarize_records, worked_hours};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceUpdate, MonthSummary, NewAttendance, PayPeriod};
use crate::store::Store;

/// Worked and overtime hours for a record, both unset without a clock pair.
struct DerivedHours {
    total_hours: Option<Decimal>,
    overtime_hours: Option<Decimal>,
}

impl<S: Store> PayrollEngine<S> {
    fn derive_hours(
        &self,
        clock_in: Option<NaiveDateTime>,
        clock_out: Option<NaiveDateTime>,
        break_start: Option<NaiveDateTime>,
        break_end: Option<NaiveDateTime>,
    ) -> EngineResult<DerivedHours> {
        let (Some(clock_in), Some(clock_out)) = (clock_in, clock_out) else {
            return Ok(DerivedHours {
                total_hours: None,
                overtime_hours: None,
            });
        };

        let worked = worked_hours(clock_in, clock_out, break_start, break_end)?;
        let split = split_daily_hours(worked, self.config.standard_daily_hours);
        Ok(DerivedHours {
            total_hours: Some(worked),
            overtime_hours: Some(split.overtime_hours),
        })
    }

    /// Records a day of attendance.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the employee does not exist
    /// - [`EngineError::InvalidInterval`] if the clock or break timestamps do
    ///   not form a valid interval
    /// - [`EngineError::DuplicateRecord`] if the employee already has a record
    ///   for the date
    pub fn record_attendance(&self, new: NewAttendance) -> EngineResult<AttendanceRecord> {
        self.require_employee(new.employee_id)?;

        let hours = self.derive_hours(new.clock_in, new.clock_out, new.break_start, new.break_end)?;
        let now = Utc::now();
        let record = AttendanceRecord {
            id: Uuid::new_v4(),
            employee_id: new.employee_id,
            date: new.date,
            clock_in: new.clock_in,
            clock_out: new.clock_out,
            break_start: new.break_start,
            break_end: new.break_end,
            total_hours: hours.total_hours,
            overtime_hours: hours.overtime_hours,
            status: new.status,
            notes: new.notes.unwrap_or_default(),
            is_approved: false,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        };

        if let Err(err) = self.store.insert_attendance(record.clone()) {
            warn!(
                employee_id = %record.employee_id,
                date = %record.date,
                error = %err,
                "Attendance not recorded"
            );
            return Err(err);
        }

        info!(
            employee_id = %record.employee_id,
            record_id = %record.id,
            date = %record.date,
            status = record.status.as_str(),
            "Recorded attendance"
        );
        Ok(record)
    }

    /// Replaces the editable fields of an unapproved record and re-derives
    /// its hours.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the record does not exist
    /// - [`EngineError::AlreadyApproved`] if the record is approved
    /// - [`EngineError::InvalidInterval`] for invalid timestamps
    pub fn update_attendance(
        &self,
        record_id: Uuid,
        update: AttendanceUpdate,
    ) -> EngineResult<AttendanceRecord> {
        let mut record = self.get_attendance(record_id)?;
        if record.is_approved {
            warn!(record_id = %record_id, "Approved attendance cannot be edited");
            return Err(EngineError::AlreadyApproved { record_id });
        }

        let hours = self.derive_hours(
            update.clock_in,
            update.clock_out,
            update.break_start,
            update.break_end,
        )?;
        record.clock_in = update.clock_in;
        record.clock_out = update.clock_out;
        record.break_start = update.break_start;
        record.break_end = update.break_end;
        record.total_hours = hours.total_hours;
        record.overtime_hours = hours.overtime_hours;
        record.status = update.status;
        record.notes = update.notes;
        record.updated_at = Utc::now();

        self.store.update_attendance(record.clone())?;
        info!(
            record_id = %record.id,
            status = record.status.as_str(),
            "Updated attendance"
        );
        Ok(record)
    }

    /// Approves a record. Approval is irreversible.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the record does not exist
    /// - [`EngineError::AlreadyApproved`] if the record is already approved
    pub fn approve_attendance(
        &self,
        record_id: Uuid,
        approver_id: Uuid,
    ) -> EngineResult<AttendanceRecord> {
        let mut record = self.get_attendance(record_id)?;
        if record.is_approved {
            warn!(record_id = %record_id, "Attendance already approved");
            return Err(EngineError::AlreadyApproved { record_id });
        }

        let now = Utc::now();
        record.is_approved = true;
        record.approved_by = Some(approver_id);
        record.approved_at = Some(now);
        record.updated_at = now;

        self.store.update_attendance(record.clone())?;
        info!(
            record_id = %record.id,
            approver_id = %approver_id,
            "Approved attendance"
        );
        Ok(record)
    }

    /// Fetches an attendance record.
    pub fn get_attendance(&self, record_id: Uuid) -> EngineResult<AttendanceRecord> {
        self.store
            .get_attendance(record_id)?
            .ok_or_else(|| EngineError::not_found("AttendanceRecord", record_id))
    }

    /// An employee's records for a month, most recent day first.
    pub fn attendance_for_month(
        &self,
        employee_id: Uuid,
        period: PayPeriod,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        self.require_employee(employee_id)?;
        let mut records = self.month_records(employee_id, period)?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    /// Aggregates an employee's attendance for a month.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] if the employee does not exist.
    pub fn summarize_month(&self, employee_id: Uuid, period: PayPeriod) -> EngineResult<MonthSummary> {
        self.require_employee(employee_id)?;
        self.month_summary(employee_id, period)
    }

    pub(super) fn month_summary(
        &self,
        employee_id: Uuid,
        period: PayPeriod,
    ) -> EngineResult<MonthSummary> {
        let records = self.month_records(employee_id, period)?;
        let summary = summarize_records(&records);
        debug!(
            employee_id = %employee_id,
            period = %period,
            records = records.len(),
            days_worked = summary.days_worked,
            overtime_hours = %summary.overtime_hours,
            "Summarized month"
        );
        Ok(summary)
    }

    fn month_records(
        &self,
        employee_id: Uuid,
        period: PayPeriod,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        self.store
            .attendance_between(employee_id, period.first_day(), period.last_day())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{date, engine, hire};
    use super::*;
    use crate::models::AttendanceStatus;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(day: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        day.and_hms_opt(h, m, 0).unwrap()
    }

    fn clocked(employee_id: Uuid, day: NaiveDate, out_h: u32, out_m: u32) -> NewAttendance {
        NewAttendance {
            employee_id,
            date: day,
            clock_in: Some(at(day, 9, 0)),
            clock_out: Some(at(day, out_h, out_m)),
            break_start: Some(at(day, 12, 0)),
            break_end: Some(at(day, 12, 30)),
            status: AttendanceStatus::Present,
            notes: None,
        }
    }

    fn status_only(employee_id: Uuid, day: NaiveDate, status: AttendanceStatus) -> NewAttendance {
        NewAttendance {
            employee_id,
            date: day,
            status,
            ..Default::default()
        }
    }

    // ==========================================================================
    // Recording
    // ==========================================================================

    #[test]
    fn test_hours_derived_on_record() {
        let engine = engine();
        let employee = hire(&engine, "EMP-001");

        // 09:00-19:00 with a 30 minute break = 9.5 hours
        let record = engine
            .record_attendance(clocked(employee.id, date(2024, 3, 4), 19, 0))
            .unwrap();

        assert_eq!(record.total_hours, Some(dec("9.50")));
        assert_eq!(record.overtime_hours, Some(dec("1.50")));
        assert!(!record.is_approved);
        assert_eq!(record.notes, "");
    }

    #[test]
    fn test_hours_unset_without_clock_pair() {
        let engine = engine();
        let employee = hire(&engine, "EMP-001");
        let mut new = status_only(employee.id, date(2024, 3, 4), AttendanceStatus::Present);
        new.clock_in = Some(at(date(2024, 3, 4), 9, 0));

        let record = engine.record_attendance(new).unwrap();
        assert_eq!(record.total_hours, None);
        assert_eq!(record.overtime_hours, None);
    }

    #[test]
    fn test_duplicate_day_is_rejected() {
        let engine = engine();
        let employee = hire(&engine, "EMP-001");
        engine
            .record_attendance(clocked(employee.id, date(2024, 3, 4), 17, 30))
            .unwrap();

        let result = engine.record_attendance(clocked(employee.id, date(2024, 3, 4), 18, 0));
        assert!(matches!(result, Err(EngineError::DuplicateRecord { .. })));
    }

    #[test]
    fn test_invalid_clock_pair_is_rejected() {
        let engine = engine();
        let employee = hire(&engine, "EMP-001");
        let day = date(2024, 3, 4);
        let mut new = status_only(employee.id, day, AttendanceStatus::Present);
        new.clock_in = Some(at(day, 17, 0));
        new.clock_out = Some(at(day, 9, 0));

        let result = engine.record_attendance(new);
        assert!(matches!(result, Err(EngineError::InvalidInterval { .. })));
    }

    #[test]
    fn test_unknown_employee_is_rejected() {
        let engine = engine();
        let result = engine.record_attendance(clocked(Uuid::new_v4(), date(2024, 3, 4), 17, 0));
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_custom_standard_day() {
        let mut config = crate::config::EngineConfig::default();
        config.standard_daily_hours = dec("7.5");
        let engine = engine().with_config(config);
        let employee = hire(&engine, "EMP-001");

        // 8.5 worked hours against a 7.5 hour day
        let record = engine
            .record_attendance(clocked(employee.id, date(2024, 3, 4), 18, 0))
            .unwrap();
        assert_eq!(record.overtime_hours, Some(dec("1.00")));
    }

    // ==========================================================================
    // Update and approval
    // ==========================================================================

    #[test]
    fn test_update_rederives_hours() {
        let engine = engine();
        let employee = hire(&engine, "EMP-001");
        let day = date(2024, 3, 4);
        let record = engine
            .record_attendance(clocked(employee.id, day, 17, 30))
            .unwrap();
        assert_eq!(record.overtime_hours, Some(Decimal::ZERO));

        let updated = engine
            .update_attendance(
                record.id,
                AttendanceUpdate {
                    clock_in: record.clock_in,
                    clock_out: Some(at(day, 20, 0)),
                    break_start: record.break_start,
                    break_end: record.break_end,
                    status: AttendanceStatus::Present,
                    notes: "stayed late".to_string(),
                },
            )
            .unwrap();

        assert_eq!(updated.id, record.id);
        assert_eq!(updated.total_hours, Some(dec("10.50")));
        assert_eq!(updated.overtime_hours, Some(dec("2.50")));
        assert_eq!(updated.created_at, record.created_at);
        assert_eq!(engine.get_attendance(record.id).unwrap(), updated);
    }

    #[test]
    fn test_update_clearing_clock_out_unsets_hours() {
        let engine = engine();
        let employee = hire(&engine, "EMP-001");
        let record = engine
            .record_attendance(clocked(employee.id, date(2024, 3, 4), 17, 30))
            .unwrap();

        let updated = engine
            .update_attendance(
                record.id,
                AttendanceUpdate {
                    clock_in: record.clock_in,
                    status: AttendanceStatus::EarlyLeave,
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.total_hours, None);
        assert_eq!(updated.overtime_hours, None);
    }

    #[test]
    fn test_approve_once() {
        let engine = engine();
        let employee = hire(&engine, "EMP-001");
        let manager = hire(&engine, "MGR-001");
        let record = engine
            .record_attendance(clocked(employee.id, date(2024, 3, 4), 17, 30))
            .unwrap();

        let approved = engine.approve_attendance(record.id, manager.id).unwrap();
        assert!(approved.is_approved);
        assert_eq!(approved.approved_by, Some(manager.id));
        assert!(approved.approved_at.is_some());

        match engine.approve_attendance(record.id, manager.id) {
            Err(EngineError::AlreadyApproved { record_id }) => assert_eq!(record_id, record.id),
            _ => panic!("Expected AlreadyApproved error"),
        }
    }

    #[test]
    fn test_approved_record_is_frozen() {
        let engine = engine();
        let employee = hire(&engine, "EMP-001");
        let record = engine
            .record_attendance(clocked(employee.id, date(2024, 3, 4), 17, 30))
            .unwrap();
        engine.approve_attendance(record.id, Uuid::new_v4()).unwrap();

        let result = engine.update_attendance(
            record.id,
            AttendanceUpdate {
                status: AttendanceStatus::Absent,
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(EngineError::AlreadyApproved { .. })));
    }

    #[test]
    fn test_approve_unknown_record() {
        let engine = engine();
        let result = engine.approve_attendance(Uuid::new_v4(), Uuid::new_v4());
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    // ==========================================================================
    // Month queries
    // ==========================================================================

    #[test]
    fn test_summarize_month_only_counts_the_month() {
        let engine = engine();
        let employee = hire(&engine, "EMP-001");
        engine
            .record_attendance(clocked(employee.id, date(2024, 2, 29), 19, 0))
            .unwrap();
        engine
            .record_attendance(clocked(employee.id, date(2024, 3, 1), 19, 0))
            .unwrap();
        engine
            .record_attendance(clocked(employee.id, date(2024, 3, 4), 17, 30))
            .unwrap();
        engine
            .record_attendance(status_only(employee.id, date(2024, 3, 5), AttendanceStatus::SickLeave))
            .unwrap();
        engine
            .record_attendance(status_only(employee.id, date(2024, 3, 6), AttendanceStatus::Absent))
            .unwrap();

        let summary = engine
            .summarize_month(employee.id, PayPeriod::new(2024, 3).unwrap())
            .unwrap();

        assert_eq!(summary.days_worked, 2);
        assert_eq!(summary.total_hours, dec("17.50"));
        assert_eq!(summary.overtime_hours, dec("1.50"));
        assert_eq!(summary.leave_days, 1);
        assert_eq!(summary.absent_days, 1);
    }

    #[test]
    fn test_attendance_for_month_newest_first() {
        let engine = engine();
        let employee = hire(&engine, "EMP-001");
        for day in [4, 12, 7] {
            engine
                .record_attendance(clocked(employee.id, date(2024, 3, day), 17, 30))
                .unwrap();
        }
        engine
            .record_attendance(clocked(employee.id, date(2024, 4, 1), 17, 30))
            .unwrap();

        let records = engine
            .attendance_for_month(employee.id, PayPeriod::new(2024, 3).unwrap())
            .unwrap();
        let days: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(days, vec![date(2024, 3, 12), date(2024, 3, 7), date(2024, 3, 4)]);
    }
}
