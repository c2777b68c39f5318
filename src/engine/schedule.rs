//! Work schedules.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::PayrollEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{NewWorkSchedule, WorkSchedule};
use crate::store::Store;

impl<S: Store> PayrollEngine<S> {
    /// Assigns a weekday schedule to an employee.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the employee does not exist
    /// - [`EngineError::InvalidRange`] if the effective range is empty, or the
    ///   end time is not after the start time on a working day
    /// - [`EngineError::DuplicateRecord`] if the range overlaps another
    ///   schedule for the same weekday
    pub fn assign_schedule(&self, new: NewWorkSchedule) -> EngineResult<WorkSchedule> {
        self.require_employee(new.employee_id)?;

        if let Some(end) = new.effective_to {
            if end <= new.effective_from {
                return Err(EngineError::InvalidRange {
                    message: format!(
                        "schedule ends {} on or before it starts {}",
                        end, new.effective_from
                    ),
                });
            }
        }
        if new.is_working_day && new.end_time <= new.start_time {
            return Err(EngineError::InvalidRange {
                message: format!(
                    "end time {} is not after start time {}",
                    new.end_time, new.start_time
                ),
            });
        }

        let schedule = WorkSchedule {
            id: Uuid::new_v4(),
            employee_id: new.employee_id,
            day_of_week: new.day_of_week,
            start_time: new.start_time,
            end_time: new.end_time,
            break_minutes: new.break_minutes,
            is_working_day: new.is_working_day,
            effective_from: new.effective_from,
            effective_to: new.effective_to,
        };
        if let Err(e) = self.store.insert_schedule(schedule.clone()) {
            warn!(
                employee_id = %schedule.employee_id,
                day_of_week = ?schedule.day_of_week,
                error = %e,
                "Schedule rejected"
            );
            return Err(e);
        }
        info!(
            employee_id = %schedule.employee_id,
            schedule_id = %schedule.id,
            day_of_week = ?schedule.day_of_week,
            "Assigned work schedule"
        );
        Ok(schedule)
    }

    /// Hours the employee is scheduled to work on `date`.
    ///
    /// Returns `None` when no schedule covers that weekday on that date, and
    /// zero for a scheduled day off.
    pub fn scheduled_hours(&self, employee_id: Uuid, date: NaiveDate) -> EngineResult<Option<Decimal>> {
        self.require_employee(employee_id)?;
        let weekday = date.weekday();
        Ok(self
            .store
            .schedules_for_employee(employee_id)?
            .iter()
            .find(|s| s.day_of_week == weekday && s.is_effective_on(date))
            .map(WorkSchedule::scheduled_hours))
    }
}
