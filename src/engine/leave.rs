//! Leave ledger.
//!
//! Maintains the leave type catalogue and moves leave requests through
//! their lifecycle:
//!
//! ```text
//! pending ──approve──> approved
//!    │ ────reject────> rejected
//!    └─────cancel────> cancelled
//! ```
//!
//! Only pending requests can move. Balances are informational and are not
//! enforced when a request is made.

use chrono::{Datelike, NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use super::PayrollEngine;
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    LeaveBalance, LeaveDecision, LeaveRequest, LeaveStatus, LeaveType, NewLeaveType,
};
use crate::store::Store;

impl<S: Store> PayrollEngine<S> {
    /// Adds a leave type to the catalogue.
    ///
    /// # Errors
    ///
    /// [`EngineError::AlreadyExists`] if the name is taken.
    pub fn register_leave_type(&self, new: NewLeaveType) -> EngineResult<LeaveType> {
        let leave_type = LeaveType {
            id: Uuid::new_v4(),
            name: new.name,
            max_days_per_year: new.max_days_per_year,
            is_paid: new.is_paid,
            requires_approval: new.requires_approval,
            description: new.description,
        };
        self.store.insert_leave_type(leave_type.clone())?;
        info!(
            leave_type_id = %leave_type.id,
            name = %leave_type.name,
            "Registered leave type"
        );
        Ok(leave_type)
    }

    /// Seeds the catalogue from configuration, skipping names already
    /// present. Returns the leave types that were added.
    pub fn install_leave_types(&self, loader: &ConfigLoader) -> EngineResult<Vec<LeaveType>> {
        let mut installed = Vec::new();
        for new in loader.leave_types() {
            if self.store.find_leave_type_by_name(&new.name)?.is_some() {
                continue;
            }
            installed.push(self.register_leave_type(new.clone())?);
        }
        Ok(installed)
    }

    /// Every leave type, ordered by name.
    pub fn leave_types(&self) -> EngineResult<Vec<LeaveType>> {
        let mut types = self.store.list_leave_types()?;
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    /// Files a pending leave request over an inclusive date range.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidRange`] if `end_date` is before `start_date`
    /// - [`EngineError::NotFound`] for an unknown employee or leave type
    pub fn request_leave(
        &self,
        employee_id: Uuid,
        leave_type_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: impl Into<String>,
    ) -> EngineResult<LeaveRequest> {
        if end_date < start_date {
            return Err(EngineError::InvalidRange {
                message: format!(
                    "end date {} is before start date {}",
                    end_date, start_date
                ),
            });
        }
        self.require_employee(employee_id)?;
        self.get_leave_type(leave_type_id)?;

        let now = Utc::now();
        let total_days = (end_date - start_date).num_days() as u32 + 1;
        let request = LeaveRequest {
            id: Uuid::new_v4(),
            employee_id,
            leave_type_id,
            start_date,
            end_date,
            total_days,
            reason: reason.into(),
            status: LeaveStatus::Pending,
            approved_by: None,
            approved_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_leave_request(request.clone())?;
        info!(
            employee_id = %employee_id,
            request_id = %request.id,
            total_days,
            "Leave requested"
        );
        Ok(request)
    }

    /// Approves or rejects a pending request.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the request does not exist
    /// - [`EngineError::NotPending`] if the request is not pending
    /// - [`EngineError::MissingReason`] if a rejection has no reason
    pub fn decide_leave(
        &self,
        request_id: Uuid,
        approver_id: Uuid,
        decision: LeaveDecision,
    ) -> EngineResult<LeaveRequest> {
        let mut request = self.pending_request(request_id)?;

        let now = Utc::now();
        match decision {
            LeaveDecision::Approve => {
                request.status = LeaveStatus::Approved;
            }
            LeaveDecision::Reject { reason } => {
                let reason = reason
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .ok_or(EngineError::MissingReason { request_id })?;
                request.status = LeaveStatus::Rejected;
                request.rejection_reason = Some(reason);
            }
        }
        request.approved_by = Some(approver_id);
        request.approved_at = Some(now);
        request.updated_at = now;

        self.store.update_leave_request(request.clone())?;
        info!(
            request_id = %request_id,
            approver_id = %approver_id,
            status = %request.status,
            "Leave decided"
        );
        Ok(request)
    }

    /// Withdraws a pending request.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the request does not exist
    /// - [`EngineError::NotPending`] if the request is not pending
    pub fn cancel_leave(&self, request_id: Uuid) -> EngineResult<LeaveRequest> {
        let mut request = self.pending_request(request_id)?;
        request.status = LeaveStatus::Cancelled;
        request.updated_at = Utc::now();

        self.store.update_leave_request(request.clone())?;
        info!(request_id = %request_id, "Leave cancelled");
        Ok(request)
    }

    /// How much of a leave type's yearly allowance an employee has used.
    ///
    /// `used` sums the days of approved requests that start in `year`.
    pub fn leave_balance(
        &self,
        employee_id: Uuid,
        leave_type_id: Uuid,
        year: i32,
    ) -> EngineResult<LeaveBalance> {
        self.require_employee(employee_id)?;
        let leave_type = self.get_leave_type(leave_type_id)?;

        let used: u32 = self
            .store
            .leave_requests_for(employee_id, leave_type_id)?
            .iter()
            .filter(|r| r.status == LeaveStatus::Approved && r.start_date.year() == year)
            .map(|r| r.total_days)
            .sum();

        Ok(LeaveBalance {
            allowance: leave_type.max_days_per_year,
            used,
            remaining: leave_type.max_days_per_year.saturating_sub(used),
        })
    }

    /// Fetches a leave type.
    pub fn get_leave_type(&self, leave_type_id: Uuid) -> EngineResult<LeaveType> {
        self.store
            .get_leave_type(leave_type_id)?
            .ok_or_else(|| EngineError::not_found("LeaveType", leave_type_id))
    }

    /// Fetches a leave request.
    pub fn get_leave_request(&self, request_id: Uuid) -> EngineResult<LeaveRequest> {
        self.store
            .get_leave_request(request_id)?
            .ok_or_else(|| EngineError::not_found("LeaveRequest", request_id))
    }

    fn pending_request(&self, request_id: Uuid) -> EngineResult<LeaveRequest> {
        let request = self.get_leave_request(request_id)?;
        if request.status.is_terminal() {
            warn!(
                request_id = %request_id,
                status = %request.status,
                "Leave request is not pending"
            );
            return Err(EngineError::NotPending {
                request_id,
                status: request.status.to_string(),
            });
        }
        Ok(request)
    }
}
