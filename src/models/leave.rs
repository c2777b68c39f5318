//! Leave type and leave request models.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A category of leave with its yearly allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveType {
    /// Unique identifier for the leave type.
    pub id: Uuid,
    /// Unique name (e.g., "Sick", "Vacation").
    pub name: String,
    /// Days an employee may take per calendar year.
    pub max_days_per_year: u32,
    /// Whether the leave is paid.
    pub is_paid: bool,
    /// Whether requests need a manager decision.
    pub requires_approval: bool,
    /// Free-form description.
    pub description: String,
}

/// Input for registering a leave type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLeaveType {
    /// Unique name.
    pub name: String,
    /// Days an employee may take per calendar year.
    pub max_days_per_year: u32,
    /// Whether the leave is paid.
    #[serde(default = "default_true")]
    pub is_paid: bool,
    /// Whether requests need a manager decision.
    #[serde(default = "default_true")]
    pub requires_approval: bool,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

fn default_true() -> bool {
    true
}

/// Where a leave request is in its lifecycle.
///
/// `Pending` is the only state that can transition; the rest are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Granted.
    Approved,
    /// Refused, with a reason.
    Rejected,
    /// Withdrawn by the employee before a decision.
    Cancelled,
}

impl LeaveStatus {
    /// Returns true if no further transition is allowed.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A decision on a pending leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum LeaveDecision {
    /// Grant the request.
    Approve,
    /// Refuse the request; the reason must not be blank.
    Reject {
        /// Why the request was refused.
        reason: Option<String>,
    },
}

/// A request for leave over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The employee requesting leave.
    pub employee_id: Uuid,
    /// The category of leave.
    pub leave_type_id: Uuid,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Calendar days covered, `end_date - start_date + 1`.
    pub total_days: u32,
    /// Why leave is requested.
    pub reason: String,
    /// Current lifecycle state.
    pub status: LeaveStatus,
    /// Who approved or rejected the request.
    pub approved_by: Option<Uuid>,
    /// When the request was decided.
    pub approved_at: Option<DateTime<Utc>>,
    /// Why the request was rejected.
    pub rejection_reason: Option<String>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request last changed.
    pub updated_at: DateTime<Utc>,
}

/// How much of a leave type's yearly allowance is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Days allowed per year.
    pub allowance: u32,
    /// Days taken by approved requests starting in the year.
    pub used: u32,
    /// Days still available, never below zero.
    pub remaining: u32,
}
