//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod audit;
mod bonus;
mod employee;
mod leave;
mod organization;
mod pay_period;
mod payroll;
mod salary_structure;
mod schedule;

pub use attendance::{AttendanceRecord, AttendanceStatus, AttendanceUpdate, NewAttendance};
pub use audit::{AuditStep, AuditTrace, AuditWarning, WarningSeverity};
pub use bonus::{Bonus, BonusType, NewBonus};
pub use employee::{Employee, EmploymentStatus, EmploymentType, NewEmployee};
pub use leave::{LeaveBalance, LeaveDecision, LeaveRequest, LeaveStatus, LeaveType, NewLeaveType};
pub use organization::{Department, NewDepartment, NewPosition, Position};
pub use pay_period::PayPeriod;
pub use payroll::{MonthSummary, Payroll, PayrollBreakdown};
pub use salary_structure::{
    DEFAULT_HOLIDAY_RATE_MULTIPLIER, DEFAULT_OVERTIME_RATE_MULTIPLIER, NewSalaryStructure,
    SalaryStructure,
};
pub use schedule::{NewWorkSchedule, WorkSchedule};
