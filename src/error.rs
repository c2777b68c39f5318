//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every precondition failure an engine operation can report.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the payroll engine.
///
/// Every failure is a local validation or precondition failure surfaced
/// synchronously to the caller. Nothing is retried internally.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidRange {
///     message: "end date 2024-03-01 is before start date 2024-03-05".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid range: end date 2024-03-01 is before start date 2024-03-05"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record that was looked up.
        entity: String,
        /// The identifier that was not found.
        id: String,
    },

    /// A record already exists where only one is allowed.
    #[error("Duplicate {entity}: {message}")]
    DuplicateRecord {
        /// The kind of record that was duplicated.
        entity: String,
        /// What collided.
        message: String,
    },

    /// Clock or break timestamps do not form a valid interval.
    #[error("Invalid interval: {message}")]
    InvalidInterval {
        /// A description of what made the interval invalid.
        message: String,
    },

    /// A date range is empty or inverted.
    #[error("Invalid range: {message}")]
    InvalidRange {
        /// A description of what made the range invalid.
        message: String,
    },

    /// The (year, month) pair does not name a calendar month.
    #[error("Invalid pay period {year}-{month:02}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// No salary structure is effective for the employee on the date.
    #[error("No active salary structure for employee {employee_id} on {date}")]
    NoActiveStructure {
        /// The employee whose structure was resolved.
        employee_id: Uuid,
        /// The date the structure had to cover.
        date: NaiveDate,
    },

    /// The attendance record has already been approved.
    #[error("Attendance record {record_id} is already approved")]
    AlreadyApproved {
        /// The approved record.
        record_id: Uuid,
    },

    /// The leave request is no longer pending.
    #[error("Leave request {request_id} is not pending (status: {status})")]
    NotPending {
        /// The leave request.
        request_id: Uuid,
        /// Its current status.
        status: String,
    },

    /// A rejection was submitted without a reason.
    #[error("Rejecting leave request {request_id} requires a reason")]
    MissingReason {
        /// The leave request.
        request_id: Uuid,
    },

    /// The payroll has been processed and can no longer change.
    #[error("Payroll {payroll_id} is already processed")]
    AlreadyProcessed {
        /// The processed payroll.
        payroll_id: Uuid,
    },

    /// A uniquely keyed record already exists.
    #[error("{entity} already exists: {message}")]
    AlreadyExists {
        /// The kind of record.
        entity: String,
        /// The key that collided.
        message: String,
    },

    /// A bonus can only be linked to a processed payroll.
    #[error("Payroll {payroll_id} is not processed")]
    PayrollNotProcessed {
        /// The unprocessed payroll.
        payroll_id: Uuid,
    },

    /// The bonus and the payroll belong to different employees.
    #[error("Bonus {bonus_id} belongs to another employee than payroll {payroll_id}")]
    EmployeeMismatch {
        /// The bonus being linked.
        bonus_id: Uuid,
        /// The payroll it was linked to.
        payroll_id: Uuid,
    },

    /// The bonus is already attached to a payroll.
    #[error("Bonus {bonus_id} is already linked to payroll {payroll_id}")]
    BonusAlreadyLinked {
        /// The linked bonus.
        bonus_id: Uuid,
        /// The payroll it is attached to.
        payroll_id: Uuid,
    },

    /// The position does not belong to the department it was paired with.
    #[error("Position {position_id} is not in department {department_id}")]
    PositionOutsideDepartment {
        /// The position.
        position_id: Uuid,
        /// The department it was paired with.
        department_id: Uuid,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
