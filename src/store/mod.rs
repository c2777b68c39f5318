//! Persistence interface for the payroll engine.
//!
//! The engine reads and writes records only through the repository traits
//! in this module. Each trait covers one entity type with get, list-by-filter,
//! and save operations. [`InMemoryStore`] implements all of them; production
//! storage implements the same traits.
//!
//! Stores never derive anything. Hours, totals, and statuses arrive fully
//! computed and are persisted as given. The only checks a store performs are
//! the uniqueness and optimistic-write rules documented on each method, which
//! must happen atomically with the write.

mod memory;

pub use memory::InMemoryStore;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, Bonus, Department, Employee, LeaveRequest, LeaveType, PayPeriod, Payroll,
    Position, SalaryStructure, WorkSchedule,
};

/// Storage for employees.
pub trait EmployeeRepository {
    /// Fetches an employee by id.
    fn get_employee(&self, id: Uuid) -> EngineResult<Option<Employee>>;

    /// Fetches an employee by its unique code.
    fn find_employee_by_code(&self, code: &str) -> EngineResult<Option<Employee>>;

    /// Inserts a new employee.
    ///
    /// Fails with `AlreadyExists` if the employee code or the email is taken.
    fn insert_employee(&self, employee: Employee) -> EngineResult<()>;
}

/// Storage for departments and positions.
pub trait OrganizationRepository {
    /// Fetches a department by id.
    fn get_department(&self, id: Uuid) -> EngineResult<Option<Department>>;

    /// Every department, in any order.
    fn list_departments(&self) -> EngineResult<Vec<Department>>;

    /// Inserts a new department.
    ///
    /// Fails with `AlreadyExists` if the name is taken.
    fn insert_department(&self, department: Department) -> EngineResult<()>;

    /// Replaces an existing department.
    ///
    /// Fails with `NotFound` if no department has the id, and with
    /// `AlreadyExists` if the new name belongs to another department.
    fn update_department(&self, department: Department) -> EngineResult<()>;

    /// Fetches a position by id.
    fn get_position(&self, id: Uuid) -> EngineResult<Option<Position>>;

    /// Every position of a department, in any order.
    fn positions_in_department(&self, department_id: Uuid) -> EngineResult<Vec<Position>>;

    /// Inserts a new position.
    fn insert_position(&self, position: Position) -> EngineResult<()>;
}

/// Storage for work schedules.
pub trait ScheduleRepository {
    /// Every schedule of an employee, in any order.
    fn schedules_for_employee(&self, employee_id: Uuid) -> EngineResult<Vec<WorkSchedule>>;

    /// Inserts a new schedule.
    ///
    /// Fails with `DuplicateRecord` if the employee already has a schedule for
    /// the same weekday whose effective range overlaps the new one.
    fn insert_schedule(&self, schedule: WorkSchedule) -> EngineResult<()>;
}

/// Storage for attendance records.
pub trait AttendanceRepository {
    /// Fetches a record by id.
    fn get_attendance(&self, id: Uuid) -> EngineResult<Option<AttendanceRecord>>;

    /// Fetches the record for an employee on a date.
    fn find_attendance(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<AttendanceRecord>>;

    /// Records of an employee dated within `[from, to]`, in any order.
    fn attendance_between(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Inserts a new record.
    ///
    /// Fails with `DuplicateRecord` if the employee already has a record for
    /// the date.
    fn insert_attendance(&self, record: AttendanceRecord) -> EngineResult<()>;

    /// Replaces an existing record.
    ///
    /// Fails with `NotFound` if no record has the id, and with
    /// `AlreadyApproved` if the stored record is approved.
    fn update_attendance(&self, record: AttendanceRecord) -> EngineResult<()>;
}

/// Storage for leave types and leave requests.
pub trait LeaveRepository {
    /// Fetches a leave type by id.
    fn get_leave_type(&self, id: Uuid) -> EngineResult<Option<LeaveType>>;

    /// Fetches a leave type by its unique name.
    fn find_leave_type_by_name(&self, name: &str) -> EngineResult<Option<LeaveType>>;

    /// Every leave type, in any order.
    fn list_leave_types(&self) -> EngineResult<Vec<LeaveType>>;

    /// Inserts a new leave type.
    ///
    /// Fails with `AlreadyExists` if the name is taken.
    fn insert_leave_type(&self, leave_type: LeaveType) -> EngineResult<()>;

    /// Fetches a leave request by id.
    fn get_leave_request(&self, id: Uuid) -> EngineResult<Option<LeaveRequest>>;

    /// An employee's requests for one leave type, in any order.
    fn leave_requests_for(
        &self,
        employee_id: Uuid,
        leave_type_id: Uuid,
    ) -> EngineResult<Vec<LeaveRequest>>;

    /// Inserts a new leave request.
    fn insert_leave_request(&self, request: LeaveRequest) -> EngineResult<()>;

    /// Replaces an existing leave request.
    ///
    /// Fails with `NotFound` if no request has the id, and with `NotPending`
    /// if the stored request has already left the pending state.
    fn update_leave_request(&self, request: LeaveRequest) -> EngineResult<()>;
}

/// Storage for salary structures.
pub trait SalaryStructureRepository {
    /// Every structure of an employee, in any order.
    fn structures_for_employee(&self, employee_id: Uuid) -> EngineResult<Vec<SalaryStructure>>;

    /// Inserts a new structure.
    fn insert_structure(&self, structure: SalaryStructure) -> EngineResult<()>;
}

/// Storage for payrolls.
pub trait PayrollRepository {
    /// Fetches a payroll by id.
    fn get_payroll(&self, id: Uuid) -> EngineResult<Option<Payroll>>;

    /// Fetches the payroll of an employee for a period.
    fn find_payroll(&self, employee_id: Uuid, period: PayPeriod) -> EngineResult<Option<Payroll>>;

    /// Inserts or replaces a payroll, checked against the stored state in the
    /// same write.
    ///
    /// - If a payroll with the same id is stored and is processed, fails with
    ///   `AlreadyProcessed`. Otherwise the stored payroll is replaced.
    /// - If no payroll has the id but one exists for the same employee and
    ///   period, fails with `AlreadyProcessed` when that one is processed and
    ///   with `AlreadyExists` otherwise.
    fn save_payroll(&self, payroll: Payroll) -> EngineResult<()>;
}

/// Storage for bonuses.
pub trait BonusRepository {
    /// Fetches a bonus by id.
    fn get_bonus(&self, id: Uuid) -> EngineResult<Option<Bonus>>;

    /// Every bonus of an employee, in any order.
    fn bonuses_for_employee(&self, employee_id: Uuid) -> EngineResult<Vec<Bonus>>;

    /// Every bonus linked to a payroll, in any order.
    fn bonuses_for_payroll(&self, payroll_id: Uuid) -> EngineResult<Vec<Bonus>>;

    /// Inserts or replaces a bonus.
    fn save_bonus(&self, bonus: Bonus) -> EngineResult<()>;
}

/// Everything the engine needs from storage.
pub trait Store:
    EmployeeRepository
    + OrganizationRepository
    + ScheduleRepository
    + AttendanceRepository
    + LeaveRepository
    + SalaryStructureRepository
    + PayrollRepository
    + BonusRepository
    + Send
    + Sync
{
}

impl<T> Store for T where
    T: EmployeeRepository
        + OrganizationRepository
        + ScheduleRepository
        + AttendanceRepository
        + LeaveRepository
        + SalaryStructureRepository
        + PayrollRepository
        + BonusRepository
        + Send
        + Sync
{
}
