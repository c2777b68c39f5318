//! In-memory store backed by `parking_lot` read-write locks.
//!
//! Each entity type lives in its own `HashMap` keyed by id. Secondary lookups
//! scan the map. Uniqueness and optimistic-write checks run under the same
//! write lock as the write they guard.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{
    AttendanceRepository, BonusRepository, EmployeeRepository, LeaveRepository,
    OrganizationRepository, PayrollRepository, SalaryStructureRepository, ScheduleRepository,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Bonus, Department, Employee, LeaveRequest, LeaveType, PayPeriod, Payroll,
    Position, SalaryStructure, WorkSchedule,
};

/// A thread-safe store that keeps every record in memory.
///
/// # Example
///
/// ```
/// use payroll_engine::engine::PayrollEngine;
/// use payroll_engine::store::InMemoryStore;
///
/// let engine = PayrollEngine::new(InMemoryStore::new());
/// assert_eq!(engine.store().employee_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    employees: RwLock<HashMap<Uuid, Employee>>,
    departments: RwLock<HashMap<Uuid, Department>>,
    positions: RwLock<HashMap<Uuid, Position>>,
    schedules: RwLock<HashMap<Uuid, WorkSchedule>>,
    attendance: RwLock<HashMap<Uuid, AttendanceRecord>>,
    leave_types: RwLock<HashMap<Uuid, LeaveType>>,
    leave_requests: RwLock<HashMap<Uuid, LeaveRequest>>,
    structures: RwLock<HashMap<Uuid, SalaryStructure>>,
    payrolls: RwLock<HashMap<Uuid, Payroll>>,
    bonuses: RwLock<HashMap<Uuid, Bonus>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of employees stored.
    pub fn employee_count(&self) -> usize {
        self.employees.read().len()
    }

    /// Number of payrolls stored.
    pub fn payroll_count(&self) -> usize {
        self.payrolls.read().len()
    }
}

impl EmployeeRepository for InMemoryStore {
    fn get_employee(&self, id: Uuid) -> EngineResult<Option<Employee>> {
        Ok(self.employees.read().get(&id).cloned())
    }

    fn find_employee_by_code(&self, code: &str) -> EngineResult<Option<Employee>> {
        let cache = self.employees.read();
        Ok(cache.values().find(|e| e.employee_code == code).cloned())
    }

    fn insert_employee(&self, employee: Employee) -> EngineResult<()> {
        let mut cache = self.employees.write();
        if cache
            .values()
            .any(|e| e.employee_code == employee.employee_code)
        {
            return Err(EngineError::AlreadyExists {
                entity: "Employee".to_string(),
                message: format!("employee code {}", employee.employee_code),
            });
        }
        if cache
            .values()
            .any(|e| e.email.eq_ignore_ascii_case(&employee.email))
        {
            return Err(EngineError::AlreadyExists {
                entity: "Employee".to_string(),
                message: format!("email {}", employee.email),
            });
        }
        cache.insert(employee.id, employee);
        Ok(())
    }
}

impl OrganizationRepository for InMemoryStore {
    fn get_department(&self, id: Uuid) -> EngineResult<Option<Department>> {
        Ok(self.departments.read().get(&id).cloned())
    }

    fn list_departments(&self) -> EngineResult<Vec<Department>> {
        Ok(self.departments.read().values().cloned().collect())
    }

    fn insert_department(&self, department: Department) -> EngineResult<()> {
        let mut cache = self.departments.write();
        if cache.values().any(|d| d.name == department.name) {
            return Err(EngineError::AlreadyExists {
                entity: "Department".to_string(),
                message: format!("name {}", department.name),
            });
        }
        cache.insert(department.id, department);
        Ok(())
    }

    fn update_department(&self, department: Department) -> EngineResult<()> {
        let mut cache = self.departments.write();
        if !cache.contains_key(&department.id) {
            return Err(EngineError::not_found("Department", department.id));
        }
        if cache
            .values()
            .any(|d| d.id != department.id && d.name == department.name)
        {
            return Err(EngineError::AlreadyExists {
                entity: "Department".to_string(),
                message: format!("name {}", department.name),
            });
        }
        cache.insert(department.id, department);
        Ok(())
    }

    fn get_position(&self, id: Uuid) -> EngineResult<Option<Position>> {
        Ok(self.positions.read().get(&id).cloned())
    }

    fn positions_in_department(&self, department_id: Uuid) -> EngineResult<Vec<Position>> {
        let cache = self.positions.read();
        Ok(cache
            .values()
            .filter(|p| p.department_id == department_id)
            .cloned()
            .collect())
    }

    fn insert_position(&self, position: Position) -> EngineResult<()> {
        self.positions.write().insert(position.id, position);
        Ok(())
    }
}

impl ScheduleRepository for InMemoryStore {
    fn schedules_for_employee(&self, employee_id: Uuid) -> EngineResult<Vec<WorkSchedule>> {
        let cache = self.schedules.read();
        Ok(cache
            .values()
            .filter(|s| s.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn insert_schedule(&self, schedule: WorkSchedule) -> EngineResult<()> {
        let mut cache = self.schedules.write();
        if let Some(existing) = cache.values().find(|s| {
            s.employee_id == schedule.employee_id
                && s.day_of_week == schedule.day_of_week
                && s.overlaps(schedule.effective_from, schedule.effective_to)
        }) {
            return Err(EngineError::DuplicateRecord {
                entity: "WorkSchedule".to_string(),
                message: format!(
                    "{:?} schedule from {} overlaps schedule {}",
                    schedule.day_of_week, schedule.effective_from, existing.id
                ),
            });
        }
        cache.insert(schedule.id, schedule);
        Ok(())
    }
}

impl AttendanceRepository for InMemoryStore {
    fn get_attendance(&self, id: Uuid) -> EngineResult<Option<AttendanceRecord>> {
        Ok(self.attendance.read().get(&id).cloned())
    }

    fn find_attendance(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<AttendanceRecord>> {
        let cache = self.attendance.read();
        Ok(cache
            .values()
            .find(|r| r.employee_id == employee_id && r.date == date)
            .cloned())
    }

    fn attendance_between(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let cache = self.attendance.read();
        Ok(cache
            .values()
            .filter(|r| r.employee_id == employee_id && r.date >= from && r.date <= to)
            .cloned()
            .collect())
    }

    fn insert_attendance(&self, record: AttendanceRecord) -> EngineResult<()> {
        let mut cache = self.attendance.write();
        if cache
            .values()
            .any(|r| r.employee_id == record.employee_id && r.date == record.date)
        {
            return Err(EngineError::DuplicateRecord {
                entity: "AttendanceRecord".to_string(),
                message: format!(
                    "employee {} already has a record for {}",
                    record.employee_id, record.date
                ),
            });
        }
        cache.insert(record.id, record);
        Ok(())
    }

    fn update_attendance(&self, record: AttendanceRecord) -> EngineResult<()> {
        let mut cache = self.attendance.write();
        let stored = cache
            .get_mut(&record.id)
            .ok_or_else(|| EngineError::not_found("AttendanceRecord", record.id))?;
        if stored.is_approved {
            return Err(EngineError::AlreadyApproved {
                record_id: record.id,
            });
        }
        *stored = record;
        Ok(())
    }
}

impl LeaveRepository for InMemoryStore {
    fn get_leave_type(&self, id: Uuid) -> EngineResult<Option<LeaveType>> {
        Ok(self.leave_types.read().get(&id).cloned())
    }

    fn find_leave_type_by_name(&self, name: &str) -> EngineResult<Option<LeaveType>> {
        let cache = self.leave_types.read();
        Ok(cache.values().find(|t| t.name == name).cloned())
    }

    fn list_leave_types(&self) -> EngineResult<Vec<LeaveType>> {
        Ok(self.leave_types.read().values().cloned().collect())
    }

    fn insert_leave_type(&self, leave_type: LeaveType) -> EngineResult<()> {
        let mut cache = self.leave_types.write();
        if cache.values().any(|t| t.name == leave_type.name) {
            return Err(EngineError::AlreadyExists {
                entity: "LeaveType".to_string(),
                message: format!("name {}", leave_type.name),
            });
        }
        cache.insert(leave_type.id, leave_type);
        Ok(())
    }

    fn get_leave_request(&self, id: Uuid) -> EngineResult<Option<LeaveRequest>> {
        Ok(self.leave_requests.read().get(&id).cloned())
    }

    fn leave_requests_for(
        &self,
        employee_id: Uuid,
        leave_type_id: Uuid,
    ) -> EngineResult<Vec<LeaveRequest>> {
        let cache = self.leave_requests.read();
        Ok(cache
            .values()
            .filter(|r| r.employee_id == employee_id && r.leave_type_id == leave_type_id)
            .cloned()
            .collect())
    }

    fn insert_leave_request(&self, request: LeaveRequest) -> EngineResult<()> {
        self.leave_requests.write().insert(request.id, request);
        Ok(())
    }

    fn update_leave_request(&self, request: LeaveRequest) -> EngineResult<()> {
        let mut cache = self.leave_requests.write();
        let stored = cache
            .get_mut(&request.id)
            .ok_or_else(|| EngineError::not_found("LeaveRequest", request.id))?;
        if stored.status.is_terminal() {
            return Err(EngineError::NotPending {
                request_id: request.id,
                status: stored.status.to_string(),
            });
        }
        *stored = request;
        Ok(())
    }
}

impl SalaryStructureRepository for InMemoryStore {
    fn structures_for_employee(&self, employee_id: Uuid) -> EngineResult<Vec<SalaryStructure>> {
        let cache = self.structures.read();
        Ok(cache
            .values()
            .filter(|s| s.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn insert_structure(&self, structure: SalaryStructure) -> EngineResult<()> {
        self.structures.write().insert(structure.id, structure);
        Ok(())
    }
}

impl PayrollRepository for InMemoryStore {
    fn get_payroll(&self, id: Uuid) -> EngineResult<Option<Payroll>> {
        Ok(self.payrolls.read().get(&id).cloned())
    }

    fn find_payroll(&self, employee_id: Uuid, period: PayPeriod) -> EngineResult<Option<Payroll>> {
        let cache = self.payrolls.read();
        Ok(cache
            .values()
            .find(|p| p.employee_id == employee_id && p.period == period)
            .cloned())
    }

    fn save_payroll(&self, payroll: Payroll) -> EngineResult<()> {
        let mut cache = self.payrolls.write();

        if let Some(stored) = cache.get(&payroll.id) {
            if stored.is_processed {
                return Err(EngineError::AlreadyProcessed {
                    payroll_id: stored.id,
                });
            }
        } else if let Some(existing) = cache
            .values()
            .find(|p| p.employee_id == payroll.employee_id && p.period == payroll.period)
        {
            if existing.is_processed {
                return Err(EngineError::AlreadyProcessed {
                    payroll_id: existing.id,
                });
            }
            return Err(EngineError::AlreadyExists {
                entity: "Payroll".to_string(),
                message: format!(
                    "employee {} already has a payroll for {}",
                    payroll.employee_id, payroll.period
                ),
            });
        }

        cache.insert(payroll.id, payroll);
        Ok(())
    }
}

impl BonusRepository for InMemoryStore {
    fn get_bonus(&self, id: Uuid) -> EngineResult<Option<Bonus>> {
        Ok(self.bonuses.read().get(&id).cloned())
    }

    fn bonuses_for_employee(&self, employee_id: Uuid) -> EngineResult<Vec<Bonus>> {
        let cache = self.bonuses.read();
        Ok(cache
            .values()
            .filter(|b| b.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn bonuses_for_payroll(&self, payroll_id: Uuid) -> EngineResult<Vec<Bonus>> {
        let cache = self.bonuses.read();
        Ok(cache
            .values()
            .filter(|b| b.payroll_id == Some(payroll_id))
            .cloned()
            .collect())
    }

    fn save_bonus(&self, bonus: Bonus) -> EngineResult<()> {
        self.bonuses.write().insert(bonus.id, bonus);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc, Weekday};
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::thread;

    use crate::models::{AttendanceStatus, AuditTrace, PayrollBreakdown};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(employee_id: Uuid, day: NaiveDate) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            employee_id,
            date: day,
            clock_in: None,
            clock_out: None,
            break_start: None,
            break_end: None,
            total_hours: None,
            overtime_hours: None,
            status: AttendanceStatus::Present,
            notes: String::new(),
            is_approved: false,
            approved_by: None,
            approved_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn payroll(employee_id: Uuid, period: PayPeriod) -> Payroll {
        Payroll::new(
            employee_id,
            Uuid::new_v4(),
            period,
            &PayrollBreakdown::default(),
            AuditTrace::default(),
        )
    }

    // ==========================================================================
    // Attendance
    // ==========================================================================

    #[test]
    fn test_attendance_unique_per_employee_and_date() {
        let store = InMemoryStore::new();
        let employee_id = Uuid::new_v4();

        store
            .insert_attendance(record(employee_id, date(2024, 3, 4)))
            .unwrap();
        let result = store.insert_attendance(record(employee_id, date(2024, 3, 4)));
        assert!(matches!(result, Err(EngineError::DuplicateRecord { .. })));

        // Another employee on the same date is fine
        store
            .insert_attendance(record(Uuid::new_v4(), date(2024, 3, 4)))
            .unwrap();
    }

    #[test]
    fn test_attendance_between_is_inclusive() {
        let store = InMemoryStore::new();
        let employee_id = Uuid::new_v4();
        for day in [date(2024, 2, 29), date(2024, 3, 1), date(2024, 3, 31), date(2024, 4, 1)] {
            store.insert_attendance(record(employee_id, day)).unwrap();
        }

        let march = store
            .attendance_between(employee_id, date(2024, 3, 1), date(2024, 3, 31))
            .unwrap();
        assert_eq!(march.len(), 2);
    }

    #[test]
    fn test_approved_attendance_cannot_be_replaced() {
        let store = InMemoryStore::new();
        let mut approved = record(Uuid::new_v4(), date(2024, 3, 4));
        approved.is_approved = true;
        store.insert_attendance(approved.clone()).unwrap();

        let result = store.update_attendance(approved.clone());
        match result {
            Err(EngineError::AlreadyApproved { record_id }) => assert_eq!(record_id, approved.id),
            _ => panic!("Expected AlreadyApproved error"),
        }
    }

    #[test]
    fn test_update_unknown_attendance_is_not_found() {
        let store = InMemoryStore::new();
        let result = store.update_attendance(record(Uuid::new_v4(), date(2024, 3, 4)));
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    // ==========================================================================
    // Employees and departments
    // ==========================================================================

    fn employee(code: &str, email: &str) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            employee_code: code.to_string(),
            first_name: "Test".to_string(),
            last_name: code.to_string(),
            email: email.to_string(),
            hire_date: date(2020, 1, 6),
            termination_date: None,
            employment_type: Default::default(),
            employment_status: Default::default(),
            manager_id: None,
            department_id: None,
            position_id: None,
            created_at: Utc::now(),
        }
    }

    fn department(name: &str) -> Department {
        Department {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            manager_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_employee_email_is_unique() {
        let store = InMemoryStore::new();
        store
            .insert_employee(employee("EMP-001", "sam@example.com"))
            .unwrap();

        let result = store.insert_employee(employee("EMP-002", "Sam@Example.com"));
        match result {
            Err(EngineError::AlreadyExists { message, .. }) => assert!(message.contains("email")),
            _ => panic!("Expected AlreadyExists error"),
        }
        assert_eq!(store.employee_count(), 1);
    }

    #[test]
    fn test_department_names_are_unique() {
        let store = InMemoryStore::new();
        let finance = department("Finance");
        let sales = department("Sales");
        store.insert_department(finance.clone()).unwrap();
        store.insert_department(sales.clone()).unwrap();

        let duplicate = store.insert_department(department("Finance"));
        assert!(matches!(duplicate, Err(EngineError::AlreadyExists { .. })));

        // Renaming onto another department's name is rejected too
        let renamed = Department {
            name: "Finance".to_string(),
            ..sales.clone()
        };
        let result = store.update_department(renamed);
        assert!(matches!(result, Err(EngineError::AlreadyExists { .. })));

        // Keeping its own name is fine
        store.update_department(finance).unwrap();
        assert_eq!(store.list_departments().unwrap().len(), 2);
    }

    #[test]
    fn test_update_unknown_department_is_not_found() {
        let store = InMemoryStore::new();
        let result = store.update_department(department("Finance"));
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    // ==========================================================================
    // Schedules
    // ==========================================================================

    fn monday(employee_id: Uuid, from: NaiveDate, to: Option<NaiveDate>) -> WorkSchedule {
        WorkSchedule {
            id: Uuid::new_v4(),
            employee_id,
            day_of_week: Weekday::Mon,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            break_minutes: 0,
            is_working_day: true,
            effective_from: from,
            effective_to: to,
        }
    }

    #[test]
    fn test_overlapping_schedule_insert_is_rejected() {
        let store = InMemoryStore::new();
        let employee_id = Uuid::new_v4();
        store
            .insert_schedule(monday(employee_id, date(2024, 1, 1), Some(date(2024, 7, 1))))
            .unwrap();

        let result = store.insert_schedule(monday(employee_id, date(2024, 6, 3), None));
        assert!(matches!(result, Err(EngineError::DuplicateRecord { .. })));

        // Adjacent ranges and other employees are fine
        store
            .insert_schedule(monday(employee_id, date(2024, 7, 1), None))
            .unwrap();
        store
            .insert_schedule(monday(Uuid::new_v4(), date(2024, 1, 1), None))
            .unwrap();
        assert_eq!(store.schedules_for_employee(employee_id).unwrap().len(), 2);
    }

    #[test]
    fn test_concurrent_schedule_inserts_keep_one() {
        let store = Arc::new(InMemoryStore::new());
        let employee_id = Uuid::new_v4();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.insert_schedule(monday(employee_id, date(2024, 1, 1), None))
                })
            })
            .collect();
        let inserted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();

        assert_eq!(inserted, 1);
        assert_eq!(store.schedules_for_employee(employee_id).unwrap().len(), 1);
    }

    // ==========================================================================
    // Payroll optimistic writes
    // ==========================================================================

    #[test]
    fn test_save_payroll_replaces_unprocessed() {
        let store = InMemoryStore::new();
        let period = PayPeriod::new(2024, 4).unwrap();
        let mut first = payroll(Uuid::new_v4(), period);
        store.save_payroll(first.clone()).unwrap();

        first.other_deductions = Decimal::ONE;
        store.save_payroll(first.clone()).unwrap();

        assert_eq!(store.payroll_count(), 1);
        let stored = store.get_payroll(first.id).unwrap().unwrap();
        assert_eq!(stored.other_deductions, Decimal::ONE);
    }

    #[test]
    fn test_save_payroll_rejects_processed() {
        let store = InMemoryStore::new();
        let mut processed = payroll(Uuid::new_v4(), PayPeriod::new(2024, 4).unwrap());
        processed.is_processed = true;
        store.save_payroll(processed.clone()).unwrap();

        let result = store.save_payroll(processed.clone());
        assert!(matches!(result, Err(EngineError::AlreadyProcessed { .. })));
    }

    #[test]
    fn test_save_payroll_insert_race() {
        let store = InMemoryStore::new();
        let employee_id = Uuid::new_v4();
        let period = PayPeriod::new(2024, 4).unwrap();
        store.save_payroll(payroll(employee_id, period)).unwrap();

        let result = store.save_payroll(payroll(employee_id, period));
        assert!(matches!(result, Err(EngineError::AlreadyExists { .. })));
    }

    #[test]
    fn test_save_payroll_insert_over_processed_period() {
        let store = InMemoryStore::new();
        let employee_id = Uuid::new_v4();
        let period = PayPeriod::new(2024, 4).unwrap();
        let mut processed = payroll(employee_id, period);
        processed.is_processed = true;
        store.save_payroll(processed).unwrap();

        let result = store.save_payroll(payroll(employee_id, period));
        assert!(matches!(result, Err(EngineError::AlreadyProcessed { .. })));
    }

    // ==========================================================================
    // Leave
    // ==========================================================================

    #[test]
    fn test_leave_type_names_are_unique() {
        let store = InMemoryStore::new();
        let leave_type = LeaveType {
            id: Uuid::new_v4(),
            name: "Sick".to_string(),
            max_days_per_year: 10,
            is_paid: true,
            requires_approval: true,
            description: String::new(),
        };
        store.insert_leave_type(leave_type.clone()).unwrap();

        let duplicate = LeaveType {
            id: Uuid::new_v4(),
            ..leave_type
        };
        let result = store.insert_leave_type(duplicate);
        assert!(matches!(result, Err(EngineError::AlreadyExists { .. })));
        assert_eq!(store.list_leave_types().unwrap().len(), 1);
    }
}
