//! Employee registry.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::PayrollEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NewEmployee};
use crate::store::Store;

impl<S: Store> PayrollEngine<S> {
    /// Registers a new employee.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidRange`] if the termination date precedes the
    ///   hire date
    /// - [`EngineError::NotFound`] if the department or position does not exist
    /// - [`EngineError::PositionOutsideDepartment`] if the position belongs to
    ///   another department
    /// - [`EngineError::AlreadyExists`] if the employee code or email is taken
    ///
    /// An employee given only a position joins that position's department.
    pub fn register_employee(&self, mut new: NewEmployee) -> EngineResult<Employee> {
        if let Some(termination) = new.termination_date {
            if termination < new.hire_date {
                warn!(
                    employee_code = %new.employee_code,
                    "Termination date precedes hire date"
                );
                return Err(EngineError::InvalidRange {
                    message: format!(
                        "termination date {} is before hire date {}",
                        termination, new.hire_date
                    ),
                });
            }
        }

        if let Some(department_id) = new.department_id {
            self.get_department(department_id)?;
        }
        if let Some(position_id) = new.position_id {
            let position = self.get_position(position_id)?;
            match new.department_id {
                Some(department_id) if department_id != position.department_id => {
                    warn!(
                        employee_code = %new.employee_code,
                        position_id = %position_id,
                        department_id = %department_id,
                        "Position is outside the employee's department"
                    );
                    return Err(EngineError::PositionOutsideDepartment {
                        position_id,
                        department_id,
                    });
                }
                Some(_) => {}
                None => new.department_id = Some(position.department_id),
            }
        }

        let employee = Employee {
            id: Uuid::new_v4(),
            employee_code: new.employee_code,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            hire_date: new.hire_date,
            termination_date: new.termination_date,
            employment_type: new.employment_type,
            employment_status: new.employment_status,
            manager_id: new.manager_id,
            department_id: new.department_id,
            position_id: new.position_id,
            created_at: Utc::now(),
        };

        self.store.insert_employee(employee.clone())?;
        info!(
            employee_id = %employee.id,
            employee_code = %employee.employee_code,
            "Registered employee"
        );
        Ok(employee)
    }

    /// Fetches an employee.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] if no employee has the id.
    pub fn get_employee(&self, employee_id: Uuid) -> EngineResult<Employee> {
        self.require_employee(employee_id)
    }

    /// Fetches an employee by code.
    pub fn find_employee_by_code(&self, code: &str) -> EngineResult<Employee> {
        self.store
            .find_employee_by_code(code)?
            .ok_or_else(|| EngineError::not_found("Employee", code))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{date, engine, hire, new_employee};
    use super::*;
    use crate::models::{Department, NewDepartment, NewPosition, Position};
    use crate::store::InMemoryStore;
    use rust_decimal::Decimal;

    #[test]
    fn test_register_and_fetch() {
        let engine = engine();
        let employee = hire(&engine, "EMP-001");

        let fetched = engine.get_employee(employee.id).unwrap();
        assert_eq!(fetched, employee);
        assert_eq!(
            engine.find_employee_by_code("EMP-001").unwrap().id,
            employee.id
        );
    }

    #[test]
    fn test_duplicate_code_is_rejected() {
        let engine = engine();
        hire(&engine, "EMP-001");

        let result = engine.register_employee(new_employee("EMP-001"));
        assert!(matches!(result, Err(EngineError::AlreadyExists { .. })));
        assert_eq!(engine.store().employee_count(), 1);
    }

    #[test]
    fn test_termination_before_hire_is_rejected() {
        let engine = engine();
        let mut new = new_employee("EMP-002");
        new.termination_date = Some(date(2019, 12, 31));

        let result = engine.register_employee(new);
        assert!(matches!(result, Err(EngineError::InvalidRange { .. })));
    }

    #[test]
    fn test_termination_on_hire_date_is_allowed() {
        let engine = engine();
        let mut new = new_employee("EMP-003");
        new.termination_date = Some(new.hire_date);

        assert!(engine.register_employee(new).is_ok());
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let engine = engine();
        hire(&engine, "EMP-001");

        let mut new = new_employee("EMP-002");
        new.email = "emp-001@example.com".to_string();
        let result = engine.register_employee(new);
        assert!(matches!(result, Err(EngineError::AlreadyExists { .. })));
        assert_eq!(engine.store().employee_count(), 1);
    }

    fn finance_with_accountant(engine: &PayrollEngine<InMemoryStore>) -> (Department, Position) {
        let finance = engine
            .register_department(NewDepartment {
                name: "Finance".to_string(),
                description: String::new(),
                manager_id: None,
            })
            .unwrap();
        let accountant = engine
            .add_position(NewPosition {
                title: "Accountant".to_string(),
                department_id: finance.id,
                base_salary: Decimal::from(3500),
                hourly_rate: None,
                description: String::new(),
            })
            .unwrap();
        (finance, accountant)
    }

    #[test]
    fn test_position_implies_department() {
        let engine = engine();
        let (finance, accountant) = finance_with_accountant(&engine);

        let mut new = new_employee("EMP-001");
        new.position_id = Some(accountant.id);
        let employee = engine.register_employee(new).unwrap();

        assert_eq!(employee.position_id, Some(accountant.id));
        assert_eq!(employee.department_id, Some(finance.id));
    }

    #[test]
    fn test_position_outside_department_is_rejected() {
        let engine = engine();
        let (_, accountant) = finance_with_accountant(&engine);
        let sales = engine
            .register_department(NewDepartment {
                name: "Sales".to_string(),
                description: String::new(),
                manager_id: None,
            })
            .unwrap();

        let mut new = new_employee("EMP-001");
        new.department_id = Some(sales.id);
        new.position_id = Some(accountant.id);
        match engine.register_employee(new) {
            Err(EngineError::PositionOutsideDepartment {
                position_id,
                department_id,
            }) => {
                assert_eq!(position_id, accountant.id);
                assert_eq!(department_id, sales.id);
            }
            _ => panic!("Expected PositionOutsideDepartment error"),
        }
        assert_eq!(engine.store().employee_count(), 0);
    }

    #[test]
    fn test_unknown_department_is_rejected() {
        let engine = engine();
        let mut new = new_employee("EMP-001");
        new.department_id = Some(Uuid::new_v4());

        let result = engine.register_employee(new);
        match result {
            Err(EngineError::NotFound { entity, .. }) => assert_eq!(entity, "Department"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_unknown_employee_is_not_found() {
        let engine = engine();
        match engine.get_employee(Uuid::nil()) {
            Err(EngineError::NotFound { entity, .. }) => assert_eq!(entity, "Employee"),
            _ => panic!("Expected NotFound error"),
        }
    }
}
