//! Departments and positions.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use super::PayrollEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{Department, NewDepartment, NewPosition, NewSalaryStructure, Position};
use crate::store::Store;

impl<S: Store> PayrollEngine<S> {
    /// Registers a department.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the manager does not exist
    /// - [`EngineError::AlreadyExists`] if the name is taken
    pub fn register_department(&self, new: NewDepartment) -> EngineResult<Department> {
        if let Some(manager_id) = new.manager_id {
            self.require_employee(manager_id)?;
        }

        let department = Department {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            manager_id: new.manager_id,
            created_at: Utc::now(),
        };
        self.store.insert_department(department.clone())?;
        info!(
            department_id = %department.id,
            name = %department.name,
            "Registered department"
        );
        Ok(department)
    }

    /// Sets or clears the manager heading a department.
    pub fn set_department_manager(
        &self,
        department_id: Uuid,
        manager_id: Option<Uuid>,
    ) -> EngineResult<Department> {
        let mut department = self.get_department(department_id)?;
        if let Some(manager_id) = manager_id {
            self.require_employee(manager_id)?;
        }

        department.manager_id = manager_id;
        self.store.update_department(department.clone())?;
        info!(
            department_id = %department_id,
            manager_id = ?manager_id,
            "Department manager changed"
        );
        Ok(department)
    }

    /// Fetches a department.
    pub fn get_department(&self, department_id: Uuid) -> EngineResult<Department> {
        self.store
            .get_department(department_id)?
            .ok_or_else(|| EngineError::not_found("Department", department_id))
    }

    /// Every department, ordered by name.
    pub fn departments(&self) -> EngineResult<Vec<Department>> {
        let mut departments = self.store.list_departments()?;
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }

    /// Adds a position to a department.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] if the department does not exist.
    pub fn add_position(&self, new: NewPosition) -> EngineResult<Position> {
        self.get_department(new.department_id)?;

        let position = Position {
            id: Uuid::new_v4(),
            title: new.title,
            department_id: new.department_id,
            base_salary: new.base_salary,
            hourly_rate: new.hourly_rate,
            description: new.description,
        };
        self.store.insert_position(position.clone())?;
        info!(
            position_id = %position.id,
            department_id = %position.department_id,
            title = %position.title,
            "Added position"
        );
        Ok(position)
    }

    /// Fetches a position.
    pub fn get_position(&self, position_id: Uuid) -> EngineResult<Position> {
        self.store
            .get_position(position_id)?
            .ok_or_else(|| EngineError::not_found("Position", position_id))
    }

    /// A department's positions, ordered by title.
    pub fn positions_in_department(&self, department_id: Uuid) -> EngineResult<Vec<Position>> {
        self.get_department(department_id)?;
        let mut positions = self.store.positions_in_department(department_id)?;
        positions.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(positions)
    }

    /// Starts a salary structure input from the employee's position.
    ///
    /// The base salary and hourly rate come from the position; everything
    /// else is left at its default for the caller to fill in before
    /// [`add_salary_structure`](Self::add_salary_structure).
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] if the employee does not exist or holds no
    /// position.
    pub fn position_salary_template(
        &self,
        employee_id: Uuid,
        effective_from: NaiveDate,
    ) -> EngineResult<NewSalaryStructure> {
        let employee = self.require_employee(employee_id)?;
        let Some(position_id) = employee.position_id else {
            warn!(employee_id = %employee_id, "Employee holds no position");
            return Err(EngineError::NotFound {
                entity: "Position".to_string(),
                id: format!("none assigned to employee {}", employee_id),
            });
        };
        let position = self.get_position(position_id)?;

        let mut template =
            NewSalaryStructure::new(employee_id, position.base_salary, effective_from);
        template.hourly_rate = position.hourly_rate;
        Ok(template)
    }
}
