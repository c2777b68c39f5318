//! Salary structures and their resolution by date.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use super::PayrollEngine;
use crate::calculation::select_structure;
use crate::error::{EngineError, EngineResult};
use crate::models::{NewSalaryStructure, SalaryStructure};
use crate::store::Store;

impl<S: Store> PayrollEngine<S> {
    /// Adds a salary structure for an employee.
    ///
    /// Unset multipliers take the engine's configured defaults. Effective
    /// ranges of an employee's structures may overlap; resolution picks the
    /// latest start.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the employee does not exist
    /// - [`EngineError::InvalidRange`] if `effective_to` is not after
    ///   `effective_from`
    pub fn add_salary_structure(&self, new: NewSalaryStructure) -> EngineResult<SalaryStructure> {
        self.require_employee(new.employee_id)?;

        if let Some(end) = new.effective_to {
            if end <= new.effective_from {
                return Err(EngineError::InvalidRange {
                    message: format!(
                        "salary structure ends {} on or before it starts {}",
                        end, new.effective_from
                    ),
                });
            }
        }

        let structure = SalaryStructure {
            id: Uuid::new_v4(),
            employee_id: new.employee_id,
            base_salary: new.base_salary,
            hourly_rate: new.hourly_rate,
            house_allowance: new.house_allowance,
            transport_allowance: new.transport_allowance,
            meal_allowance: new.meal_allowance,
            other_allowances: new.other_allowances,
            overtime_rate_multiplier: new
                .overtime_rate_multiplier
                .unwrap_or(self.config.default_overtime_rate_multiplier),
            holiday_rate_multiplier: new
                .holiday_rate_multiplier
                .unwrap_or(self.config.default_holiday_rate_multiplier),
            tax_percentage: new.tax_percentage,
            insurance_deduction: new.insurance_deduction,
            retirement_contribution: new.retirement_contribution,
            effective_from: new.effective_from,
            effective_to: new.effective_to,
            created_at: Utc::now(),
        };
        self.store.insert_structure(structure.clone())?;
        info!(
            employee_id = %structure.employee_id,
            salary_structure_id = %structure.id,
            effective_from = %structure.effective_from,
            "Added salary structure"
        );
        Ok(structure)
    }

    /// The salary structure governing an employee on `date`.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoActiveStructure`] if no structure is in force.
    pub fn resolve_structure(&self, employee_id: Uuid, date: NaiveDate) -> EngineResult<SalaryStructure> {
        let structures = self.store.structures_for_employee(employee_id)?;
        match select_structure(&structures, date) {
            Some(structure) => Ok(structure.clone()),
            None => {
                warn!(
                    employee_id = %employee_id,
                    date = %date,
                    candidates = structures.len(),
                    "No active salary structure"
                );
                Err(EngineError::NoActiveStructure { employee_id, date })
            }
        }
    }
}
