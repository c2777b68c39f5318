//! Bonus awards and their link to processed payrolls.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::PayrollEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{Bonus, NewBonus};
use crate::store::Store;

impl<S: Store> PayrollEngine<S> {
    /// Records an unlinked bonus for an employee.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] if the employee does not exist.
    pub fn award_bonus(&self, new: NewBonus) -> EngineResult<Bonus> {
        self.require_employee(new.employee_id)?;

        let bonus = Bonus {
            id: Uuid::new_v4(),
            employee_id: new.employee_id,
            bonus_type: new.bonus_type,
            amount: new.amount,
            description: new.description,
            date_awarded: new.date_awarded,
            payroll_id: None,
            approved_by: new.approved_by,
            created_at: Utc::now(),
        };
        self.store.save_bonus(bonus.clone())?;
        info!(
            employee_id = %bonus.employee_id,
            bonus_id = %bonus.id,
            amount = %bonus.amount,
            "Bonus awarded"
        );
        Ok(bonus)
    }

    /// Attaches a bonus to a processed payroll.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the bonus or the payroll does not exist
    /// - [`EngineError::BonusAlreadyLinked`] if the bonus is attached to a payroll
    /// - [`EngineError::EmployeeMismatch`] if the payroll belongs to another employee
    /// - [`EngineError::PayrollNotProcessed`] if the payroll is not processed
    pub fn link_bonus_to_payroll(&self, bonus_id: Uuid, payroll_id: Uuid) -> EngineResult<Bonus> {
        let mut bonus = self
            .store
            .get_bonus(bonus_id)?
            .ok_or_else(|| EngineError::not_found("Bonus", bonus_id))?;
        let payroll = self.get_payroll(payroll_id)?;

        if let Some(linked) = bonus.payroll_id {
            warn!(bonus_id = %bonus_id, payroll_id = %linked, "Bonus is already linked");
            return Err(EngineError::BonusAlreadyLinked {
                bonus_id,
                payroll_id: linked,
            });
        }
        if bonus.employee_id != payroll.employee_id {
            warn!(
                bonus_id = %bonus_id,
                payroll_id = %payroll_id,
                bonus_employee_id = %bonus.employee_id,
                payroll_employee_id = %payroll.employee_id,
                "Bonus and payroll belong to different employees"
            );
            return Err(EngineError::EmployeeMismatch {
                bonus_id,
                payroll_id,
            });
        }

        if !payroll.is_processed {
            warn!(
                bonus_id = %bonus_id,
                payroll_id = %payroll_id,
                "Bonus can only be linked to a processed payroll"
            );
            return Err(EngineError::PayrollNotProcessed { payroll_id });
        }

        bonus.payroll_id = Some(payroll_id);
        self.store.save_bonus(bonus.clone())?;
        info!(bonus_id = %bonus_id, payroll_id = %payroll_id, "Bonus linked to payroll");
        Ok(bonus)
    }

    /// An employee's unlinked bonuses, oldest award first.
    pub fn pending_bonuses(&self, employee_id: Uuid) -> EngineResult<Vec<Bonus>> {
        self.require_employee(employee_id)?;
        let mut bonuses: Vec<Bonus> = self
            .store
            .bonuses_for_employee(employee_id)?
            .into_iter()
            .filter(Bonus::is_pending)
            .collect();
        bonuses.sort_by_key(|b| (b.date_awarded, b.created_at));
        Ok(bonuses)
    }

    /// Bonuses linked to a payroll, oldest award first.
    pub fn bonuses_for_payroll(&self, payroll_id: Uuid) -> EngineResult<Vec<Bonus>> {
        let mut bonuses = self.store.bonuses_for_payroll(payroll_id)?;
        bonuses.sort_by_key(|b| (b.date_awarded, b.created_at));
        Ok(bonuses)
    }
}
