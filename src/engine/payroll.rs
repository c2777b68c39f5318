//! Payroll calculation and processing.
//!
//! [`PayrollEngine::calculate_payroll`] resolves the salary structure for the
//! first day of the period, summarizes the month's attendance, runs the pure
//! formula in [`compute_payroll`], and stores the result. An unprocessed
//! payroll is recalculated in place; a processed one is final.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use super::PayrollEngine;
use crate::calculation::{compute_payroll, round_half_up};
use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, Payroll};
use crate::store::Store;

/// The result of one employee in a batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    /// The employee the payroll was calculated for.
    pub employee_id: Uuid,
    /// The stored payroll, or why it could not be calculated.
    pub result: EngineResult<Payroll>,
}

impl BatchOutcome {
    /// Returns true if the payroll was calculated.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl<S: Store> PayrollEngine<S> {
    /// Calculates and stores an employee's payroll for a period.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the employee does not exist
    /// - [`EngineError::AlreadyProcessed`] if the period's payroll is processed
    /// - [`EngineError::NoActiveStructure`] if no salary structure covers the
    ///   first day of the period
    /// - [`EngineError::AlreadyExists`] if another calculation for the same
    ///   period was stored concurrently
    pub fn calculate_payroll(&self, employee_id: Uuid, period: PayPeriod) -> EngineResult<Payroll> {
        let start_time = Instant::now();
        self.require_employee(employee_id)?;

        let existing = self.store.find_payroll(employee_id, period)?;
        if let Some(processed) = existing.as_ref().filter(|p| p.is_processed) {
            warn!(
                employee_id = %employee_id,
                period = %period,
                payroll_id = %processed.id,
                "Payroll already processed"
            );
            return Err(EngineError::AlreadyProcessed {
                payroll_id: processed.id,
            });
        }

        let structure = self.resolve_structure(employee_id, period.first_day())?;
        let summary = self.month_summary(employee_id, period)?;
        let days_in_month = self.calendar.days_in_month(period)?;
        let other_deductions = existing
            .as_ref()
            .map_or(Decimal::ZERO, |p| p.other_deductions);

        let computation = compute_payroll(
            &structure,
            &summary,
            period,
            days_in_month,
            other_deductions,
        )?;

        let payroll = match existing {
            Some(mut payroll) => {
                payroll.apply(structure.id, &computation.breakdown, computation.audit_trace);
                payroll
            }
            None => Payroll::new(
                employee_id,
                structure.id,
                period,
                &computation.breakdown,
                computation.audit_trace,
            ),
        };

        if let Err(err) = self.store.save_payroll(payroll.clone()) {
            warn!(
                employee_id = %employee_id,
                period = %period,
                error = %err,
                "Payroll not saved"
            );
            return Err(err);
        }

        info!(
            employee_id = %employee_id,
            period = %period,
            payroll_id = %payroll.id,
            gross_salary = %payroll.gross_salary,
            net_salary = %payroll.net_salary,
            warnings = payroll.audit_trace.warnings.len(),
            duration_us = start_time.elapsed().as_micros(),
            "Payroll calculated"
        );
        Ok(payroll)
    }

    /// Calculates each employee's payroll independently.
    ///
    /// One outcome is returned per employee, in input order. A failure is
    /// reported in that employee's outcome and does not stop the batch.
    pub fn calculate_payroll_batch(&self, employee_ids: &[Uuid], period: PayPeriod) -> Vec<BatchOutcome> {
        let outcomes: Vec<BatchOutcome> = employee_ids
            .iter()
            .map(|&employee_id| BatchOutcome {
                employee_id,
                result: self.calculate_payroll(employee_id, period),
            })
            .collect();

        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        info!(
            period = %period,
            employees = outcomes.len(),
            failed,
            "Payroll batch finished"
        );
        outcomes
    }

    /// Finalizes a payroll. A processed payroll can no longer change.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the payroll does not exist
    /// - [`EngineError::AlreadyProcessed`] if it is already processed
    pub fn mark_processed(&self, payroll_id: Uuid, processor_id: Uuid) -> EngineResult<Payroll> {
        let mut payroll = self.unprocessed_payroll(payroll_id)?;

        let now = Utc::now();
        payroll.is_processed = true;
        payroll.processed_by = Some(processor_id);
        payroll.processed_at = Some(now);
        payroll.updated_at = now;

        self.store.save_payroll(payroll.clone())?;
        info!(
            payroll_id = %payroll_id,
            employee_id = %payroll.employee_id,
            period = %payroll.period,
            processor_id = %processor_id,
            net_salary = %payroll.net_salary,
            "Payroll processed"
        );
        Ok(payroll)
    }

    /// Sets the ad-hoc deductions of an unprocessed payroll and recomputes
    /// its totals. Later recalculations keep the amount.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the payroll does not exist
    /// - [`EngineError::AlreadyProcessed`] if it is processed
    pub fn set_other_deductions(&self, payroll_id: Uuid, amount: Decimal) -> EngineResult<Payroll> {
        let mut payroll = self.unprocessed_payroll(payroll_id)?;

        let other_deductions = round_half_up(amount);
        let previous = payroll.other_deductions;
        payroll.other_deductions = other_deductions;
        payroll.total_deductions = payroll.tax_deduction
            + payroll.insurance_deduction
            + payroll.retirement_deduction
            + other_deductions;
        payroll.net_salary = payroll.gross_salary - payroll.total_deductions;
        payroll.audit_trace.record(
            "other_deductions",
            "Other Deductions",
            json!({
                "previous": previous.to_string(),
                "other_deductions": other_deductions.to_string(),
            }),
            json!({
                "total_deductions": payroll.total_deductions.to_string(),
                "net_salary": payroll.net_salary.to_string(),
            }),
            format!("other deductions changed from {} to {}", previous, other_deductions),
        );
        payroll.updated_at = Utc::now();

        self.store.save_payroll(payroll.clone())?;
        info!(
            payroll_id = %payroll_id,
            other_deductions = %other_deductions,
            net_salary = %payroll.net_salary,
            "Other deductions set"
        );
        Ok(payroll)
    }

    /// Fetches a payroll.
    pub fn get_payroll(&self, payroll_id: Uuid) -> EngineResult<Payroll> {
        self.store
            .get_payroll(payroll_id)?
            .ok_or_else(|| EngineError::not_found("Payroll", payroll_id))
    }

    /// Fetches an employee's payroll for a period, if calculated.
    pub fn find_payroll(&self, employee_id: Uuid, period: PayPeriod) -> EngineResult<Option<Payroll>> {
        self.store.find_payroll(employee_id, period)
    }

    fn unprocessed_payroll(&self, payroll_id: Uuid) -> EngineResult<Payroll> {
        let payroll = self.get_payroll(payroll_id)?;
        if payroll.is_processed {
            warn!(payroll_id = %payroll_id, "Payroll already processed");
            return Err(EngineError::AlreadyProcessed { payroll_id });
        }
        Ok(payroll)
    }
}
