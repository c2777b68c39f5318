//! Payroll models.
//!
//! This module contains the stored [`Payroll`] record, the [`MonthSummary`]
//! of attendance it is computed from, and the [`PayrollBreakdown`] produced
//! by the pure payroll formula.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuditTrace, PayPeriod};

/// Attendance aggregated over one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// Days with status `present`.
    pub days_worked: u32,
    /// Sum of worked hours across all records.
    pub total_hours: Decimal,
    /// Sum of overtime hours across all records.
    pub overtime_hours: Decimal,
    /// Days with a sick, vacation, or personal leave status.
    pub leave_days: u32,
    /// Days with status `absent`.
    pub absent_days: u32,
}

/// Every figure the payroll formula produces, each rounded to 2 places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// The attendance summary the figures were computed from.
    pub summary: MonthSummary,
    /// Base salary divided by the days in the month (display only).
    pub daily_rate: Decimal,
    /// Daily rate times days worked.
    pub base_pay: Decimal,
    /// Hourly rate times overtime multiplier times overtime hours.
    pub overtime_pay: Decimal,
    /// Sum of the structure's allowances.
    pub allowances: Decimal,
    /// Base pay plus overtime pay plus allowances.
    pub gross_salary: Decimal,
    /// Gross salary times the tax percentage.
    pub tax_deduction: Decimal,
    /// Fixed insurance deduction.
    pub insurance_deduction: Decimal,
    /// Fixed retirement contribution.
    pub retirement_deduction: Decimal,
    /// Ad-hoc deductions carried on the payroll record.
    pub other_deductions: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Gross salary minus total deductions.
    pub net_salary: Decimal,
}

/// The payroll for one employee and one month.
///
/// Unique per (employee, period). Created unprocessed; recalculation updates
/// it in place until [`Payroll::is_processed`] is set, after which it is
/// immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payroll {
    /// Unique identifier for the payroll.
    pub id: Uuid,
    /// The employee being paid.
    pub employee_id: Uuid,
    /// The salary structure the figures were computed from.
    pub salary_structure_id: Uuid,
    /// The month being paid.
    pub period: PayPeriod,
    /// Days with status `present`.
    pub days_worked: u32,
    /// Sum of worked hours.
    pub total_hours: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
    /// Leave days in the month.
    pub leave_days: u32,
    /// Absent days in the month.
    pub absent_days: u32,
    /// Pay for days worked.
    pub base_pay: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Total allowances.
    pub allowances: Decimal,
    /// Pay before deductions.
    pub gross_salary: Decimal,
    /// Income tax withheld.
    pub tax_deduction: Decimal,
    /// Insurance withheld.
    pub insurance_deduction: Decimal,
    /// Retirement contribution withheld.
    pub retirement_deduction: Decimal,
    /// Ad-hoc deductions.
    pub other_deductions: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Pay after deductions.
    pub net_salary: Decimal,
    /// Whether the payroll has been finalized.
    pub is_processed: bool,
    /// Who finalized the payroll.
    pub processed_by: Option<Uuid>,
    /// When the payroll was finalized.
    pub processed_at: Option<DateTime<Utc>>,
    /// How the figures were reached.
    pub audit_trace: AuditTrace,
    /// When the payroll was first calculated.
    pub created_at: DateTime<Utc>,
    /// When the payroll was last recalculated or changed.
    pub updated_at: DateTime<Utc>,
}

impl Payroll {
    /// Builds an unprocessed payroll from a fresh computation.
    pub fn new(
        employee_id: Uuid,
        salary_structure_id: Uuid,
        period: PayPeriod,
        breakdown: &PayrollBreakdown,
        audit_trace: AuditTrace,
    ) -> Self {
        let now = Utc::now();
        let mut payroll = Self {
            id: Uuid::new_v4(),
            employee_id,
            salary_structure_id,
            period,
            days_worked: 0,
            total_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            leave_days: 0,
            absent_days: 0,
            base_pay: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            allowances: Decimal::ZERO,
            gross_salary: Decimal::ZERO,
            tax_deduction: Decimal::ZERO,
            insurance_deduction: Decimal::ZERO,
            retirement_deduction: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            is_processed: false,
            processed_by: None,
            processed_at: None,
            audit_trace: AuditTrace::default(),
            created_at: now,
            updated_at: now,
        };
        payroll.apply(salary_structure_id, breakdown, audit_trace);
        payroll
    }

    /// Overwrites every computed field with a new computation.
    ///
    /// Identity, processing state, and `created_at` are left untouched.
    pub fn apply(
        &mut self,
        salary_structure_id: Uuid,
        breakdown: &PayrollBreakdown,
        audit_trace: AuditTrace,
    ) {
        self.salary_structure_id = salary_structure_id;
        self.days_worked = breakdown.summary.days_worked;
        self.total_hours = breakdown.summary.total_hours;
        self.overtime_hours = breakdown.summary.overtime_hours;
        self.leave_days = breakdown.summary.leave_days;
        self.absent_days = breakdown.summary.absent_days;
        self.base_pay = breakdown.base_pay;
        self.overtime_pay = breakdown.overtime_pay;
        self.allowances = breakdown.allowances;
        self.gross_salary = breakdown.gross_salary;
        self.tax_deduction = breakdown.tax_deduction;
        self.insurance_deduction = breakdown.insurance_deduction;
        self.retirement_deduction = breakdown.retirement_deduction;
        self.other_deductions = breakdown.other_deductions;
        self.total_deductions = breakdown.total_deductions;
        self.net_salary = breakdown.net_salary;
        self.audit_trace = audit_trace;
        self.updated_at = Utc::now();
    }

    /// The computed figures of this payroll as a breakdown.
    ///
    /// `daily_rate` is not stored and comes back as zero.
    pub fn breakdown(&self) -> PayrollBreakdown {
        PayrollBreakdown {
            summary: MonthSummary {
                days_worked: self.days_worked,
                total_hours: self.total_hours,
                overtime_hours: self.overtime_hours,
                leave_days: self.leave_days,
                absent_days: self.absent_days,
            },
            daily_rate: Decimal::ZERO,
            base_pay: self.base_pay,
            overtime_pay: self.overtime_pay,
            allowances: self.allowances,
            gross_salary: self.gross_salary,
            tax_deduction: self.tax_deduction,
            insurance_deduction: self.insurance_deduction,
            retirement_deduction: self.retirement_deduction,
            other_deductions: self.other_deductions,
            total_deductions: self.total_deductions,
            net_salary: self.net_salary,
        }
    }
}
