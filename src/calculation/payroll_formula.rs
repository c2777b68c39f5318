//! Monthly payroll formula.
//!
//! This module turns a resolved [`SalaryStructure`] and a [`MonthSummary`]
//! into every pay and deduction figure of a payroll, recording each step in
//! an [`AuditTrace`]. It is pure: the same inputs always produce the same
//! breakdown and trace.
//!
//! The steps, in order:
//!
//! 1. daily rate = base salary / calendar days in the month
//! 2. base pay = daily rate x days worked
//! 3. overtime pay = hourly rate x overtime multiplier x overtime hours,
//!    or zero when the structure has no hourly rate
//! 4. allowances = house + transport + meal + other
//! 5. gross = base pay + overtime pay + allowances
//! 6. tax = gross x tax percentage / 100
//! 7. total deductions = tax + insurance + retirement + other deductions,
//!    preceded by an `other_deductions` step when that amount is non-zero
//! 8. net = gross - total deductions
//!
//! Each stored figure is rounded half-up to 2 places as it is produced, and
//! later steps consume the rounded value. The daily rate is carried at full
//! precision into base pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::time_arithmetic::round_half_up;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, MonthSummary, PayPeriod, PayrollBreakdown, SalaryStructure, WarningSeverity,
};

/// Warning code recorded when overtime hours go unpaid for lack of an hourly rate.
pub const WARNING_NO_HOURLY_RATE: &str = "NO_HOURLY_RATE";

/// Warning code recorded when deductions exceed gross salary.
pub const WARNING_NEGATIVE_NET: &str = "NEGATIVE_NET_SALARY";

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// The output of [`compute_payroll`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollComputation {
    /// Every computed figure.
    pub breakdown: PayrollBreakdown,
    /// How each figure was reached.
    pub audit_trace: AuditTrace,
}

/// Computes a month's payroll figures.
///
/// # Arguments
///
/// * `structure` - The salary structure in force for the period
/// * `summary` - The month's attendance summary
/// * `period` - The month being paid (used for the audit trace)
/// * `days_in_month` - Calendar days in the month
/// * `other_deductions` - Ad-hoc deductions already recorded on the payroll
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`] when `days_in_month` is zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_payroll;
/// use payroll_engine::models::{MonthSummary, PayPeriod, SalaryStructure};
/// use chrono::{NaiveDate, Utc};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use uuid::Uuid;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let structure = SalaryStructure {
///     id: Uuid::new_v4(),
///     employee_id: Uuid::new_v4(),
///     base_salary: dec("3000.00"),
///     hourly_rate: Some(dec("20.00")),
///     house_allowance: dec("200.00"),
///     transport_allowance: Decimal::ZERO,
///     meal_allowance: Decimal::ZERO,
///     other_allowances: Decimal::ZERO,
///     overtime_rate_multiplier: dec("1.5"),
///     holiday_rate_multiplier: dec("2.0"),
///     tax_percentage: dec("10"),
///     insurance_deduction: dec("50"),
///     retirement_contribution: dec("100"),
///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     effective_to: None,
///     created_at: Utc::now(),
/// };
/// let summary = MonthSummary {
///     days_worked: 20,
///     total_hours: dec("165"),
///     overtime_hours: dec("5"),
///     leave_days: 0,
///     absent_days: 0,
/// };
///
/// let result = compute_payroll(
///     &structure,
///     &summary,
///     PayPeriod::new(2024, 4).unwrap(),
///     30,
///     Decimal::ZERO,
/// )
/// .unwrap();
/// assert_eq!(result.breakdown.gross_salary, dec("2350.00"));
/// assert_eq!(result.breakdown.net_salary, dec("1965.00"));
/// ```
pub fn compute_payroll(
    structure: &SalaryStructure,
    summary: &MonthSummary,
    period: PayPeriod,
    days_in_month: u32,
    other_deductions: Decimal,
) -> EngineResult<PayrollComputation> {
    if days_in_month == 0 {
        return Err(EngineError::InvalidPeriod {
            year: period.year(),
            month: period.month(),
        });
    }

    let mut trace = AuditTrace::default();

    // Daily rate
    let daily_rate_exact = structure.base_salary / Decimal::from(days_in_month);
    let daily_rate = round_half_up(daily_rate_exact);
    trace.record(
        "daily_rate",
        "Daily Rate",
        json!({
            "base_salary": structure.base_salary.to_string(),
            "days_in_month": days_in_month,
            "period": period.to_string(),
        }),
        json!({ "daily_rate": daily_rate.to_string() }),
        format!(
            "{} base salary over {} calendar days in {}",
            structure.base_salary, days_in_month, period
        ),
    );

    // Base pay
    let base_pay = round_half_up(daily_rate_exact * Decimal::from(summary.days_worked));
    trace.record(
        "base_pay",
        "Base Pay",
        json!({
            "daily_rate": daily_rate.to_string(),
            "days_worked": summary.days_worked,
        }),
        json!({ "base_pay": base_pay.to_string() }),
        format!("{} days worked at the daily rate", summary.days_worked),
    );

    // Overtime pay
    let overtime_pay = match structure.hourly_rate {
        Some(hourly_rate) => {
            let pay = round_half_up(
                hourly_rate * structure.overtime_rate_multiplier * summary.overtime_hours,
            );
            trace.record(
                "overtime_pay",
                "Overtime Pay",
                json!({
                    "hourly_rate": hourly_rate.to_string(),
                    "overtime_rate_multiplier": structure.overtime_rate_multiplier.to_string(),
                    "overtime_hours": summary.overtime_hours.to_string(),
                }),
                json!({ "overtime_pay": pay.to_string() }),
                format!(
                    "{} overtime hours at {} x {}",
                    summary.overtime_hours, hourly_rate, structure.overtime_rate_multiplier
                ),
            );
            pay
        }
        None => {
            let pay = round_half_up(Decimal::ZERO);
            if summary.overtime_hours > Decimal::ZERO {
                debug!(
                    salary_structure_id = %structure.id,
                    overtime_hours = %summary.overtime_hours,
                    "No hourly rate on salary structure; overtime unpaid"
                );
                trace.warn(
                    WARNING_NO_HOURLY_RATE,
                    format!(
                        "{} overtime hours recorded but the salary structure has no hourly rate",
                        summary.overtime_hours
                    ),
                    WarningSeverity::Medium,
                );
            }
            trace.record(
                "overtime_pay",
                "Overtime Pay",
                json!({
                    "hourly_rate": null,
                    "overtime_hours": summary.overtime_hours.to_string(),
                }),
                json!({ "overtime_pay": pay.to_string() }),
                "no hourly rate on the salary structure, overtime contributes nothing",
            );
            pay
        }
    };

    // Allowances
    let allowances = round_half_up(structure.total_allowances());
    trace.record(
        "allowances",
        "Allowances",
        json!({
            "house_allowance": structure.house_allowance.to_string(),
            "transport_allowance": structure.transport_allowance.to_string(),
            "meal_allowance": structure.meal_allowance.to_string(),
            "other_allowances": structure.other_allowances.to_string(),
        }),
        json!({ "allowances": allowances.to_string() }),
        "sum of the four allowance categories",
    );

    // Gross
    let gross_salary = base_pay + overtime_pay + allowances;
    trace.record(
        "gross_salary",
        "Gross Salary",
        json!({
            "base_pay": base_pay.to_string(),
            "overtime_pay": overtime_pay.to_string(),
            "allowances": allowances.to_string(),
        }),
        json!({ "gross_salary": gross_salary.to_string() }),
        "base pay plus overtime pay plus allowances",
    );

    // Tax
    let tax_deduction = round_half_up(gross_salary * (structure.tax_percentage / HUNDRED));
    trace.record(
        "tax_deduction",
        "Tax Deduction",
        json!({
            "gross_salary": gross_salary.to_string(),
            "tax_percentage": structure.tax_percentage.to_string(),
        }),
        json!({ "tax_deduction": tax_deduction.to_string() }),
        format!("{}% of gross salary", structure.tax_percentage),
    );

    // Total deductions
    let insurance_deduction = round_half_up(structure.insurance_deduction);
    let retirement_deduction = round_half_up(structure.retirement_contribution);
    let other_deductions = round_half_up(other_deductions);
    if !other_deductions.is_zero() {
        trace.record(
            "other_deductions",
            "Other Deductions",
            json!({ "other_deductions": other_deductions.to_string() }),
            json!({ "other_deductions": other_deductions.to_string() }),
            format!("{} other deductions carried into the payroll", other_deductions),
        );
    }
    let total_deductions =
        tax_deduction + insurance_deduction + retirement_deduction + other_deductions;
    trace.record(
        "total_deductions",
        "Total Deductions",
        json!({
            "tax_deduction": tax_deduction.to_string(),
            "insurance_deduction": insurance_deduction.to_string(),
            "retirement_deduction": retirement_deduction.to_string(),
            "other_deductions": other_deductions.to_string(),
        }),
        json!({ "total_deductions": total_deductions.to_string() }),
        "tax plus insurance plus retirement plus other deductions",
    );

    // Net
    let net_salary = gross_salary - total_deductions;
    if net_salary < Decimal::ZERO {
        trace.warn(
            WARNING_NEGATIVE_NET,
            format!(
                "total deductions {} exceed gross salary {}",
                total_deductions, gross_salary
            ),
            WarningSeverity::High,
        );
    }
    trace.record(
        "net_salary",
        "Net Salary",
        json!({
            "gross_salary": gross_salary.to_string(),
            "total_deductions": total_deductions.to_string(),
        }),
        json!({ "net_salary": net_salary.to_string() }),
        "gross salary minus total deductions",
    );

    Ok(PayrollComputation {
        breakdown: PayrollBreakdown {
            summary: MonthSummary {
                total_hours: round_half_up(summary.total_hours),
                overtime_hours: round_half_up(summary.overtime_hours),
                ..*summary
            },
            daily_rate,
            base_pay,
            overtime_pay,
            allowances,
            gross_salary,
            tax_deduction,
            insurance_deduction,
            retirement_deduction,
            other_deductions,
            total_deductions,
            net_salary,
        },
        audit_trace: trace,
    })
}
