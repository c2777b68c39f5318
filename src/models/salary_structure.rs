//! Salary structure model.
//!
//! A [`SalaryStructure`] is the compensation template applied to an employee
//! over an effective range. An employee may have several, including
//! overlapping ones; the resolver picks the one that governs a given date.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default overtime multiplier applied to the hourly rate.
pub const DEFAULT_OVERTIME_RATE_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Default holiday multiplier applied to the hourly rate.
pub const DEFAULT_HOLIDAY_RATE_MULTIPLIER: Decimal = Decimal::from_parts(20, 0, 0, false, 1);

/// Compensation template for one employee over `[effective_from, effective_to)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStructure {
    /// Unique identifier for the structure.
    pub id: Uuid,
    /// The employee the structure applies to.
    pub employee_id: Uuid,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Hourly rate used for overtime; overtime pays nothing when unset.
    pub hourly_rate: Option<Decimal>,
    /// Monthly housing allowance.
    pub house_allowance: Decimal,
    /// Monthly transport allowance.
    pub transport_allowance: Decimal,
    /// Monthly meal allowance.
    pub meal_allowance: Decimal,
    /// Any other monthly allowance.
    pub other_allowances: Decimal,
    /// Multiplier on the hourly rate for overtime hours.
    pub overtime_rate_multiplier: Decimal,
    /// Multiplier on the hourly rate for holiday hours.
    pub holiday_rate_multiplier: Decimal,
    /// Income tax as a percentage of gross salary.
    pub tax_percentage: Decimal,
    /// Fixed monthly insurance deduction.
    pub insurance_deduction: Decimal,
    /// Fixed monthly retirement contribution.
    pub retirement_contribution: Decimal,
    /// First date the structure applies (inclusive).
    pub effective_from: NaiveDate,
    /// Date the structure stops applying (exclusive), if bounded.
    pub effective_to: Option<NaiveDate>,
    /// When the structure was created.
    pub created_at: DateTime<Utc>,
}

impl SalaryStructure {
    /// Sum of the four allowance categories.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::SalaryStructure;
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
    ///     house_allowance: dec("100.00"),
    ///     transport_allowance: dec("50.00"),
    ///     meal_allowance: dec("30.00"),
    ///     other_allowances: dec("20.00"),
    ///     overtime_rate_multiplier: dec("1.5"),
    ///     holiday_rate_multiplier: dec("2.0"),
    ///     tax_percentage: dec("10"),
    ///     insurance_deduction: dec("50.00"),
    ///     retirement_contribution: dec("100.00"),
    ///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     effective_to: None,
    ///     created_at: Utc::now(),
    /// };
    /// assert_eq!(structure.total_allowances(), dec("200.00"));
    /// assert_eq!(structure.gross_monthly_salary(), dec("3200.00"));
    /// ```
    pub fn total_allowances(&self) -> Decimal {
        self.house_allowance + self.transport_allowance + self.meal_allowance + self.other_allowances
    }

    /// Base salary plus allowances, before overtime and deductions.
    pub fn gross_monthly_salary(&self) -> Decimal {
        self.base_salary + self.total_allowances()
    }

    /// Whether the effective range contains `date`.
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && self.effective_to.is_none_or(|end| end > date)
    }
}

/// Input for adding a salary structure.
///
/// Allowances and deductions default to zero; the multipliers default to the
/// engine configuration when left unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSalaryStructure {
    /// The employee the structure applies to.
    pub employee_id: Uuid,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Hourly rate used for overtime.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Monthly housing allowance.
    #[serde(default)]
    pub house_allowance: Decimal,
    /// Monthly transport allowance.
    #[serde(default)]
    pub transport_allowance: Decimal,
    /// Monthly meal allowance.
    #[serde(default)]
    pub meal_allowance: Decimal,
    /// Any other monthly allowance.
    #[serde(default)]
    pub other_allowances: Decimal,
    /// Overtime multiplier override.
    #[serde(default)]
    pub overtime_rate_multiplier: Option<Decimal>,
    /// Holiday multiplier override.
    #[serde(default)]
    pub holiday_rate_multiplier: Option<Decimal>,
    /// Income tax percentage.
    #[serde(default)]
    pub tax_percentage: Decimal,
    /// Fixed monthly insurance deduction.
    #[serde(default)]
    pub insurance_deduction: Decimal,
    /// Fixed monthly retirement contribution.
    #[serde(default)]
    pub retirement_contribution: Decimal,
    /// First date the structure applies (inclusive).
    pub effective_from: NaiveDate,
    /// Date the structure stops applying (exclusive), if bounded.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
}

impl NewSalaryStructure {
    /// Starts an input with only the base salary and start date set.
    pub fn new(employee_id: Uuid, base_salary: Decimal, effective_from: NaiveDate) -> Self {
        Self {
            employee_id,
            base_salary,
            hourly_rate: None,
            house_allowance: Decimal::ZERO,
            transport_allowance: Decimal::ZERO,
            meal_allowance: Decimal::ZERO,
            other_allowances: Decimal::ZERO,
            overtime_rate_multiplier: None,
            holiday_rate_multiplier: None,
            tax_percentage: Decimal::ZERO,
            insurance_deduction: Decimal::ZERO,
            retirement_contribution: Decimal::ZERO,
            effective_from,
            effective_to: None,
        }
    }
}
