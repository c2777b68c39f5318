//! Employee model and related types.
//!
//! This module defines the Employee struct together with its employment
//! type and status enums. The employee is the aggregate root that every
//! other per-employee record refers to by id.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment.
    #[default]
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Fixed-term contract.
    Contract,
    /// Internship.
    Intern,
}

/// Represents where the employee is in the employment lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Currently employed and working.
    #[default]
    Active,
    /// Employed but not currently working.
    Inactive,
    /// Employment has ended.
    Terminated,
    /// On extended leave.
    OnLeave,
}

/// Represents an employee whose attendance feeds payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// Human-facing employee code (e.g., "EMP-0042"), unique per store.
    pub employee_code: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Work email address.
    pub email: String,
    /// The date employment started.
    pub hire_date: NaiveDate,
    /// The date employment ended, if it has.
    pub termination_date: Option<NaiveDate>,
    /// The type of employment arrangement.
    pub employment_type: EmploymentType,
    /// The current employment status.
    pub employment_status: EmploymentStatus,
    /// The employee's manager, if any.
    pub manager_id: Option<Uuid>,
    /// The department the employee works in, if assigned.
    pub department_id: Option<Uuid>,
    /// The position the employee holds, if assigned.
    pub position_id: Option<Uuid>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Input for registering a new employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Human-facing employee code.
    pub employee_code: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Work email address.
    pub email: String,
    /// The date employment started.
    pub hire_date: NaiveDate,
    /// The date employment ended, if it has.
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
    /// The type of employment arrangement.
    #[serde(default)]
    pub employment_type: EmploymentType,
    /// The current employment status.
    #[serde(default)]
    pub employment_status: EmploymentStatus,
    /// The employee's manager, if any.
    #[serde(default)]
    pub manager_id: Option<Uuid>,
    /// The department the employee works in, if assigned.
    #[serde(default)]
    pub department_id: Option<Uuid>,
    /// The position the employee holds, if assigned.
    #[serde(default)]
    pub position_id: Option<Uuid>,
}

impl Employee {
    /// Returns the employee's first and last name joined by a space.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmploymentStatus, EmploymentType};
    /// use chrono::{NaiveDate, Utc};
    /// use uuid::Uuid;
    ///
    /// let employee = Employee {
    ///     id: Uuid::new_v4(),
    ///     employee_code: "EMP-001".to_string(),
    ///     first_name: "Ada".to_string(),
    ///     last_name: "Lovelace".to_string(),
    ///     email: "ada@example.com".to_string(),
    ///     hire_date: NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
    ///     termination_date: None,
    ///     employment_type: EmploymentType::FullTime,
    ///     employment_status: EmploymentStatus::Active,
    ///     manager_id: None,
    ///     department_id: None,
    ///     position_id: None,
    ///     created_at: Utc::now(),
    /// };
    /// assert_eq!(employee.full_name(), "Ada Lovelace");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the employee was on the books on `date`.
    ///
    /// The hire date counts as employed; the termination date counts as the
    /// last employed day.
    pub fn is_employed_on(&self, date: NaiveDate) -> bool {
        date >= self.hire_date && self.termination_date.is_none_or(|end| date <= end)
    }

    /// Years of service as a decimal, measured up to the termination date if
    /// set, otherwise up to `as_of`.
    ///
    /// Uses a 365.25-day year and rounds to 2 decimal places.
    pub fn years_of_service(&self, as_of: NaiveDate) -> Decimal {
        let end = self.termination_date.unwrap_or(as_of);
        let days = (end - self.hire_date).num_days().max(0);
        (Decimal::from(days) / Decimal::new(36525, 2)).round_dp(2)
    }
}
