//! Departments and positions.
//!
//! A [`Position`] belongs to one [`Department`] and carries the pay rates new
//! salary structures for that position start from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organizational unit with a unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier for the department.
    pub id: Uuid,
    /// Department name, unique per store.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// The employee heading the department, if any.
    pub manager_id: Option<Uuid>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Input for registering a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    /// Department name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// The employee heading the department, if any.
    #[serde(default)]
    pub manager_id: Option<Uuid>,
}

/// A job title within a department and its standard pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Unique identifier for the position.
    pub id: Uuid,
    /// Job title.
    pub title: String,
    /// The department the position belongs to.
    pub department_id: Uuid,
    /// Standard monthly base salary.
    pub base_salary: Decimal,
    /// Standard hourly rate, if the position pays overtime by the hour.
    pub hourly_rate: Option<Decimal>,
    /// Free-form description.
    pub description: String,
}

/// Input for adding a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPosition {
    /// Job title.
    pub title: String,
    /// The department the position belongs to.
    pub department_id: Uuid,
    /// Standard monthly base salary.
    pub base_salary: Decimal,
    /// Standard hourly rate.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}
