//! Bonus model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a bonus was awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusType {
    /// Performance bonus.
    Performance,
    /// Festival bonus.
    Festival,
    /// Project completion bonus.
    Project,
    /// Retention bonus.
    Retention,
    /// Anything else.
    Other,
}

/// A one-off payment, linked to a payroll once that payroll is processed.
///
/// An unlinked bonus is a pending award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    /// Unique identifier for the bonus.
    pub id: Uuid,
    /// The employee receiving the bonus.
    pub employee_id: Uuid,
    /// Why the bonus was awarded.
    pub bonus_type: BonusType,
    /// The bonus amount.
    pub amount: Decimal,
    /// Free-form description.
    pub description: String,
    /// The date the bonus was awarded.
    pub date_awarded: NaiveDate,
    /// The processed payroll the bonus is paid with, if linked.
    pub payroll_id: Option<Uuid>,
    /// Who approved the bonus.
    pub approved_by: Option<Uuid>,
    /// When the bonus was recorded.
    pub created_at: DateTime<Utc>,
}

impl Bonus {
    /// Returns true while the bonus is not linked to any payroll.
    pub fn is_pending(&self) -> bool {
        self.payroll_id.is_none()
    }
}

/// Input for awarding a bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBonus {
    /// The employee receiving the bonus.
    pub employee_id: Uuid,
    /// Why the bonus was awarded.
    pub bonus_type: BonusType,
    /// The bonus amount.
    pub amount: Decimal,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// The date the bonus was awarded.
    pub date_awarded: NaiveDate,
    /// Who approved the bonus.
    #[serde(default)]
    pub approved_by: Option<Uuid>,
}
