//! Salary structure selection.
//!
//! This module picks the [`SalaryStructure`] that governs an employee on a
//! given date when several structures exist, possibly with overlapping
//! effective ranges. The lookup mirrors the rate table search: walk the
//! structures newest-first and take the first one in force.

use chrono::NaiveDate;

use crate::models::SalaryStructure;

/// Selects the structure with the latest `effective_from <= date` whose
/// `effective_to` is unset or after `date`.
///
/// Ties on `effective_from` go to the most recently created structure.
/// Returns `None` when no structure is in force on `date`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::select_structure;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// assert!(select_structure(&[], date).is_none());
/// ```
pub fn select_structure(structures: &[SalaryStructure], date: NaiveDate) -> Option<&SalaryStructure> {
    structures
        .iter()
        .filter(|s| s.is_effective_on(date))
        .max_by(|a, b| {
            a.effective_from
                .cmp(&b.effective_from)
                .then(a.created_at.cmp(&b.created_at))
        })
}
