//! The payroll engine.
//!
//! [`PayrollEngine`] is the entry point for every operation: registering
//! departments, positions, employees and schedules, recording attendance and leave, maintaining
//! salary structures, calculating and processing payroll, and linking
//! bonuses. Each group of operations lives in its own submodule as an
//! `impl` block on the engine.
//!
//! The engine holds no records itself. It validates input, derives computed
//! fields, and hands finished records to a [`Store`].
//!
//! # Example
//!
//! ```
//! use payroll_engine::engine::PayrollEngine;
//! use payroll_engine::models::NewEmployee;
//! use payroll_engine::store::InMemoryStore;
//! use chrono::NaiveDate;
//!
//! let engine = PayrollEngine::new(InMemoryStore::new());
//! let employee = engine
//!     .register_employee(NewEmployee {
//!         employee_code: "EMP-001".to_string(),
//!         first_name: "Ada".to_string(),
//!         last_name: "Lovelace".to_string(),
//!         email: "ada@example.com".to_string(),
//!         hire_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
//!         termination_date: None,
//!         employment_type: Default::default(),
//!         employment_status: Default::default(),
//!         manager_id: None,
//!         department_id: None,
//!         position_id: None,
//!     })
//!     .unwrap();
//! assert_eq!(engine.get_employee(employee.id).unwrap().full_name(), "Ada Lovelace");
//! ```

mod attendance;
mod bonus;
mod employee;
mod leave;
mod organization;
mod payroll;
mod salary;
mod schedule;

pub use payroll::BatchOutcome;

use std::sync::Arc;

use uuid::Uuid;

use crate::calculation::{Calendar, GregorianCalendar};
use crate::config::{ConfigLoader, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;
use crate::store::Store;

/// Attendance, leave, and payroll operations over a store.
///
/// The engine is `Send + Sync` whenever its store is, so one instance can be
/// shared across threads behind an `Arc`.
pub struct PayrollEngine<S> {
    store: S,
    calendar: Arc<dyn Calendar>,
    config: EngineConfig,
}

impl<S: Store> PayrollEngine<S> {
    /// Creates an engine with the Gregorian calendar and default settings.
    pub fn new(store: S) -> Self {
        Self {
            store,
            calendar: Arc::new(GregorianCalendar),
            config: EngineConfig::default(),
        }
    }

    /// Creates an engine with the settings from a loaded configuration.
    pub fn from_config(store: S, loader: &ConfigLoader) -> Self {
        Self::new(store).with_config(loader.config().clone())
    }

    /// Replaces the calendar used for month lengths.
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = calendar;
        self
    }

    /// Replaces the engine settings.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the engine settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn require_employee(&self, employee_id: Uuid) -> EngineResult<Employee> {
        self.store
            .get_employee(employee_id)?
            .ok_or_else(|| EngineError::not_found("Employee", employee_id))
    }
}
