//! Attendance-to-payroll engine.
//!
//! This crate turns recorded attendance, leave, and salary structures into
//! monthly payroll: worked and overtime hours, gross pay, deductions, and an
//! auditable net-pay figure. It also runs the approval lifecycles for
//! attendance and leave records and links one-off bonuses to processed
//! payrolls.
//!
//! Records are persisted through the repository traits in [`store`];
//! [`store::InMemoryStore`] implements them for tests and embedding.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
