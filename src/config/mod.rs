//! Configuration loading for the payroll engine.
//!
//! This module loads engine settings and the leave type catalogue from YAML
//! files. [`EngineConfig::default`] gives the same settings without files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Leave types: {}", config.leave_types().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, LeaveTypesConfig};
