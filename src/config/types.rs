//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::DEFAULT_STANDARD_DAILY_HOURS;
use crate::models::{
    DEFAULT_HOLIDAY_RATE_MULTIPLIER, DEFAULT_OVERTIME_RATE_MULTIPLIER, NewLeaveType,
};

/// Engine-wide settings from `engine.yaml`.
///
/// Missing keys fall back to the [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hours in a standard working day; time beyond this is overtime.
    pub standard_daily_hours: Decimal,
    /// Overtime multiplier given to salary structures that leave it unset.
    pub default_overtime_rate_multiplier: Decimal,
    /// Holiday multiplier given to salary structures that leave it unset.
    pub default_holiday_rate_multiplier: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            standard_daily_hours: DEFAULT_STANDARD_DAILY_HOURS,
            default_overtime_rate_multiplier: DEFAULT_OVERTIME_RATE_MULTIPLIER,
            default_holiday_rate_multiplier: DEFAULT_HOLIDAY_RATE_MULTIPLIER,
        }
    }
}

/// The leave type catalogue from `leave_types.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// Every configured leave type.
    pub leave_types: Vec<NewLeaveType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.standard_daily_hours, dec("8"));
        assert_eq!(config.default_overtime_rate_multiplier, dec("1.5"));
        assert_eq!(config.default_holiday_rate_multiplier, dec("2.0"));
    }

    #[test]
    fn test_engine_config_partial_yaml_uses_defaults() {
        let config: EngineConfig = serde_yaml::from_str("standard_daily_hours: 7.5").unwrap();
        assert_eq!(config.standard_daily_hours, dec("7.5"));
        assert_eq!(config.default_overtime_rate_multiplier, dec("1.5"));
    }

    #[test]
    fn test_leave_type_flags_default_to_true() {
        let yaml = "leave_types:\n  - name: Annual\n    max_days_per_year: 20\n";
        let config: LeaveTypesConfig = serde_yaml::from_str(yaml).unwrap();

        let annual = &config.leave_types[0];
        assert_eq!(annual.name, "Annual");
        assert_eq!(annual.max_days_per_year, 20);
        assert!(annual.is_paid);
        assert!(annual.requires_approval);
        assert_eq!(annual.description, "");
    }
}
