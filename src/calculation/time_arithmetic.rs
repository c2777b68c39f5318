//! Time arithmetic for attendance.
//!
//! Pure functions that turn clock-in/out and break timestamps into decimal
//! work hours and split those hours into regular and overtime portions.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default length of a standard working day in hours.
pub const DEFAULT_STANDARD_DAILY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

const SECONDS_PER_HOUR: i64 = 3600;

/// Rounds to 2 decimal places, halves away from zero, and fixes the scale at
/// 2 so equal amounts serialize identically.
///
/// Every stored hour and money figure goes through this function.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_half_up;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_half_up(Decimal::from_str("8.005").unwrap()), Decimal::from_str("8.01").unwrap());
/// assert_eq!(round_half_up(Decimal::from_str("8.004").unwrap()), Decimal::from_str("8.00").unwrap());
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Computes worked hours for a day.
///
/// The span from `clock_in` to `clock_out`, minus the break when both break
/// timestamps are present. A single break timestamp on its own is ignored.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] when:
/// - `clock_out` is not after `clock_in`
/// - `break_end` is before `break_start`
/// - the break starts before `clock_in` or ends after `clock_out`
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::worked_hours;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let hours = worked_hours(
///     at("2026-01-15 09:00:00"),
///     at("2026-01-15 17:30:00"),
///     Some(at("2026-01-15 12:00:00")),
///     Some(at("2026-01-15 12:30:00")),
/// )
/// .unwrap();
/// assert_eq!(hours, Decimal::new(800, 2));
/// ```
pub fn worked_hours(
    clock_in: NaiveDateTime,
    clock_out: NaiveDateTime,
    break_start: Option<NaiveDateTime>,
    break_end: Option<NaiveDateTime>,
) -> EngineResult<Decimal> {
    if clock_out <= clock_in {
        return Err(EngineError::InvalidInterval {
            message: format!("clock-out {} is not after clock-in {}", clock_out, clock_in),
        });
    }

    let mut worked_seconds = (clock_out - clock_in).num_seconds();

    if let (Some(start), Some(end)) = (break_start, break_end) {
        if end < start {
            return Err(EngineError::InvalidInterval {
                message: format!("break ends at {} before it starts at {}", end, start),
            });
        }
        if start < clock_in || end > clock_out {
            return Err(EngineError::InvalidInterval {
                message: format!(
                    "break {} to {} lies outside the clocked span {} to {}",
                    start, end, clock_in, clock_out
                ),
            });
        }
        worked_seconds -= (end - start).num_seconds();
    }

    Ok(round_half_up(
        Decimal::from(worked_seconds) / Decimal::from(SECONDS_PER_HOUR),
    ))
}

/// Hours worked beyond the standard day, never negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{overtime_hours, DEFAULT_STANDARD_DAILY_HOURS};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let ot = overtime_hours(Decimal::from_str("9.5").unwrap(), DEFAULT_STANDARD_DAILY_HOURS);
/// assert_eq!(ot, Decimal::from_str("1.50").unwrap());
///
/// let none = overtime_hours(Decimal::from_str("7.25").unwrap(), DEFAULT_STANDARD_DAILY_HOURS);
/// assert_eq!(none, Decimal::ZERO);
/// ```
pub fn overtime_hours(worked: Decimal, standard: Decimal) -> Decimal {
    round_half_up((worked - standard).max(Decimal::ZERO))
}

/// Worked hours split at the standard day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHoursSplit {
    /// Hours up to the standard day.
    pub regular_hours: Decimal,
    /// Hours beyond the standard day.
    pub overtime_hours: Decimal,
}

/// Splits worked hours into regular hours (capped at `standard`) and
/// overtime hours.
pub fn split_daily_hours(worked: Decimal, standard: Decimal) -> DailyHoursSplit {
    DailyHoursSplit {
        regular_hours: round_half_up(worked.min(standard)),
        overtime_hours: overtime_hours(worked, standard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("2026-01-15 {}", time), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    #[test]
    fn test_eight_hour_day_no_break() {
        let hours = worked_hours(at("09:00:00"), at("17:00:00"), None, None).unwrap();
        assert_eq!(hours, dec("8.00"));
    }

    #[test]
    fn test_break_is_subtracted() {
        let hours = worked_hours(
            at("08:00:00"),
            at("18:00:00"),
            Some(at("12:00:00")),
            Some(at("12:45:00")),
        )
        .unwrap();
        assert_eq!(hours, dec("9.25"));
    }

    #[test]
    fn test_single_break_timestamp_is_ignored() {
        let hours = worked_hours(at("09:00:00"), at("17:00:00"), Some(at("12:00:00")), None).unwrap();
        assert_eq!(hours, dec("8.00"));
    }

    #[test]
    fn test_overnight_span() {
        let clock_in = at("22:00:00");
        let clock_out = NaiveDateTime::parse_from_str("2026-01-16 06:30:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        assert_eq!(worked_hours(clock_in, clock_out, None, None).unwrap(), dec("8.50"));
    }

    #[test]
    fn test_rounds_to_two_places() {
        // 8h 20m = 8.3333...
        let hours = worked_hours(at("09:00:00"), at("17:20:00"), None, None).unwrap();
        assert_eq!(hours, dec("8.33"));
    }

    #[test]
    fn test_rounds_half_up() {
        // 8h 0m 18s = 8.005 exactly
        let hours = worked_hours(at("09:00:00"), at("17:00:18"), None, None).unwrap();
        assert_eq!(hours, dec("8.01"));
    }

    #[test]
    fn test_clock_out_equal_to_clock_in_is_invalid() {
        let result = worked_hours(at("09:00:00"), at("09:00:00"), None, None);
        assert!(matches!(result, Err(EngineError::InvalidInterval { .. })));
    }

    #[test]
    fn test_clock_out_before_clock_in_is_invalid() {
        let result = worked_hours(at("17:00:00"), at("09:00:00"), None, None);
        assert!(matches!(result, Err(EngineError::InvalidInterval { .. })));
    }

    #[test]
    fn test_inverted_break_is_invalid() {
        let result = worked_hours(
            at("09:00:00"),
            at("17:00:00"),
            Some(at("13:00:00")),
            Some(at("12:00:00")),
        );
        match result {
            Err(EngineError::InvalidInterval { message }) => assert!(message.contains("before it starts")),
            other => panic!("Expected InvalidInterval, got {:?}", other),
        }
    }

    #[test]
    fn test_break_outside_span_is_invalid() {
        let early = worked_hours(
            at("09:00:00"),
            at("17:00:00"),
            Some(at("08:30:00")),
            Some(at("09:15:00")),
        );
        assert!(matches!(early, Err(EngineError::InvalidInterval { .. })));

        let late = worked_hours(
            at("09:00:00"),
            at("17:00:00"),
            Some(at("16:45:00")),
            Some(at("17:15:00")),
        );
        assert!(matches!(late, Err(EngineError::InvalidInterval { .. })));
    }

    #[test]
    fn test_zero_length_break_is_allowed() {
        let hours = worked_hours(
            at("09:00:00"),
            at("17:00:00"),
            Some(at("12:00:00")),
            Some(at("12:00:00")),
        )
        .unwrap();
        assert_eq!(hours, dec("8.00"));
    }

    #[test]
    fn test_overtime_at_threshold_is_zero() {
        assert_eq!(overtime_hours(dec("8.00"), DEFAULT_STANDARD_DAILY_HOURS), Decimal::ZERO);
    }

    #[test]
    fn test_overtime_above_threshold() {
        assert_eq!(overtime_hours(dec("9.5"), DEFAULT_STANDARD_DAILY_HOURS), dec("1.50"));
        assert_eq!(overtime_hours(dec("11.25"), DEFAULT_STANDARD_DAILY_HOURS), dec("3.25"));
    }

    #[test]
    fn test_overtime_with_custom_standard() {
        assert_eq!(overtime_hours(dec("8.5"), dec("7.5")), dec("1.00"));
    }

    #[test]
    fn test_split_daily_hours() {
        let split = split_daily_hours(dec("10.00"), DEFAULT_STANDARD_DAILY_HOURS);
        assert_eq!(split.regular_hours, dec("8"));
        assert_eq!(split.overtime_hours, dec("2.00"));

        let short = split_daily_hours(dec("6.00"), DEFAULT_STANDARD_DAILY_HOURS);
        assert_eq!(short.regular_hours, dec("6.00"));
        assert_eq!(short.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_round_half_up_fixes_scale() {
        assert_eq!(round_half_up(dec("2000")).to_string(), "2000.00");
        assert_eq!(round_half_up(dec("-1.005")).to_string(), "-1.01");
    }

    #[test]
    fn test_default_standard_constant() {
        assert_eq!(DEFAULT_STANDARD_DAILY_HOURS, dec("8"));
    }
}
