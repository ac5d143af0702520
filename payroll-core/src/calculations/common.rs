//! Common utility functions for payroll calculations.
//!
//! This module provides shared functionality used across the contribution
//! and withholding calculations, including rounding and base clamping.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps a contribution base into the inclusive `[floor, cap]` range.
///
/// Unlike `Ord::clamp` this never panics; for a degenerate range where
/// `floor > cap` the floor wins, matching the permissive posture of the
/// calculators that call it.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::clamp;
///
/// assert_eq!(clamp(dec!(5000), dec!(7384), dec!(36921)), dec!(7384));
/// assert_eq!(clamp(dec!(30000), dec!(7384), dec!(36921)), dec!(30000));
/// assert_eq!(clamp(dec!(50000), dec!(7384), dec!(36921)), dec!(36921));
/// ```
pub fn clamp(
    value: Decimal,
    floor: Decimal,
    cap: Decimal,
) -> Decimal {
    if value < floor {
        floor
    } else if value > cap {
        cap
    } else {
        value
    }
}
