//! Employee contribution calculators for social insurance and the housing
//! fund.
//!
//! Both calculators follow the same pattern: pick the income base (an
//! explicit override when the employer reports one, the gross salary
//! otherwise), clamp it into the configured floor/cap range, and apply the
//! employee rates. They accept any input without complaint, including
//! negative or zero salaries, so that prior months can be reconstructed
//! from arbitrary historical figures; validating that a reported salary is
//! economically sensible is the caller's responsibility.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::models::JurisdictionConfig;
//! use payroll_core::calculations::contributions::{housing_fund, social_insurance};
//!
//! let config = JurisdictionConfig::shanghai_2024();
//!
//! let si = social_insurance(dec!(30000), &config, None);
//! assert_eq!(si.base, dec!(30000));
//! assert_eq!(si.total, dec!(3150.00));
//!
//! let hf = housing_fund(dec!(30000), &config, Some(dec!(0.07)), None);
//! assert_eq!(hf.amount, dec!(2100.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::{clamp, round_half_up};
use crate::models::JurisdictionConfig;

/// Breakdown of one month's employee social-insurance contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialInsuranceContribution {
    /// The contribution base actually used, after clamping into the
    /// configured floor/cap range.
    pub base: Decimal,

    /// Pension component: base x pension rate.
    pub pension: Decimal,

    /// Medical component: base x medical rate.
    pub medical: Decimal,

    /// Unemployment component: base x unemployment rate.
    pub unemployment: Decimal,

    /// Sum of the three components.
    pub total: Decimal,
}

/// One month's employee housing-fund contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingFundContribution {
    /// The rate actually applied (override or configured default).
    pub rate: Decimal,

    /// The contribution base actually used, after clamping.
    pub base: Decimal,

    /// base x rate.
    pub amount: Decimal,
}

/// Computes the employee social-insurance contribution for one month.
///
/// The base is `si_base` when supplied (an employer-reported base may
/// differ from the actual salary), otherwise the gross salary, clamped
/// into `[si_floor, si_cap]`. Each component is rounded to two decimal
/// places; the total is the sum of the rounded components so the breakdown
/// always reconciles.
pub fn social_insurance(
    gross_salary: Decimal,
    config: &JurisdictionConfig,
    si_base: Option<Decimal>,
) -> SocialInsuranceContribution {
    if gross_salary < Decimal::ZERO {
        warn!(
            gross_salary = %gross_salary,
            "negative gross salary; social-insurance base clamps to the floor"
        );
    }

    let base = clamp(
        si_base.unwrap_or(gross_salary),
        config.si_floor,
        config.si_cap,
    );
    let pension = round_half_up(base * config.pension_rate);
    let medical = round_half_up(base * config.medical_rate);
    let unemployment = round_half_up(base * config.unemployment_rate);

    SocialInsuranceContribution {
        base,
        pension,
        medical,
        unemployment,
        total: pension + medical + unemployment,
    }
}

/// Computes the employee housing-fund contribution for one month.
///
/// The rate is `hf_rate` when supplied, otherwise the configured default;
/// the base follows the same override-then-clamp rule as
/// [`social_insurance`], against `[hf_floor, hf_cap]`.
pub fn housing_fund(
    gross_salary: Decimal,
    config: &JurisdictionConfig,
    hf_rate: Option<Decimal>,
    hf_base: Option<Decimal>,
) -> HousingFundContribution {
    let rate = hf_rate.unwrap_or(config.default_hf_rate);
    let base = clamp(
        hf_base.unwrap_or(gross_salary),
        config.hf_floor,
        config.hf_cap,
    );

    HousingFundContribution {
        rate,
        base,
        amount: round_half_up(base * rate),
    }
}
