use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TaxBracket;

/// Errors reported by [`JurisdictionConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The social-insurance base range must satisfy `0 < floor <= cap`.
    #[error("social insurance base range must satisfy 0 < floor <= cap, got {floor} and {cap}")]
    InvalidSocialInsuranceBase { floor: Decimal, cap: Decimal },

    /// The housing-fund base range must satisfy `0 < floor <= cap`.
    #[error("housing fund base range must satisfy 0 < floor <= cap, got {floor} and {cap}")]
    InvalidHousingFundBase { floor: Decimal, cap: Decimal },

    /// The employee pension rate must be in `[0, 1)`.
    #[error("pension rate must be in [0, 1), got {0}")]
    InvalidPensionRate(Decimal),

    /// The employee medical rate must be in `[0, 1)`.
    #[error("medical rate must be in [0, 1), got {0}")]
    InvalidMedicalRate(Decimal),

    /// The employee unemployment rate must be in `[0, 1)`.
    #[error("unemployment rate must be in [0, 1), got {0}")]
    InvalidUnemploymentRate(Decimal),

    /// The default employee housing-fund rate must be in `[0, 1)`.
    #[error("housing fund rate must be in [0, 1), got {0}")]
    InvalidHousingFundRate(Decimal),

    /// The standard monthly deduction must be non-negative.
    #[error("standard monthly deduction must be non-negative, got {0}")]
    InvalidStandardDeduction(Decimal),

    /// The bracket table must contain at least one bracket.
    #[error("bracket table must not be empty")]
    EmptyBrackets,

    /// Only the final bracket may omit its upper bound.
    #[error("bracket {0} has no upper bound but is not the final bracket")]
    UnboundedInteriorBracket(usize),

    /// The final bracket must omit its upper bound.
    #[error("final bracket must have no upper bound")]
    BoundedFinalBracket,

    /// Bracket upper bounds must be strictly ascending.
    #[error("bracket {0} upper bound does not exceed the previous bracket's")]
    UnsortedBrackets(usize),

    /// Every bracket rate must be in `[0, 1)`.
    #[error("bracket {index} rate must be in [0, 1), got {rate}")]
    InvalidBracketRate { index: usize, rate: Decimal },

    /// A quick-deduction constant breaks continuity at a bracket boundary.
    #[error(
        "bracket {index} quick deduction breaks continuity at {bound}: expected {expected}, got {actual}"
    )]
    DiscontinuousBracket {
        index: usize,
        bound: Decimal,
        expected: Decimal,
        actual: Decimal,
    },
}

/// Jurisdiction parameters for one publication period of the Shanghai
/// contribution bases and the national comprehensive-income brackets.
///
/// Construct via [`JurisdictionConfig::shanghai_2024`] and treat as
/// read-only for the lifetime of a calculation session; build a fresh
/// instance instead of mutating a shared one when parameters change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionConfig {
    /// First day of the period the contribution bases are published for.
    pub valid_from: NaiveDate,

    /// Last day of the publication period.
    pub valid_until: NaiveDate,

    /// Social-insurance contribution base floor. 7,384 CNY for 2024-07.
    pub si_floor: Decimal,

    /// Social-insurance contribution base cap. 36,921 CNY for 2024-07.
    pub si_cap: Decimal,

    /// Housing-fund contribution base floor. 2,690 CNY for 2024-07.
    pub hf_floor: Decimal,

    /// Housing-fund contribution base cap. 36,921 CNY for 2024-07.
    pub hf_cap: Decimal,

    /// Employee pension contribution rate. 8% in Shanghai.
    pub pension_rate: Decimal,

    /// Employee medical contribution rate. 2% in Shanghai.
    pub medical_rate: Decimal,

    /// Employee unemployment contribution rate. 0.5% in Shanghai.
    pub unemployment_rate: Decimal,

    /// Default employee housing-fund rate, used when the caller does not
    /// override it. Employers choose within 5-7%; 7% is the common choice.
    pub default_hf_rate: Decimal,

    /// Standard monthly deduction for wage income. 5,000 CNY/month.
    pub standard_deduction_monthly: Decimal,

    /// Annual comprehensive-income brackets, ascending by upper bound,
    /// final bracket unbounded. See [`TaxBracket`].
    pub brackets: Vec<TaxBracket>,
}

impl JurisdictionConfig {
    /// Published defaults for the 2024-07-01 to 2025-06-30 period.
    ///
    /// Update the base floors and caps when Shanghai publishes new figures;
    /// the bracket table and standard deduction are national and change far
    /// less often.
    pub fn shanghai_2024() -> Self {
        Self {
            valid_from: NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid calendar date"),
            valid_until: NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid calendar date"),
            si_floor: Decimal::new(7_384, 0),
            si_cap: Decimal::new(36_921, 0),
            hf_floor: Decimal::new(2_690, 0),
            hf_cap: Decimal::new(36_921, 0),
            pension_rate: Decimal::new(8, 2),
            medical_rate: Decimal::new(2, 2),
            unemployment_rate: Decimal::new(5, 3),
            default_hf_rate: Decimal::new(7, 2),
            standard_deduction_monthly: Decimal::new(5_000, 0),
            brackets: vec![
                TaxBracket {
                    up_to: Some(Decimal::new(36_000, 0)),
                    rate: Decimal::new(3, 2),
                    quick_deduction: Decimal::ZERO,
                },
                TaxBracket {
                    up_to: Some(Decimal::new(144_000, 0)),
                    rate: Decimal::new(10, 2),
                    quick_deduction: Decimal::new(2_520, 0),
                },
                TaxBracket {
                    up_to: Some(Decimal::new(300_000, 0)),
                    rate: Decimal::new(20, 2),
                    quick_deduction: Decimal::new(16_920, 0),
                },
                TaxBracket {
                    up_to: Some(Decimal::new(420_000, 0)),
                    rate: Decimal::new(25, 2),
                    quick_deduction: Decimal::new(31_920, 0),
                },
                TaxBracket {
                    up_to: Some(Decimal::new(660_000, 0)),
                    rate: Decimal::new(30, 2),
                    quick_deduction: Decimal::new(52_920, 0),
                },
                TaxBracket {
                    up_to: Some(Decimal::new(960_000, 0)),
                    rate: Decimal::new(35, 2),
                    quick_deduction: Decimal::new(85_920, 0),
                },
                TaxBracket {
                    up_to: None,
                    rate: Decimal::new(45, 2),
                    quick_deduction: Decimal::new(181_920, 0),
                },
            ],
        }
    }

    /// Validates the configuration values.
    ///
    /// The calculators never call this; they accept whatever configuration
    /// they are handed so that historical reconstruction with arbitrary
    /// figures stays possible. Callers assembling a custom configuration
    /// should call it once after construction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - a base range does not satisfy `0 < floor <= cap`
    /// - a contribution rate is outside `[0, 1)`
    /// - the standard monthly deduction is negative
    /// - the bracket table is empty, unsorted, bounded in its final
    ///   bracket, unbounded in an interior bracket, or its quick-deduction
    ///   constants break continuity at a boundary
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.si_floor <= Decimal::ZERO || self.si_floor > self.si_cap {
            return Err(ConfigError::InvalidSocialInsuranceBase {
                floor: self.si_floor,
                cap: self.si_cap,
            });
        }
        if self.hf_floor <= Decimal::ZERO || self.hf_floor > self.hf_cap {
            return Err(ConfigError::InvalidHousingFundBase {
                floor: self.hf_floor,
                cap: self.hf_cap,
            });
        }
        if self.pension_rate < Decimal::ZERO || self.pension_rate >= Decimal::ONE {
            return Err(ConfigError::InvalidPensionRate(self.pension_rate));
        }
        if self.medical_rate < Decimal::ZERO || self.medical_rate >= Decimal::ONE {
            return Err(ConfigError::InvalidMedicalRate(self.medical_rate));
        }
        if self.unemployment_rate < Decimal::ZERO || self.unemployment_rate >= Decimal::ONE {
            return Err(ConfigError::InvalidUnemploymentRate(self.unemployment_rate));
        }
        if self.default_hf_rate < Decimal::ZERO || self.default_hf_rate >= Decimal::ONE {
            return Err(ConfigError::InvalidHousingFundRate(self.default_hf_rate));
        }
        if self.standard_deduction_monthly < Decimal::ZERO {
            return Err(ConfigError::InvalidStandardDeduction(
                self.standard_deduction_monthly,
            ));
        }
        self.validate_brackets()
    }

    fn validate_brackets(&self) -> Result<(), ConfigError> {
        let Some(first) = self.brackets.first() else {
            return Err(ConfigError::EmptyBrackets);
        };

        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
                return Err(ConfigError::InvalidBracketRate {
                    index,
                    rate: bracket.rate,
                });
            }
        }

        // Continuity is anchored at zero income: the first bracket's
        // quick deduction must leave tax(0) = 0.
        if first.quick_deduction != Decimal::ZERO {
            return Err(ConfigError::DiscontinuousBracket {
                index: 0,
                bound: Decimal::ZERO,
                expected: Decimal::ZERO,
                actual: first.quick_deduction,
            });
        }

        for (index, pair) in self.brackets.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            let Some(bound) = prev.up_to else {
                return Err(ConfigError::UnboundedInteriorBracket(index));
            };
            if let Some(next_bound) = next.up_to {
                if next_bound <= bound {
                    return Err(ConfigError::UnsortedBrackets(index + 1));
                }
            }
            // tax = income * rate - quick must agree from both sides of
            // the boundary.
            let expected = bound * (next.rate - prev.rate) + prev.quick_deduction;
            if next.quick_deduction != expected {
                return Err(ConfigError::DiscontinuousBracket {
                    index: index + 1,
                    bound,
                    expected,
                    actual: next.quick_deduction,
                });
            }
        }

        match self.brackets.last() {
            Some(last) if last.up_to.is_some() => Err(ConfigError::BoundedFinalBracket),
            _ => Ok(()),
        }
    }
}
