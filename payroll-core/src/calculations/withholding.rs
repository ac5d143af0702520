//! Cumulative withholding calculations for monthly take-home pay.
//!
//! This module implements the cumulative withholding method used for wage
//! income: each month's tax is computed on year-to-date cumulative income
//! and deductions, then reduced by the tax already withheld in prior months
//! of the same calendar year.
//!
//! # Method structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Current month's social-insurance and housing-fund contributions |
//! | 2    | Year-to-date income and contribution totals (explicit history, or the flat assumption that every prior month looked like this one) |
//! | 3    | Year-to-date standard and special deductions |
//! | 4    | Cumulative taxable income (may be negative; not clamped here) |
//! | 5    | Cumulative tax payable from the bracket table |
//! | 6    | This month's tax: cumulative payable minus previously withheld, floored at zero |
//! | 7    | Take-home: gross minus contributions minus this month's tax |
//!
//! The calculator is deliberately permissive: out-of-range months, negative
//! salaries, and unusual rates are computed through without complaint so
//! that synthetic or historical data can be replayed. The single error is a
//! prior-pay history whose length does not cover exactly the months before
//! `month_index`.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::models::JurisdictionConfig;
//! use payroll_core::calculations::withholding::{MonthlyPayrollInput, WithholdingEngine};
//!
//! let config = JurisdictionConfig::shanghai_2024();
//! let engine = WithholdingEngine::new(&config);
//!
//! let mut input = MonthlyPayrollInput::new(dec!(30000), 1);
//! input.hf_rate = Some(dec!(0.07));
//! let result = engine.calculate(&input).unwrap();
//!
//! // Taxable: 30000 - 3150 (SI) - 2100 (HF) - 5000 (standard) = 19750
//! assert_eq!(result.tax_this_month, dec!(592.50));
//! assert_eq!(result.take_home, dec!(24157.50));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{max, round_half_up};
use crate::calculations::contributions::{
    HousingFundContribution, SocialInsuranceContribution, housing_fund, social_insurance,
};
use crate::models::JurisdictionConfig;

/// Errors that can occur during cumulative withholding calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WithholdingError {
    /// The explicit prior-month salary history does not cover exactly the
    /// months before `month_index`.
    #[error("prior-pay history length {actual} does not equal month_index - 1 for month {month_index}")]
    PriorPayLengthMismatch { month_index: u32, actual: usize },
}

/// Input for one month's withholding calculation.
///
/// Only the gross salary and the 1-based month index within the tax year
/// are required; every other field has a neutral default via
/// [`MonthlyPayrollInput::new`] and models one of the calculation's
/// independent optional parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayrollInput {
    /// Gross salary for the current month.
    pub gross_salary: Decimal,

    /// 1-based month index within the tax year (1-12 for real payrolls;
    /// other values are computed through without complaint).
    pub month_index: u32,

    /// Monthly total of special additional deductions (children's
    /// education, elderly care, housing and the like). Default 0.
    pub special_deductions_monthly: Decimal,

    /// Employer-reported social-insurance base, when it differs from the
    /// gross salary.
    pub si_base: Option<Decimal>,

    /// Employee housing-fund rate override. Falls back to the configured
    /// default when absent.
    pub hf_rate: Option<Decimal>,

    /// Employer-determined housing-fund base, when it differs from the
    /// gross salary.
    pub hf_base: Option<Decimal>,

    /// Actual gross salaries of the prior months of this tax year, oldest
    /// first. When absent, every prior month is assumed to have looked
    /// exactly like the current one (the flat assumption). When present,
    /// its length must equal `month_index - 1`.
    pub cumulative_prev_pay: Option<Vec<Decimal>>,

    /// Cumulative tax already withheld through the prior month. Default 0;
    /// a caller chaining months should feed the previous result's
    /// `cumulative_tax_payable` in here for exact figures.
    pub prev_withheld_tax: Decimal,
}

impl MonthlyPayrollInput {
    /// Creates an input with every optional parameter at its default.
    pub fn new(
        gross_salary: Decimal,
        month_index: u32,
    ) -> Self {
        Self {
            gross_salary,
            month_index,
            special_deductions_monthly: Decimal::ZERO,
            si_base: None,
            hf_rate: None,
            hf_base: None,
            cumulative_prev_pay: None,
            prev_withheld_tax: Decimal::ZERO,
        }
    }
}

/// Echo of the assumptions and bases a result was computed under, so a
/// caller can audit the figures or chain them into the next month's call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollAssumptions {
    /// The configured standard monthly deduction in effect.
    pub standard_deduction_monthly: Decimal,

    /// The special monthly deductions supplied by the caller.
    pub special_deductions_monthly: Decimal,

    /// The social-insurance base actually used this month, after clamping.
    pub si_base_used: Decimal,

    /// The housing-fund base actually used this month, after clamping.
    pub hf_base_used: Decimal,
}

/// Full breakdown of one month's payroll under the cumulative withholding
/// method.
///
/// This record is the calculation's external contract: every intermediate
/// figure a downstream consumer (or the next month's call) needs is
/// carried here, nested contribution breakdowns included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayrollResult {
    /// The 1-based month index the calculation was run for.
    pub month_index: u32,

    /// Gross salary for the month, echoed from the input.
    pub gross_salary: Decimal,

    /// Gross salary minus contributions and this month's tax.
    pub take_home: Decimal,

    /// Tax withheld for this month: cumulative tax payable minus the
    /// previously withheld amount, floored at zero.
    pub tax_this_month: Decimal,

    /// Year-to-date cumulative tax payable. Feed this into the next
    /// month's `prev_withheld_tax` when chaining calls.
    pub cumulative_tax_payable: Decimal,

    /// This month's pre-tax deductions (social insurance plus housing
    /// fund).
    pub pre_tax_deductions_this_month: Decimal,

    /// This month's social-insurance contribution breakdown.
    pub social_insurance: SocialInsuranceContribution,

    /// This month's housing-fund contribution.
    pub housing_fund: HousingFundContribution,

    /// Year-to-date cumulative taxable income, clamped to zero when
    /// deductions exceed income.
    pub cumulative_taxable_income: Decimal,

    /// The assumptions and bases the figures were computed under.
    pub assumptions: PayrollAssumptions,
}

/// Calculator for the cumulative withholding method.
///
/// Borrows a [`JurisdictionConfig`], which is treated as read-only; one
/// engine can serve any number of calls, concurrently if desired, since
/// all other state is per call.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::models::JurisdictionConfig;
/// use payroll_core::calculations::withholding::{MonthlyPayrollInput, WithholdingEngine};
///
/// let config = JurisdictionConfig::shanghai_2024();
/// let engine = WithholdingEngine::new(&config);
///
/// // Month 2 under the flat assumption, chaining month 1's cumulative
/// // tax payable (592.50) in as the previously withheld amount.
/// let mut input = MonthlyPayrollInput::new(dec!(30000), 2);
/// input.hf_rate = Some(dec!(0.07));
/// input.prev_withheld_tax = dec!(592.50);
/// let result = engine.calculate(&input).unwrap();
///
/// assert_eq!(result.cumulative_tax_payable, dec!(1430.00));
/// assert_eq!(result.tax_this_month, dec!(837.50));
/// ```
#[derive(Debug, Clone)]
pub struct WithholdingEngine<'a> {
    config: &'a JurisdictionConfig,
}

impl<'a> WithholdingEngine<'a> {
    /// Creates a new engine over the given configuration.
    pub fn new(config: &'a JurisdictionConfig) -> Self {
        Self { config }
    }

    /// Runs the full cumulative withholding calculation for one month.
    ///
    /// # Errors
    ///
    /// Returns [`WithholdingError::PriorPayLengthMismatch`] when
    /// `cumulative_prev_pay` is supplied but its length does not equal
    /// `month_index - 1`. No other input is rejected.
    pub fn calculate(
        &self,
        input: &MonthlyPayrollInput,
    ) -> Result<MonthlyPayrollResult, WithholdingError> {
        // Step 1: current month's contributions.
        let si = social_insurance(input.gross_salary, self.config, input.si_base);
        let hf = housing_fund(input.gross_salary, self.config, input.hf_rate, input.hf_base);

        // Step 2: year-to-date income and contribution totals.
        let (cum_income, prev_si_total, prev_hf_total) =
            self.cumulative_totals(input, si.total, hf.amount)?;
        let cum_si = prev_si_total + si.total;
        let cum_hf = prev_hf_total + hf.amount;

        // Step 3: year-to-date deductions.
        let months = Decimal::from(input.month_index);
        let cum_standard = self.config.standard_deduction_monthly * months;
        let cum_special = input.special_deductions_monthly * months;

        // Steps 4-6.
        let cum_taxable = cum_income - cum_si - cum_hf - cum_standard - cum_special;
        let cum_tax_payable = self.tax_on_cumulative_taxable(cum_taxable);
        let tax_this_month = self.tax_this_month(cum_tax_payable, input.prev_withheld_tax);

        // Step 7.
        let take_home = input.gross_salary - si.total - hf.amount - tax_this_month;

        debug!(
            month_index = input.month_index,
            cum_income = %cum_income,
            cum_taxable = %cum_taxable,
            cum_tax_payable = %cum_tax_payable,
            tax_this_month = %tax_this_month,
            "cumulative withholding figures"
        );

        let assumptions = PayrollAssumptions {
            standard_deduction_monthly: self.config.standard_deduction_monthly,
            special_deductions_monthly: input.special_deductions_monthly,
            si_base_used: si.base,
            hf_base_used: hf.base,
        };
        let pre_tax_deductions_this_month = si.total + hf.amount;

        Ok(MonthlyPayrollResult {
            month_index: input.month_index,
            gross_salary: input.gross_salary,
            take_home,
            tax_this_month,
            cumulative_tax_payable: cum_tax_payable,
            pre_tax_deductions_this_month,
            social_insurance: si,
            housing_fund: hf,
            cumulative_taxable_income: max(cum_taxable, Decimal::ZERO),
            assumptions,
        })
    }

    /// Year-to-date income and prior-month contribution totals.
    ///
    /// With an explicit history, each prior salary runs through the
    /// contribution calculators independently, under the same overrides as
    /// the current month. Without one, every prior month is assumed to
    /// have matched the current month exactly.
    fn cumulative_totals(
        &self,
        input: &MonthlyPayrollInput,
        current_si_total: Decimal,
        current_hf_amount: Decimal,
    ) -> Result<(Decimal, Decimal, Decimal), WithholdingError> {
        match &input.cumulative_prev_pay {
            None => {
                let prev_months = Decimal::from(input.month_index.saturating_sub(1));
                let cum_income = input.gross_salary * Decimal::from(input.month_index);
                Ok((
                    cum_income,
                    current_si_total * prev_months,
                    current_hf_amount * prev_months,
                ))
            }
            Some(prev_pay) => {
                if prev_pay.len() as i64 != i64::from(input.month_index) - 1 {
                    return Err(WithholdingError::PriorPayLengthMismatch {
                        month_index: input.month_index,
                        actual: prev_pay.len(),
                    });
                }

                let mut cum_income = input.gross_salary;
                let mut si_total = Decimal::ZERO;
                let mut hf_total = Decimal::ZERO;
                for &gross in prev_pay {
                    cum_income += gross;
                    si_total += social_insurance(gross, self.config, input.si_base).total;
                    hf_total +=
                        housing_fund(gross, self.config, input.hf_rate, input.hf_base).amount;
                }
                Ok((cum_income, si_total, hf_total))
            }
        }
    }

    /// Cumulative tax payable for a year-to-date taxable income.
    ///
    /// Negative taxable income yields zero tax, not a refund. The scan
    /// picks the first bracket whose upper bound covers the income; a
    /// well-formed table always matches because its final bracket is
    /// unbounded. A degenerate hand-built table with no matching bracket
    /// yields zero tax rather than a panic.
    fn tax_on_cumulative_taxable(
        &self,
        cum_taxable: Decimal,
    ) -> Decimal {
        let taxable = max(cum_taxable, Decimal::ZERO);

        let Some(bracket) = self.config.brackets.iter().find(|b| match b.up_to {
            Some(up_to) => taxable <= up_to,
            None => true,
        }) else {
            return Decimal::ZERO;
        };

        round_half_up(taxable * bracket.rate - bracket.quick_deduction)
    }

    /// This month's tax: the cumulative liability not yet withheld.
    ///
    /// Floored at zero; tax is never refunded mid-year through this
    /// calculation even when earlier withholding was an overestimate.
    fn tax_this_month(
        &self,
        cum_tax_payable: Decimal,
        prev_withheld_tax: Decimal,
    ) -> Decimal {
        max(cum_tax_payable - prev_withheld_tax, Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn config() -> JurisdictionConfig {
        JurisdictionConfig::shanghai_2024()
    }

    fn month_input(month_index: u32) -> MonthlyPayrollInput {
        let mut input = MonthlyPayrollInput::new(dec!(30000), month_index);
        input.hf_rate = Some(dec!(0.07));
        input
    }

    // =========================================================================
    // tax_on_cumulative_taxable tests
    // =========================================================================

    #[test]
    fn tax_is_zero_for_negative_taxable_income() {
        let config = config();
        let engine = WithholdingEngine::new(&config);

        let result = engine.tax_on_cumulative_taxable(dec!(-6963.62));

        assert_eq!(result, dec!(0.00));
    }

    #[test]
    fn tax_is_zero_at_zero_taxable_income() {
        let config = config();
        let engine = WithholdingEngine::new(&config);

        let result = engine.tax_on_cumulative_taxable(Decimal::ZERO);

        assert_eq!(result, dec!(0.00));
    }

    #[test]
    fn tax_in_first_bracket_has_no_quick_deduction() {
        let config = config();
        let engine = WithholdingEngine::new(&config);

        let result = engine.tax_on_cumulative_taxable(dec!(19750));

        // 19750 * 0.03 - 0 = 592.50
        assert_eq!(result, dec!(592.50));
    }

    #[test]
    fn tax_in_second_bracket_applies_quick_deduction() {
        let config = config();
        let engine = WithholdingEngine::new(&config);

        let result = engine.tax_on_cumulative_taxable(dec!(39500));

        // 39500 * 0.10 - 2520 = 1430
        assert_eq!(result, dec!(1430.00));
    }

    #[test]
    fn tax_in_top_bracket_uses_unbounded_final_row() {
        let config = config();
        let engine = WithholdingEngine::new(&config);

        let result = engine.tax_on_cumulative_taxable(dec!(1000000));

        // 1,000,000 * 0.45 - 181,920 = 268,080
        assert_eq!(result, dec!(268080.00));
    }

    #[test]
    fn tax_is_continuous_at_every_bracket_boundary() {
        let config = config();
        let engine = WithholdingEngine::new(&config);

        for pair in config.brackets.windows(2) {
            let bound = pair[0].up_to.unwrap();
            let from_above = bound * pair[1].rate - pair[1].quick_deduction;

            assert_eq!(engine.tax_on_cumulative_taxable(bound), from_above);
        }
    }

    #[test]
    fn tax_is_zero_for_degenerate_empty_bracket_table() {
        let mut config = config();
        config.brackets.clear();
        let engine = WithholdingEngine::new(&config);

        let result = engine.tax_on_cumulative_taxable(dec!(100000));

        assert_eq!(result, dec!(0.00));
    }

    // =========================================================================
    // tax_this_month tests
    // =========================================================================

    #[test]
    fn tax_this_month_subtracts_previously_withheld() {
        let config = config();
        let engine = WithholdingEngine::new(&config);

        let result = engine.tax_this_month(dec!(1430.00), dec!(592.50));

        assert_eq!(result, dec!(837.50));
    }

    #[test]
    fn tax_this_month_is_floored_at_zero() {
        let config = config();
        let engine = WithholdingEngine::new(&config);

        let result = engine.tax_this_month(dec!(1430.00), dec!(99999.00));

        assert_eq!(result, dec!(0.00));
    }

    // =========================================================================
    // calculate: first-month scenario
    // =========================================================================

    #[test]
    fn first_month_breakdown_for_thirty_thousand() {
        let config = config();
        let engine = WithholdingEngine::new(&config);

        let result = engine.calculate(&month_input(1)).unwrap();

        assert_eq!(result.month_index, 1);
        assert_eq!(result.gross_salary, dec!(30000));
        assert_eq!(result.social_insurance.base, dec!(30000));
        assert_eq!(result.social_insurance.total, dec!(3150.00));
        assert_eq!(result.housing_fund.amount, dec!(2100.00));
        assert_eq!(result.pre_tax_deductions_this_month, dec!(5250.00));
        // 30000 - 3150 - 2100 - 5000 = 19750
        assert_eq!(result.cumulative_taxable_income, dec!(19750.00));
        assert_eq!(result.cumulative_tax_payable, dec!(592.50));
        assert_eq!(result.tax_this_month, dec!(592.50));
        assert_eq!(result.take_home, dec!(24157.50));
        assert_eq!(result.assumptions.standard_deduction_monthly, dec!(5000));
        assert_eq!(result.assumptions.special_deductions_monthly, dec!(0));
        assert_eq!(result.assumptions.si_base_used, dec!(30000));
        assert_eq!(result.assumptions.hf_base_used, dec!(30000));
    }

    #[test]
    fn special_deductions_reduce_taxable_income() {
        let config = config();
        let engine = WithholdingEngine::new(&config);
        let mut input = month_input(1);
        input.special_deductions_monthly = dec!(1500);

        let result = engine.calculate(&input).unwrap();

        // 19750 - 1500 = 18250; 18250 * 0.03 = 547.50
        assert_eq!(result.cumulative_taxable_income, dec!(18250.00));
        assert_eq!(result.tax_this_month, dec!(547.50));
        assert_eq!(result.take_home, dec!(24202.50));
    }

    #[test]
    fn base_overrides_flow_into_contributions_and_assumptions() {
        let config = config();
        let engine = WithholdingEngine::new(&config);
        let mut input = month_input(1);
        input.si_base = Some(dec!(10000));
        input.hf_base = Some(dec!(20000));

        let result = engine.calculate(&input).unwrap();

        assert_eq!(result.social_insurance.base, dec!(10000));
        assert_eq!(result.housing_fund.base, dec!(20000));
        assert_eq!(result.assumptions.si_base_used, dec!(10000));
        assert_eq!(result.assumptions.hf_base_used, dec!(20000));
    }

    // =========================================================================
    // calculate: second-month scenarios
    // =========================================================================

    #[test]
    fn second_month_with_chained_prior_withholding() {
        let config = config();
        let engine = WithholdingEngine::new(&config);
        let mut input = month_input(2);
        input.prev_withheld_tax = dec!(592.50);

        let result = engine.calculate(&input).unwrap();

        // Cumulative: income 60000, SI 6300, HF 4200, standard 10000.
        // Taxable 39500 falls in the 10% bracket: 3950 - 2520 = 1430.
        assert_eq!(result.cumulative_taxable_income, dec!(39500.00));
        assert_eq!(result.cumulative_tax_payable, dec!(1430.00));
        assert_eq!(result.tax_this_month, dec!(837.50));
        assert_eq!(result.take_home, dec!(23912.50));
    }

    #[test]
    fn second_month_without_prior_withholding_over_withholds() {
        // Omitting prev_withheld_tax in a flat-assumption call charges the
        // whole cumulative liability this month; a known approximation
        // artifact of the defaulted anchor.
        let config = config();
        let engine = WithholdingEngine::new(&config);

        let result = engine.calculate(&month_input(2)).unwrap();

        assert_eq!(result.cumulative_tax_payable, dec!(1430.00));
        assert_eq!(result.tax_this_month, dec!(1430.00));
    }

    // =========================================================================
    // calculate: explicit history
    // =========================================================================

    #[test]
    fn flat_assumption_matches_explicit_identical_history() {
        let config = config();
        let engine = WithholdingEngine::new(&config);

        let flat = engine.calculate(&month_input(5)).unwrap();

        let mut explicit_input = month_input(5);
        explicit_input.cumulative_prev_pay = Some(vec![dec!(30000); 4]);
        let explicit = engine.calculate(&explicit_input).unwrap();

        assert_eq!(flat, explicit);
    }

    #[test]
    fn explicit_history_uses_each_months_actual_salary() {
        let config = config();
        let engine = WithholdingEngine::new(&config);
        let mut input = month_input(3);
        input.cumulative_prev_pay = Some(vec![dec!(20000), dec!(25000)]);

        let result = engine.calculate(&input).unwrap();

        // Income: 20000 + 25000 + 30000 = 75000
        // SI: 2100 + 2625 + 3150 = 7875; HF: 1400 + 1750 + 2100 = 5250
        // Taxable: 75000 - 7875 - 5250 - 15000 = 46875
        // Tax: 46875 * 0.10 - 2520 = 2167.50
        assert_eq!(result.cumulative_taxable_income, dec!(46875.00));
        assert_eq!(result.cumulative_tax_payable, dec!(2167.50));
    }

    #[test]
    fn history_length_mismatch_is_rejected() {
        let config = config();
        let engine = WithholdingEngine::new(&config);
        let mut input = month_input(3);
        input.cumulative_prev_pay = Some(vec![dec!(30000)]);

        let result = engine.calculate(&input);

        assert_eq!(
            result,
            Err(WithholdingError::PriorPayLengthMismatch {
                month_index: 3,
                actual: 1,
            })
        );
    }

    #[test]
    fn first_month_rejects_any_nonempty_history() {
        let config = config();
        let engine = WithholdingEngine::new(&config);
        let mut input = month_input(1);
        input.cumulative_prev_pay = Some(vec![dec!(30000)]);

        let result = engine.calculate(&input);

        assert_eq!(
            result,
            Err(WithholdingError::PriorPayLengthMismatch {
                month_index: 1,
                actual: 1,
            })
        );
    }

    #[test]
    fn first_month_accepts_empty_history() {
        let config = config();
        let engine = WithholdingEngine::new(&config);
        let mut input = month_input(1);
        input.cumulative_prev_pay = Some(Vec::new());

        let explicit = engine.calculate(&input).unwrap();
        let flat = engine.calculate(&month_input(1)).unwrap();

        assert_eq!(explicit, flat);
    }

    #[test]
    fn month_zero_rejects_even_an_empty_history() {
        // month_index - 1 is -1 for month 0; no list length can match.
        let config = config();
        let engine = WithholdingEngine::new(&config);
        let mut input = month_input(0);
        input.cumulative_prev_pay = Some(Vec::new());

        let result = engine.calculate(&input);

        assert_eq!(
            result,
            Err(WithholdingError::PriorPayLengthMismatch {
                month_index: 0,
                actual: 0,
            })
        );
    }

    // =========================================================================
    // calculate: permissive inputs
    // =========================================================================

    #[test]
    fn negative_salary_is_computed_through() {
        let config = config();
        let engine = WithholdingEngine::new(&config);
        let mut input = MonthlyPayrollInput::new(dec!(-1000), 1);
        input.hf_rate = Some(dec!(0.07));

        let result = engine.calculate(&input).unwrap();

        // Both bases clamp to their floors; deductions exceed income.
        assert_eq!(result.social_insurance.base, dec!(7384));
        assert_eq!(result.housing_fund.base, dec!(2690));
        assert_eq!(result.cumulative_taxable_income, dec!(0.00));
        assert_eq!(result.tax_this_month, dec!(0.00));
        assert_eq!(result.take_home, dec!(-1963.62));
    }

    #[test]
    fn month_zero_flat_assumption_is_computed_through() {
        let config = config();
        let engine = WithholdingEngine::new(&config);

        let result = engine.calculate(&month_input(0)).unwrap();

        // Zero months of income or deductions; only the current month's
        // contributions are charged.
        assert_eq!(result.cumulative_taxable_income, dec!(0.00));
        assert_eq!(result.tax_this_month, dec!(0.00));
        assert_eq!(result.take_home, dec!(24750.00));
    }

    #[test]
    fn out_of_range_month_is_computed_through() {
        let config = config();
        let engine = WithholdingEngine::new(&config);

        let result = engine.calculate(&month_input(13)).unwrap();

        // 13 * 19750 = 256750, in the 20% bracket: 51350 - 16920 = 34430.
        assert_eq!(result.cumulative_taxable_income, dec!(256750.00));
        assert_eq!(result.cumulative_tax_payable, dec!(34430.00));
    }

    #[test]
    fn monthly_tax_is_never_negative() {
        let config = config();
        let engine = WithholdingEngine::new(&config);
        let mut input = month_input(1);
        input.prev_withheld_tax = dec!(1000000);

        let result = engine.calculate(&input).unwrap();

        assert_eq!(result.tax_this_month, dec!(0.00));
    }
}
