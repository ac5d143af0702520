//! Payroll calculation modules for the cumulative withholding method.
//!
//! This module provides the contribution calculators and the cumulative
//! withholding engine, plus the numeric helpers they share.

pub mod common;
pub mod contributions;
pub mod withholding;

pub use contributions::{
    HousingFundContribution, SocialInsuranceContribution, housing_fund, social_insurance,
};
pub use withholding::{
    MonthlyPayrollInput, MonthlyPayrollResult, PayrollAssumptions, WithholdingEngine,
    WithholdingError,
};
