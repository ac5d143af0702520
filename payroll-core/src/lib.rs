pub mod calculations;
pub mod models;

pub use calculations::{
    HousingFundContribution, MonthlyPayrollInput, MonthlyPayrollResult, PayrollAssumptions,
    SocialInsuranceContribution, WithholdingEngine, WithholdingError, housing_fund,
    social_insurance,
};
pub use models::*;
