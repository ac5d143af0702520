use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the annual comprehensive-income bracket table.
///
/// `up_to` is the cumulative-income upper bound; `None` marks the unbounded
/// final bracket, so the bracket scan never falls off the end of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub up_to: Option<Decimal>,
    pub rate: Decimal,
    pub quick_deduction: Decimal,
}
