use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tables::TAX_YEAR;

/// All monetary values (HK$). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.17 = 17%). Never as percentages.
pub type Rate = Decimal;

/// Tax payable under a filing scenario.
///
/// `NotApplicable` stands in for scenarios that do not exist for the
/// household (joint options when unmarried). It orders above every payable
/// amount, so a minimum scan never selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Liability {
    Payable(Money),
    NotApplicable,
}

impl Liability {
    /// The payable amount, or `None` when the scenario does not apply.
    pub fn amount(&self) -> Option<Money> {
        match self {
            Liability::Payable(amount) => Some(*amount),
            Liability::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Liability::Payable(_))
    }
}

impl Default for Liability {
    fn default() -> Self {
        Liability::Payable(Decimal::ZERO)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub tax_year: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            tax_year: TAX_YEAR.to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
