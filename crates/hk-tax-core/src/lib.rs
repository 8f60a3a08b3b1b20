pub mod error;
pub mod i18n;
pub mod profile;
pub mod report;
pub mod tables;
pub mod types;

pub mod assessment;
pub mod calculators;

#[cfg(feature = "advice")]
pub mod advice;

pub use assessment::optimizer::{calculate_tax_liability, optimize_household};
pub use assessment::render::{render_report, ScenarioSelection};
pub use assessment::{FilingScenario, OptimizationResult, TaxResult};
pub use error::HkTaxError;
pub use i18n::Language;
pub use profile::{Allowances, Deductions, HouseholdInput, IncomeSource, PersonProfile};
pub use types::*;

/// Standard result type for all hk-tax operations
pub type HkTaxResult<T> = Result<T, HkTaxError>;
