pub mod allowances;
pub mod deductions;
pub mod profits;
pub mod progressive;
pub mod property;
pub mod salaries;
pub mod standard;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::report::DerivationLog;
use crate::tables::TaxBand;
use crate::types::Money;

/// Tax produced by one calculator together with its derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Computation {
    pub tax: Money,
    pub report: DerivationLog,
}

impl Computation {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Portion of `income` falling into each band, with the tax on it.
/// Bands after the income is exhausted are omitted.
pub(crate) fn slice_bands(income: Money, bands: &[TaxBand]) -> Vec<(TaxBand, Money, Money)> {
    let mut slices = Vec::with_capacity(bands.len());
    let mut remaining = income;

    for band in bands {
        if remaining <= Decimal::ZERO {
            break;
        }
        let taxable = match band.limit {
            Some(limit) => remaining.min(limit),
            None => remaining,
        };
        slices.push((*band, taxable, taxable * band.rate));
        remaining -= taxable;
    }

    slices
}
