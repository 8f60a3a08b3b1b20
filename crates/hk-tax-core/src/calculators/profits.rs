use rust_decimal::Decimal;

use super::salaries::Taxpayer;
use super::{slice_bands, Computation};
use crate::report::{format_hkd, format_rate, DerivationLog};
use crate::tables::PROFITS_TAX_BANDS;
use crate::types::Money;

/// Two-tier profits tax for an unincorporated business: 7.5% on the first
/// HK$2,000,000, 15% on the remainder.
pub fn profits_tax(profit: Money, taxpayer: Taxpayer) -> Computation {
    if profit <= Decimal::ZERO {
        return Computation::zero();
    }

    let mut report = DerivationLog::new();
    report.heading(format!("{} Profits Tax", taxpayer.label()));
    report.entry("Assessable Profit", profit);

    let mut tax = Decimal::ZERO;
    for (band, taxable, band_tax) in slice_bands(profit, &PROFITS_TAX_BANDS) {
        tax += band_tax;
        let label = match band.limit {
            Some(_) => format!("First {} @ {}", format_hkd(taxable), format_rate(band.rate)),
            None => format!("Remainder {} @ {}", format_hkd(taxable), format_rate(band.rate)),
        };
        report.detail(label, band_tax);
    }

    report.entry("Total Profits Tax", tax);
    Computation { tax, report }
}
