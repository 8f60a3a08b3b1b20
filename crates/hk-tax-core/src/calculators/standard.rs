use rust_decimal::Decimal;

use super::{slice_bands, Computation};
use crate::report::{format_hkd, format_rate, DerivationLog};
use crate::tables::STANDARD_RATE_BANDS;
use crate::types::Money;

/// Two-tier standard rate: 15% on the first HK$5,000,000 of net income,
/// 16% on the remainder.
///
/// `net_income` is income after mandatory contributions and outgoings but
/// before allowances, which never reduce the standard-rate charge.
pub fn standard_tax(net_income: Money) -> Computation {
    let mut report = DerivationLog::new();
    report.note("Standard Rate Calculation (2-Tier):");

    let mut tax = Decimal::ZERO;
    for (band, taxable, band_tax) in slice_bands(net_income, &STANDARD_RATE_BANDS) {
        tax += band_tax;
        let label = match band.limit {
            Some(_) => format!("First {} @ {}", format_hkd(taxable), format_rate(band.rate)),
            None => format!("Remainder {} @ {}", format_hkd(taxable), format_rate(band.rate)),
        };
        report.detail(label, band_tax);
    }

    Computation { tax, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_single_tier() {
        let c = standard_tax(dec!(482_000));
        assert_eq!(c.tax, dec!(72_300));
        assert_eq!(c.report.lines().len(), 2);
    }

    #[test]
    fn test_two_tiers() {
        // 5M @ 15% + 1M @ 16%
        let c = standard_tax(dec!(6_000_000));
        assert_eq!(c.tax, dec!(910_000));
        assert_eq!(
            c.report.render()[2],
            "  Remainder HK$1,000,000 @ 16%: HK$160,000"
        );
    }

    #[test]
    fn test_zero_income_header_only() {
        let c = standard_tax(Decimal::ZERO);
        assert_eq!(c.tax, Decimal::ZERO);
        assert_eq!(c.report.render(), vec!["Standard Rate Calculation (2-Tier):"]);
    }
}
