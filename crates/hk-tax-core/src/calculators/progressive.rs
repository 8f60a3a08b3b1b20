use rust_decimal::Decimal;

use super::{slice_bands, Computation};
use crate::report::{format_hkd, format_rate, DerivationLog};
use crate::tables::PROGRESSIVE_BANDS;
use crate::types::Money;

/// Progressive salaries tax on net chargeable income.
///
/// Walks the marginal bands (2%, 6%, 10%, 14% on successive HK$50,000
/// slices, 17% on the remainder) and logs one line per band consumed.
pub fn progressive_tax(net_chargeable_income: Money) -> Computation {
    let mut report = DerivationLog::new();

    if net_chargeable_income <= Decimal::ZERO {
        report.entry("Net Chargeable Income is 0 or less. Tax", Decimal::ZERO);
        return Computation {
            tax: Decimal::ZERO,
            report,
        };
    }

    report.entry("Calculate Progressive Tax on", net_chargeable_income);

    let mut tax = Decimal::ZERO;
    for (band, _, band_tax) in slice_bands(net_chargeable_income, &PROGRESSIVE_BANDS) {
        tax += band_tax;
        match band.limit {
            Some(limit) => report.detail(
                format!("First {} @ {}", format_hkd(limit), format_rate(band.rate)),
                band_tax,
            ),
            None => report.detail(format!("Remainder @ {}", format_rate(band.rate)), band_tax),
        }
    }

    report.entry("Total Progressive Tax", tax);
    Computation { tax, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_income_single_line() {
        let c = progressive_tax(Decimal::ZERO);
        assert_eq!(c.tax, Decimal::ZERO);
        assert_eq!(
            c.report.render(),
            vec!["Net Chargeable Income is 0 or less. Tax: HK$0"]
        );
    }

    #[test]
    fn test_350k_all_bands() {
        let c = progressive_tax(dec!(350_000));
        assert_eq!(c.tax, dec!(41_500));
        assert_eq!(
            c.report.render(),
            vec![
                "Calculate Progressive Tax on: HK$350,000",
                "  First HK$50,000 @ 2%: HK$1,000",
                "  First HK$50,000 @ 6%: HK$3,000",
                "  First HK$50,000 @ 10%: HK$5,000",
                "  First HK$50,000 @ 14%: HK$7,000",
                "  Remainder @ 17%: HK$25,500",
                "Total Progressive Tax: HK$41,500",
            ]
        );
    }

    #[test]
    fn test_partial_band() {
        // 50k @ 2% + 25k @ 6%
        let c = progressive_tax(dec!(75_000));
        assert_eq!(c.tax, dec!(2_500));
        assert_eq!(c.report.lines().len(), 4);
    }
}
