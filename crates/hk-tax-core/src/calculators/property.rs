use rust_decimal::Decimal;

use super::salaries::Taxpayer;
use super::Computation;
use crate::report::{format_rate, DerivationLog};
use crate::tables::{PROPERTY_STATUTORY_ALLOWANCE, PROPERTY_TAX_RATE};
use crate::types::Money;

/// Property tax on let property at the standard rate after rates and the
/// 20% statutory repairs allowance. No rental income yields no derivation.
pub fn property_tax(rental_income: Money, rates_paid: Money, taxpayer: Taxpayer) -> Computation {
    if rental_income <= Decimal::ZERO {
        return Computation::zero();
    }

    let mut report = DerivationLog::new();
    report.heading(format!("{} Property Tax", taxpayer.label()));
    report.entry("Gross Rental Income", rental_income);
    report.less("Less: Rates Paid", rates_paid);

    let assessable_value = (rental_income - rates_paid).max(Decimal::ZERO);
    let statutory_allowance = assessable_value * PROPERTY_STATUTORY_ALLOWANCE;
    report.entry("Assessable Value", assessable_value);
    report.less(
        format!(
            "Less: {} Statutory Allowance",
            format_rate(PROPERTY_STATUTORY_ALLOWANCE)
        ),
        statutory_allowance,
    );

    let net_assessable_value = assessable_value - statutory_allowance;
    report.entry("Net Assessable Value", net_assessable_value);

    let tax = net_assessable_value * PROPERTY_TAX_RATE;
    report.entry(format!("Tax @ {}", format_rate(PROPERTY_TAX_RATE)), tax);

    Computation { tax, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_no_rental_no_report() {
        let c = property_tax(Decimal::ZERO, dec!(5_000), Taxpayer::Principal);
        assert_eq!(c, Computation::zero());
        assert!(c.report.is_empty());
    }

    #[test]
    fn test_rental_with_rates() {
        // (240k - 10k) * 80% * 15%
        let c = property_tax(dec!(240_000), dec!(10_000), Taxpayer::Spouse);
        assert_eq!(c.tax, dec!(27_600));
        assert_eq!(
            c.report.render(),
            vec![
                "### Spouse Property Tax",
                "Gross Rental Income: HK$240,000",
                "Less: Rates Paid: -HK$10,000",
                "Assessable Value: HK$230,000",
                "Less: 20% Statutory Allowance: -HK$46,000",
                "Net Assessable Value: HK$184,000",
                "Tax @ 15%: HK$27,600",
            ]
        );
    }

    #[test]
    fn test_rates_exceeding_rent_floor_at_zero() {
        let c = property_tax(dec!(10_000), dec!(20_000), Taxpayer::Principal);
        assert_eq!(c.tax, Decimal::ZERO);
    }
}
