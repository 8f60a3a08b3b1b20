//! Personal assessment: salaries, business profit and net property income
//! pooled into one progressive computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculators::allowances::{AllowanceSheet, DependantCounts};
use crate::calculators::deductions::{donation_cap, mandatory_contribution, CappedDeductions};
use crate::calculators::progressive::progressive_tax;
use crate::calculators::Computation;
use crate::profile::PersonProfile;
use crate::report::{format_hkd, format_rate, DerivationLog};
use crate::tables::PERSONAL_ASSESSMENT_RENTAL_FACTOR;
use crate::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentMode {
    /// Only the primary profile, basic allowance
    Single,
    /// Both spouses pooled, married person's allowance
    Joint,
}

/// Run personal assessment over `primary` (and `other` in joint mode).
/// `title` is the section heading of the derivation.
pub fn personal_assessment(
    primary: &PersonProfile,
    other: &PersonProfile,
    mode: AssessmentMode,
    title: &str,
) -> Computation {
    let members: Vec<&PersonProfile> = match mode {
        AssessmentMode::Single => vec![primary],
        AssessmentMode::Joint => vec![primary, other],
    };
    let sum = |f: fn(&PersonProfile) -> Money| -> Money { members.iter().map(|p| f(p)).sum() };

    let mut report = DerivationLog::new();
    report.heading(title);

    let salaries = sum(|p| p.income.salaries_income());
    let profit = sum(|p| p.income.business_profit);
    let gross_rental = sum(|p| p.income.rental_income);
    let rates = sum(|p| p.income.rental_rates_paid);
    report.entry("Total Salary Income", salaries);
    report.entry("Total Business Profit", profit);

    let net_rental =
        (gross_rental - rates).max(Decimal::ZERO) * PERSONAL_ASSESSMENT_RENTAL_FACTOR;
    if gross_rental > Decimal::ZERO {
        report.entry("Property Income (NAV)", net_rental);
        report.detail_note(format!(
            "(Gross {} - Rates {}) x {}",
            format_hkd(gross_rental),
            format_hkd(rates),
            format_rate(PERSONAL_ASSESSMENT_RENTAL_FACTOR)
        ));
    }

    let outgoings = sum(|p| p.deductions.outgoings_and_expenses);
    if outgoings > Decimal::ZERO {
        report.less("Less: Outgoings & Expenses", outgoings);
    }

    let assessable = salaries + profit + net_rental - outgoings;
    report.entry("Total Assessable Income (after outgoings)", assessable);

    let mandatory = sum(mandatory_contribution);
    if mandatory > Decimal::ZERO {
        report.less("Less: MPF (Mandatory)", mandatory);
    }

    let newborn = members.iter().any(|p| p.allowances.has_newborn());
    let capped: Vec<CappedDeductions> = members
        .iter()
        .map(|p| CappedDeductions::apply(&p.deductions, newborn))
        .collect();

    let home_loan: Money = capped.iter().map(|c| c.home_loan_interest).sum();
    if home_loan > Decimal::ZERO {
        report.less("Less: Home Loan Interest", home_loan);
    }

    let other_deductions: Money = capped.iter().map(CappedDeductions::other_than_home_loan).sum();
    if other_deductions > Decimal::ZERO {
        report.less(
            "Less: Other Deductions (TVC/Edu/Rent/Care/VHIS/ARS)",
            other_deductions,
        );
    }

    let donations = sum(|p| p.deductions.approved_charitable_donations).min(donation_cap(assessable));
    if donations > Decimal::ZERO {
        report.less("Less: Donations", donations);
    }

    let total_deductions = mandatory + home_loan + other_deductions + donations;
    report.less("Total Deductions", total_deductions);

    let mut sheet = AllowanceSheet::open(&mut report);
    match mode {
        AssessmentMode::Joint => {
            sheet.personal(true);
            sheet.dependants(&DependantCounts::combined(
                &primary.allowances,
                &other.allowances,
            ));
            sheet.personal_disability(
                "Personal Disability (Self)",
                primary.allowances.personal_disability,
            );
            sheet.personal_disability(
                "Personal Disability (Spouse)",
                other.allowances.personal_disability,
            );
        }
        AssessmentMode::Single => {
            sheet.personal(false);
            sheet.dependants(&DependantCounts::of(&primary.allowances));
            sheet.personal_disability(
                "Personal Disability Allowance",
                primary.allowances.personal_disability,
            );
            sheet.single_parent(primary.allowances.single_parent);
        }
    }
    let total_allowances = sheet.close();

    let net_chargeable = (assessable - total_deductions - total_allowances).max(Decimal::ZERO);
    report.entry("Net Chargeable Income", net_chargeable);

    let progressive = progressive_tax(net_chargeable);
    let tax = progressive.tax;
    report.append(progressive.report);

    Computation { tax, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn earner(salary: Money) -> PersonProfile {
        let mut p = PersonProfile::default();
        p.income.salary = salary;
        p
    }

    #[test]
    fn test_single_mode_ignores_other_profile() {
        let me = earner(dec!(500_000));
        let alone = personal_assessment(&me, &PersonProfile::default(), AssessmentMode::Single, "PA");
        let with_rich_spouse =
            personal_assessment(&me, &earner(dec!(9_000_000)), AssessmentMode::Single, "PA");
        assert_eq!(alone.tax, dec!(41_500));
        assert_eq!(alone.tax, with_rich_spouse.tax);
    }

    #[test]
    fn test_rental_multiplier_line() {
        let mut p = PersonProfile::default();
        p.income.rental_income = dec!(240_000);
        p.income.rental_rates_paid = dec!(10_000);
        let c = personal_assessment(&p, &PersonProfile::default(), AssessmentMode::Single, "PA");
        let lines = c.report.render();
        assert!(lines.contains(&"Property Income (NAV): HK$184,000".to_string()));
        assert!(lines.contains(&"  (Gross HK$240,000 - Rates HK$10,000) x 80%".to_string()));
        // 184k - 132k basic = 52k chargeable
        assert_eq!(c.tax, dec!(1_120));
    }

    #[test]
    fn test_joint_mode_pools_allowances() {
        let mut me = earner(dec!(400_000));
        me.allowances.children_count = 1;
        me.allowances.personal_disability = true;
        let mut spouse = earner(dec!(300_000));
        spouse.allowances.children_count = 1;
        spouse.allowances.disabled_dependents = 1;
        spouse.allowances.personal_disability = true;

        let c = personal_assessment(&me, &spouse, AssessmentMode::Joint, "Personal Assessment (Joint)");
        let lines = c.report.render();
        assert!(lines.contains(&"  Married Person's Allowance: -HK$264,000".to_string()));
        assert!(lines.contains(&"  Child Allowance (2): -HK$260,000".to_string()));
        assert!(lines.contains(&"  Disabled Dependent Allowance: -HK$75,000".to_string()));
        assert!(lines.contains(&"  Personal Disability (Spouse): -HK$75,000".to_string()));
        // 700k - 33k MPF - 749k allowances
        assert_eq!(c.tax, Decimal::ZERO);
    }

    #[test]
    fn test_joint_mode_skips_single_parent() {
        let mut me = earner(dec!(800_000));
        me.allowances.single_parent = true;
        let joint = personal_assessment(&me, &PersonProfile::default(), AssessmentMode::Joint, "PA");
        assert!(!joint
            .report
            .render()
            .iter()
            .any(|l| l.contains("Single Parent")));
    }

    #[test]
    fn test_donation_cap_uses_pooled_assessable_income() {
        let mut me = earner(dec!(100_000));
        me.income.business_profit = dec!(100_000);
        me.deductions.approved_charitable_donations = dec!(1_000_000);
        let c = personal_assessment(&me, &PersonProfile::default(), AssessmentMode::Single, "PA");
        assert!(c
            .report
            .render()
            .contains(&"Less: Donations: -HK$70,000".to_string()));
    }
}
