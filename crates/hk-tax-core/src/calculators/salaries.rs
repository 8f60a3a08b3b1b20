use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::allowances::{AllowanceSheet, DependantCounts};
use super::deductions::{donation_cap, mandatory_contribution, CappedDeductions};
use super::progressive::progressive_tax;
use super::standard::standard_tax;
use super::Computation;
use crate::profile::PersonProfile;
use crate::report::DerivationLog;

/// Which member of the household a computation is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Taxpayer {
    /// The filer (labelled "Self")
    Principal,
    Spouse,
}

impl Taxpayer {
    pub fn label(self) -> &'static str {
        match self {
            Taxpayer::Principal => "Self",
            Taxpayer::Spouse => "Spouse",
        }
    }
}

/// Salaries tax for one taxpayer: the lower of progressive tax on net
/// chargeable income and standard-rate tax on net income.
///
/// `other_has_income` decides between the married person's allowance and
/// the basic allowance when `married`. The single parent allowance is only
/// claimed by the principal taxpayer.
pub fn salaries_tax(
    profile: &PersonProfile,
    taxpayer: Taxpayer,
    married: bool,
    other_has_income: bool,
) -> Computation {
    let role = taxpayer.label();
    let mut report = DerivationLog::new();
    report.heading(format!("{role} Salaries Tax"));

    let income = profile.income.salaries_income();
    report.entry("Total Salary & Other Income", income);

    if income <= Decimal::ZERO {
        report.note("No salaries income.");
        return Computation {
            tax: Decimal::ZERO,
            report,
        };
    }

    // Outgoings come off first so the donation ceiling sees income net of them.
    let outgoings = profile.deductions.outgoings_and_expenses;
    if outgoings > Decimal::ZERO {
        report.detail_less("Less: Outgoings & Expenses", outgoings);
    }

    let mandatory = mandatory_contribution(profile);
    report.detail_less("Less: Mandatory MPF", mandatory);

    let donations = profile
        .deductions
        .approved_charitable_donations
        .min(donation_cap(
            income + profile.income.business_profit - outgoings,
        ));

    let capped = CappedDeductions::apply(&profile.deductions, profile.allowances.has_newborn());
    let itemised = [
        ("Less: Donations", donations),
        ("Less: MPF TVC", capped.voluntary_contributions),
        ("Less: Self Education", capped.self_education),
        ("Less: Home Loan Interest", capped.home_loan_interest),
        ("Less: Domestic Rent", capped.domestic_rent),
        ("Less: Elderly Residential Care", capped.residential_care),
        ("Less: VHIS Premiums", capped.qualifying_premiums),
        (
            "Less: Assisted Reproductive Services",
            capped.assisted_reproductive_services,
        ),
    ];
    for (label, amount) in itemised {
        if amount > Decimal::ZERO {
            report.detail_less(label, amount);
        }
    }

    let total_deductions = outgoings + mandatory + donations + capped.total();
    let net_assessable = (income - total_deductions).max(Decimal::ZERO);
    report.entry("Net Assessable Income", net_assessable);

    let mut sheet = AllowanceSheet::open(&mut report);
    sheet.personal(married && !other_has_income);
    sheet.dependants(&DependantCounts::of(&profile.allowances));
    sheet.personal_disability(
        "Personal Disability Allowance",
        profile.allowances.personal_disability,
    );
    sheet.single_parent(taxpayer == Taxpayer::Principal && profile.allowances.single_parent);
    let total_allowances = sheet.close();

    let net_chargeable = (net_assessable - total_allowances).max(Decimal::ZERO);
    report.entry("Net Chargeable Income", net_chargeable);

    let progressive = progressive_tax(net_chargeable);
    let standard = standard_tax((income - mandatory - outgoings).max(Decimal::ZERO));

    let chosen = if standard.tax < progressive.tax {
        report.entry("Using Standard Rate (Lower)", standard.tax);
        standard
    } else {
        report.entry("Using Progressive Rate (Lower)", progressive.tax);
        progressive
    };
    let tax = chosen.tax;
    report.append(chosen.report);
    report.total(format!("{role} Tax Payable"), tax);

    Computation { tax, report }
}
