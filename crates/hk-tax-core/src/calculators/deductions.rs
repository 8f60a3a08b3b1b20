//! Deduction capping shared by salaries tax and personal assessment.

use rust_decimal::Decimal;

use crate::profile::{Deductions, PersonProfile};
use crate::tables::caps;
use crate::types::Money;

/// Mandatory MPF contribution: a non-zero explicit override when given,
/// otherwise 5% of salary up to the statutory maximum. An override of zero
/// counts as not supplied.
pub fn mandatory_contribution(profile: &PersonProfile) -> Money {
    match profile.deductions.mpf_mandatory_override {
        Some(amount) if !amount.is_zero() => amount,
        _ => (profile.income.salary * caps::MPF_MANDATORY_RATE)
            .min(caps::MPF_MANDATORY)
            .max(Decimal::ZERO),
    }
}

/// Ceiling for approved charitable donations: 35% of the income base,
/// never negative.
pub fn donation_cap(income_base: Money) -> Money {
    income_base.max(Decimal::ZERO) * caps::CHARITABLE_PERCENTAGE
}

/// Each capped deduction of one person, after applying its ceiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CappedDeductions {
    pub voluntary_contributions: Money,
    pub self_education: Money,
    pub home_loan_interest: Money,
    pub domestic_rent: Money,
    pub residential_care: Money,
    pub qualifying_premiums: Money,
    pub assisted_reproductive_services: Money,
}

impl CappedDeductions {
    /// `newborn` lifts the home loan interest and domestic rent ceilings.
    pub fn apply(d: &Deductions, newborn: bool) -> Self {
        Self {
            voluntary_contributions: d.mpf_voluntary_tvc.min(caps::MPF_TVC),
            self_education: d.self_education.min(caps::SELF_EDUCATION),
            home_loan_interest: d.home_loan_interest.min(caps::home_loan_interest(newborn)),
            domestic_rent: d.domestic_rent.min(caps::domestic_rent(newborn)),
            residential_care: d.residential_care.min(caps::RESIDENTIAL_CARE),
            qualifying_premiums: d.qualifying_premiums,
            assisted_reproductive_services: d
                .assisted_reproductive_services
                .min(caps::ASSISTED_REPRODUCTIVE_SERVICES),
        }
    }

    /// Everything except home loan interest, which personal assessment
    /// reports on its own line.
    pub fn other_than_home_loan(&self) -> Money {
        self.voluntary_contributions
            + self.self_education
            + self.domestic_rent
            + self.residential_care
            + self.qualifying_premiums
            + self.assisted_reproductive_services
    }

    pub fn total(&self) -> Money {
        self.home_loan_interest + self.other_than_home_loan()
    }
}
