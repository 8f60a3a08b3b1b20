use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Income for one taxpayer for one year of assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeSource {
    pub salary: Money,
    /// Assessable profit of a sole proprietorship or partnership share
    pub business_profit: Money,
    /// Gross rent received or receivable
    pub rental_income: Money,
    /// Rates paid by the owner on the let property
    pub rental_rates_paid: Money,
    /// Pensions, share option gains and other taxable employment income
    pub other_income: Money,
}

impl IncomeSource {
    /// Employment-type income charged to salaries tax.
    pub fn salaries_income(&self) -> Money {
        self.salary + self.other_income
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deductions {
    /// Explicit mandatory MPF contribution. When absent or zero the engine
    /// uses 5% of salary capped at the statutory maximum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpf_mandatory_override: Option<Money>,
    /// Tax deductible voluntary contributions (TVC)
    pub mpf_voluntary_tvc: Money,
    pub residential_care: Money,
    pub home_loan_interest: Money,
    pub domestic_rent: Money,
    pub approved_charitable_donations: Money,
    pub self_education: Money,
    /// VHIS qualifying premiums
    pub qualifying_premiums: Money,
    pub assisted_reproductive_services: Money,
    /// Expenses incurred in the production of assessable income
    pub outgoings_and_expenses: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allowances {
    pub married: bool,
    pub children_count: u32,
    /// Children born in the year of assessment (subset of `children_count`)
    pub newborn_count: u32,
    pub dependent_siblings: u32,
    pub dependent_parent_60_plus_living: u32,
    pub dependent_parent_60_plus_not_living: u32,
    pub dependent_parent_55_to_59_living: u32,
    pub dependent_parent_55_to_59_not_living: u32,
    pub disabled_dependents: u32,
    pub personal_disability: bool,
    pub single_parent: bool,
}

impl Allowances {
    pub fn has_newborn(&self) -> bool {
        self.newborn_count > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonProfile {
    pub income: IncomeSource,
    pub deductions: Deductions,
    pub allowances: Allowances,
}

impl PersonProfile {
    /// Whether this person independently has income for the married
    /// person's allowance test.
    pub fn has_income(&self) -> bool {
        self.income.salary + self.income.business_profit + self.income.rental_income
            > Decimal::ZERO
    }

    /// A copy carrying only employment-type income, used when salaries tax
    /// is jointly assessed and profits/property are charged separately.
    pub fn salaries_only(&self) -> PersonProfile {
        PersonProfile {
            income: IncomeSource {
                business_profit: Decimal::ZERO,
                rental_income: Decimal::ZERO,
                rental_rates_paid: Decimal::ZERO,
                ..self.income.clone()
            },
            ..self.clone()
        }
    }

    /// Every income and deduction amount with its field name.
    fn amounts_mut(&mut self) -> Vec<(&'static str, &mut Money)> {
        let income = &mut self.income;
        let d = &mut self.deductions;

        let mut fields: Vec<(&'static str, &mut Money)> = vec![
            ("salary", &mut income.salary),
            ("business_profit", &mut income.business_profit),
            ("rental_income", &mut income.rental_income),
            ("rental_rates_paid", &mut income.rental_rates_paid),
            ("other_income", &mut income.other_income),
        ];
        if let Some(mpf) = d.mpf_mandatory_override.as_mut() {
            fields.push(("mpf_mandatory_override", mpf));
        }
        fields.extend([
            ("mpf_voluntary_tvc", &mut d.mpf_voluntary_tvc),
            ("residential_care", &mut d.residential_care),
            ("home_loan_interest", &mut d.home_loan_interest),
            ("domestic_rent", &mut d.domestic_rent),
            (
                "approved_charitable_donations",
                &mut d.approved_charitable_donations,
            ),
            ("self_education", &mut d.self_education),
            ("qualifying_premiums", &mut d.qualifying_premiums),
            (
                "assisted_reproductive_services",
                &mut d.assisted_reproductive_services,
            ),
            ("outgoings_and_expenses", &mut d.outgoings_and_expenses),
        ]);
        fields
    }

    /// Copy with every negative amount replaced by zero. Returns the names
    /// of the fields that were coerced.
    pub fn sanitized(&self) -> (PersonProfile, Vec<&'static str>) {
        let mut clean = self.clone();
        let coerced = clean
            .amounts_mut()
            .into_iter()
            .filter(|(_, value)| value.is_sign_negative() && !value.is_zero())
            .map(|(name, value)| {
                *value = Decimal::ZERO;
                name
            })
            .collect();
        (clean, coerced)
    }

    /// First field whose amount is above `limit`, with that amount.
    pub fn amount_above(&self, limit: Money) -> Option<(&'static str, Money)> {
        let mut copy = self.clone();
        let found = copy
            .amounts_mut()
            .into_iter()
            .find(|(_, value)| **value > limit)
            .map(|(name, value)| (name, *value));
        found
    }
}

/// Both taxpayers of a household. The spouse is only read when the self
/// profile is marked married.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdInput {
    #[serde(rename = "self")]
    pub self_profile: PersonProfile,
    pub spouse: PersonProfile,
}

impl HouseholdInput {
    pub fn is_married(&self) -> bool {
        self.self_profile.allowances.married
    }
}
