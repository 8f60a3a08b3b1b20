//! Statutory schedules for the 2024/25 year of assessment.
//!
//! Everything the calculators need is a constant here: marginal bands,
//! the two-tier standard rate, two-tier profits tax for unincorporated
//! businesses, the property tax rate, allowances and deduction ceilings.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

pub const TAX_YEAR: &str = "2024/25";

/// Largest amount accepted for any single income or deduction field.
pub const MAX_AMOUNT: Money = dec!(1_000_000_000_000_000);

/// One slice of a tiered schedule. `limit: None` is the open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBand {
    pub limit: Option<Money>,
    pub rate: Rate,
}

impl TaxBand {
    const fn capped(limit: Decimal, rate: Decimal) -> Self {
        TaxBand {
            limit: Some(limit),
            rate,
        }
    }

    const fn open(rate: Decimal) -> Self {
        TaxBand { limit: None, rate }
    }
}

pub const PROGRESSIVE_BANDS: [TaxBand; 5] = [
    TaxBand::capped(dec!(50_000), dec!(0.02)),
    TaxBand::capped(dec!(50_000), dec!(0.06)),
    TaxBand::capped(dec!(50_000), dec!(0.10)),
    TaxBand::capped(dec!(50_000), dec!(0.14)),
    TaxBand::open(dec!(0.17)),
];

pub const STANDARD_RATE_BANDS: [TaxBand; 2] = [
    TaxBand::capped(dec!(5_000_000), dec!(0.15)),
    TaxBand::open(dec!(0.16)),
];

/// Two-tier profits tax for sole proprietorships and partnerships.
pub const PROFITS_TAX_BANDS: [TaxBand; 2] = [
    TaxBand::capped(dec!(2_000_000), dec!(0.075)),
    TaxBand::open(dec!(0.15)),
];

pub const PROPERTY_TAX_RATE: Rate = dec!(0.15);

/// Statutory allowance for repairs and outgoings on let property.
pub const PROPERTY_STATUTORY_ALLOWANCE: Rate = dec!(0.20);

/// Net assessable value multiplier used under personal assessment.
pub const PERSONAL_ASSESSMENT_RENTAL_FACTOR: Rate = dec!(0.80);

pub mod allowances {
    use super::*;

    pub const BASIC: Money = dec!(132_000);
    pub const MARRIED: Money = dec!(264_000);
    pub const CHILD: Money = dec!(130_000);
    pub const CHILD_YEAR_OF_BIRTH_EXTRA: Money = dec!(130_000);
    pub const PARENT_60_LIVING: Money = dec!(100_000);
    pub const PARENT_60_NOT_LIVING: Money = dec!(50_000);
    pub const PARENT_55_LIVING: Money = dec!(50_000);
    pub const PARENT_55_NOT_LIVING: Money = dec!(25_000);
    pub const BROTHER_SISTER: Money = dec!(37_500);
    pub const DISABLED_DEPENDENT: Money = dec!(75_000);
    pub const PERSONAL_DISABILITY: Money = dec!(75_000);
    pub const SINGLE_PARENT: Money = dec!(132_000);
}

pub mod caps {
    use super::*;

    pub const MPF_MANDATORY_RATE: Rate = dec!(0.05);
    pub const MPF_MANDATORY: Money = dec!(18_000);
    pub const MPF_TVC: Money = dec!(60_000);
    pub const HOME_LOAN_INTEREST: Money = dec!(100_000);
    pub const HOME_LOAN_INTEREST_NEWBORN: Money = dec!(120_000);
    pub const DOMESTIC_RENT: Money = dec!(100_000);
    pub const DOMESTIC_RENT_NEWBORN: Money = dec!(120_000);
    pub const SELF_EDUCATION: Money = dec!(100_000);
    pub const RESIDENTIAL_CARE: Money = dec!(100_000);
    pub const ASSISTED_REPRODUCTIVE_SERVICES: Money = dec!(100_000);
    /// Per insured person. Used for guidance only; premiums are deducted as claimed.
    pub const VHIS_PER_PERSON: Money = dec!(8_000);
    pub const CHARITABLE_PERCENTAGE: Rate = dec!(0.35);

    pub fn home_loan_interest(newborn: bool) -> Money {
        if newborn {
            HOME_LOAN_INTEREST_NEWBORN
        } else {
            HOME_LOAN_INTEREST
        }
    }

    pub fn domestic_rent(newborn: bool) -> Money {
        if newborn {
            DOMESTIC_RENT_NEWBORN
        } else {
            DOMESTIC_RENT
        }
    }
}
