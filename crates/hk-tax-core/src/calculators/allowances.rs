//! Allowance totalling shared by salaries tax and personal assessment.

use rust_decimal::Decimal;

use crate::profile::Allowances;
use crate::report::DerivationLog;
use crate::tables::allowances as amounts;
use crate::types::Money;

/// Dependant counts of one or both spouses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependantCounts {
    pub children: u32,
    pub newborns: u32,
    pub siblings: u32,
    pub parent_60_living: u32,
    pub parent_60_not_living: u32,
    pub parent_55_living: u32,
    pub parent_55_not_living: u32,
    pub disabled: u32,
}

impl DependantCounts {
    pub fn of(a: &Allowances) -> Self {
        Self {
            children: a.children_count,
            newborns: a.newborn_count,
            siblings: a.dependent_siblings,
            parent_60_living: a.dependent_parent_60_plus_living,
            parent_60_not_living: a.dependent_parent_60_plus_not_living,
            parent_55_living: a.dependent_parent_55_to_59_living,
            parent_55_not_living: a.dependent_parent_55_to_59_not_living,
            disabled: a.disabled_dependents,
        }
    }

    /// Pooled counts for a jointly assessed couple.
    pub fn combined(a: &Allowances, b: &Allowances) -> Self {
        let (a, b) = (Self::of(a), Self::of(b));
        Self {
            children: a.children.saturating_add(b.children),
            newborns: a.newborns.saturating_add(b.newborns),
            siblings: a.siblings.saturating_add(b.siblings),
            parent_60_living: a.parent_60_living.saturating_add(b.parent_60_living),
            parent_60_not_living: a.parent_60_not_living.saturating_add(b.parent_60_not_living),
            parent_55_living: a.parent_55_living.saturating_add(b.parent_55_living),
            parent_55_not_living: a.parent_55_not_living.saturating_add(b.parent_55_not_living),
            disabled: a.disabled.saturating_add(b.disabled),
        }
    }

    pub fn parent_allowance(&self) -> Money {
        times(self.parent_60_living, amounts::PARENT_60_LIVING)
            + times(self.parent_60_not_living, amounts::PARENT_60_NOT_LIVING)
            + times(self.parent_55_living, amounts::PARENT_55_LIVING)
            + times(self.parent_55_not_living, amounts::PARENT_55_NOT_LIVING)
    }
}

fn times(count: u32, amount: Money) -> Money {
    Decimal::from(count) * amount
}

/// Builds the "Less: Allowances" block of a derivation and keeps the
/// running total.
pub struct AllowanceSheet<'a> {
    log: &'a mut DerivationLog,
    total: Money,
}

impl<'a> AllowanceSheet<'a> {
    pub fn open(log: &'a mut DerivationLog) -> Self {
        log.note("Less: Allowances");
        Self {
            log,
            total: Decimal::ZERO,
        }
    }

    pub fn claim(&mut self, label: impl Into<String>, amount: Money) {
        if amount > Decimal::ZERO {
            self.total += amount;
            self.log.detail_less(label, amount);
        }
    }

    /// Married person's allowance when `married`, basic allowance otherwise.
    pub fn personal(&mut self, married: bool) {
        if married {
            self.claim("Married Person's Allowance", amounts::MARRIED);
        } else {
            self.claim("Basic Allowance", amounts::BASIC);
        }
    }

    pub fn dependants(&mut self, counts: &DependantCounts) {
        self.claim(
            format!("Child Allowance ({})", counts.children),
            times(counts.children, amounts::CHILD),
        );
        self.claim(
            format!("Newborn Additional Allowance ({})", counts.newborns),
            times(counts.newborns, amounts::CHILD_YEAR_OF_BIRTH_EXTRA),
        );
        self.claim(
            format!("Dependent Brother/Sister Allowance ({})", counts.siblings),
            times(counts.siblings, amounts::BROTHER_SISTER),
        );
        self.claim("Dependent Parent Allowance", counts.parent_allowance());
        self.claim(
            "Disabled Dependent Allowance",
            times(counts.disabled, amounts::DISABLED_DEPENDENT),
        );
    }

    pub fn personal_disability(&mut self, label: &str, eligible: bool) {
        if eligible {
            self.claim(label, amounts::PERSONAL_DISABILITY);
        }
    }

    pub fn single_parent(&mut self, eligible: bool) {
        if eligible {
            self.claim("Single Parent Allowance", amounts::SINGLE_PARENT);
        }
    }

    /// Writes the total line and returns the amount.
    pub fn close(self) -> Money {
        self.log.less("Total Allowances", self.total);
        self.total
    }
}
