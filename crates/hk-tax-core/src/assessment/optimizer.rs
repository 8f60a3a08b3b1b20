use std::time::Instant;

use rust_decimal::Decimal;
use serde_json::json;

use super::personal::{personal_assessment, AssessmentMode};
use super::{FilingScenario, OptimizationResult, TaxResult};
use crate::calculators::profits::profits_tax;
use crate::calculators::property::property_tax;
use crate::calculators::salaries::{salaries_tax, Taxpayer};
use crate::calculators::Computation;
use crate::error::HkTaxError;
use crate::profile::{HouseholdInput, PersonProfile};
use crate::report::{format_hkd, DerivationLog};
use crate::tables::MAX_AMOUNT;
use crate::types::{with_metadata, ComputationOutput, Liability, Money};
use crate::HkTaxResult;

/// Separately charged taxes of one person.
struct SeparateTaxes {
    salaries: Computation,
    profits: Computation,
    property: Computation,
}

impl SeparateTaxes {
    fn compute(profile: &PersonProfile, taxpayer: Taxpayer, married: bool, other_has_income: bool) -> Self {
        Self {
            salaries: salaries_tax(profile, taxpayer, married, other_has_income),
            profits: profits_tax(profile.income.business_profit, taxpayer),
            property: property_tax(
                profile.income.rental_income,
                profile.income.rental_rates_paid,
                taxpayer,
            ),
        }
    }

    fn total(&self) -> Money {
        self.salaries.tax + self.business_and_property()
    }

    fn business_and_property(&self) -> Money {
        self.profits.tax + self.property.tax
    }

    /// Append profits and property derivations that produced tax.
    fn append_business_and_property(&self, log: &mut DerivationLog) {
        for c in [&self.profits, &self.property] {
            if c.tax > Decimal::ZERO {
                log.append(c.report.clone());
            }
        }
    }

    fn append_all(&self, log: &mut DerivationLog) {
        log.append(self.salaries.report.clone());
        self.append_business_and_property(log);
    }
}

/// Compute every filing option for a household and pick the cheapest.
///
/// `spouse` is only considered when `self_profile` is married. Ties go to
/// the option listed first (separate filing, joint assessment, personal
/// assessment separate, personal assessment joint).
pub fn calculate_tax_liability(self_profile: &PersonProfile, spouse: &PersonProfile) -> OptimizationResult {
    let married = self_profile.allowances.married;
    let spouse_has_income = married && spouse.has_income();

    let own = SeparateTaxes::compute(self_profile, Taxpayer::Principal, married, spouse_has_income);

    let result = if married {
        married_household(self_profile, spouse, own)
    } else {
        single_household(self_profile, spouse, own)
    };

    log::debug!(
        "best option {:?} at {:?}, savings {}",
        result.best_option.scenario,
        result.best_option.total_tax,
        result.savings
    );
    result
}

fn single_household(self_profile: &PersonProfile, spouse: &PersonProfile, own: SeparateTaxes) -> OptimizationResult {
    let standard_total = own.total();
    let mut standard_log = DerivationLog::new();
    own.append_all(&mut standard_log);
    let mut standard = TaxResult::new(
        FilingScenario::StandardFiling,
        Liability::Payable(standard_total),
        vec![
            "Standard Salaries Tax".to_string(),
            "Standard Profits/Property Tax".to_string(),
        ],
        standard_log.into_lines(),
    );

    let pa = personal_assessment(
        self_profile,
        spouse,
        AssessmentMode::Single,
        "Personal Assessment (Separate)",
    );
    let mut assessed = TaxResult::new(
        FilingScenario::PersonalAssessment,
        Liability::Payable(pa.tax),
        vec!["Aggregated Income Assessment".to_string()],
        pa.report.into_lines(),
    );

    log::debug!("standard filing {standard_total}, personal assessment {}", pa.tax);

    let best_total = if pa.tax < standard_total {
        assessed.is_best = true;
        pa.tax
    } else {
        standard.is_best = true;
        standard_total
    };
    let best_option = if assessed.is_best {
        assessed.clone()
    } else {
        standard.clone()
    };

    OptimizationResult {
        separate: standard,
        joint_assessment: TaxResult::not_applicable(),
        personal_assessment_separate: assessed,
        personal_assessment_joint: TaxResult::not_applicable(),
        best_option,
        savings: (standard_total - best_total).max(Decimal::ZERO),
    }
}

fn married_household(self_profile: &PersonProfile, spouse: &PersonProfile, own: SeparateTaxes) -> OptimizationResult {
    let theirs = SeparateTaxes::compute(spouse, Taxpayer::Spouse, true, self_profile.has_income());

    // Separate filing
    let own_total = own.total();
    let their_total = theirs.total();
    let separate_total = own_total + their_total;
    let mut log = DerivationLog::new();
    own.append_all(&mut log);
    log.divider();
    theirs.append_all(&mut log);
    log.heading_amount("Total Separate Tax", separate_total);
    let separate = TaxResult::new(
        FilingScenario::SeparateFiling,
        Liability::Payable(separate_total),
        vec![
            format!("Self: {}", format_hkd(own_total)),
            format!("Spouse: {}", format_hkd(their_total)),
        ],
        log.into_lines(),
    );

    // Joint assessment of salaries, profits and property still separate
    let combined_salaries = personal_assessment(
        &self_profile.salaries_only(),
        &spouse.salaries_only(),
        AssessmentMode::Joint,
        "Joint Assessment (Salaries Tax Only)",
    );
    let others = own.business_and_property() + theirs.business_and_property();
    let joint_total = combined_salaries.tax + others;
    let mut log = DerivationLog::new();
    log.append(combined_salaries.report);
    log.divider();
    log.heading("Plus Separate Business/Property Tax");
    own.append_business_and_property(&mut log);
    theirs.append_business_and_property(&mut log);
    log.heading_amount("Total Joint Tax", joint_total);
    let joint_assessment = TaxResult::new(
        FilingScenario::JointAssessment,
        Liability::Payable(joint_total),
        vec![
            format!("Combined Salaries: {}", format_hkd(combined_salaries.tax)),
            format!("Others: {}", format_hkd(others)),
        ],
        log.into_lines(),
    );

    // Personal assessment, each spouse on their own
    let own_pa = personal_assessment(
        self_profile,
        spouse,
        AssessmentMode::Single,
        "Personal Assessment (Self)",
    );
    let their_pa = personal_assessment(
        spouse,
        self_profile,
        AssessmentMode::Single,
        "Personal Assessment (Spouse)",
    );
    let pa_separate_total = own_pa.tax + their_pa.tax;
    let mut log = DerivationLog::new();
    log.append(own_pa.report);
    log.divider();
    log.append(their_pa.report);
    log.heading_amount("Total PA Separate", pa_separate_total);
    let personal_assessment_separate = TaxResult::new(
        FilingScenario::PersonalAssessmentSeparate,
        Liability::Payable(pa_separate_total),
        vec![
            format!("Self PA: {}", format_hkd(own_pa.tax)),
            format!("Spouse PA: {}", format_hkd(their_pa.tax)),
        ],
        log.into_lines(),
    );

    // Personal assessment, pooled
    let pooled = personal_assessment(
        self_profile,
        spouse,
        AssessmentMode::Joint,
        "Personal Assessment (Joint)",
    );
    let personal_assessment_joint = TaxResult::new(
        FilingScenario::PersonalAssessmentJoint,
        Liability::Payable(pooled.tax),
        vec![
            "All income aggregated".to_string(),
            "Married Allowance applied".to_string(),
        ],
        pooled.report.into_lines(),
    );

    let mut options = [
        separate,
        joint_assessment,
        personal_assessment_separate,
        personal_assessment_joint,
    ];

    let mut best = 0;
    for (i, option) in options.iter().enumerate().skip(1) {
        if option.total_tax < options[best].total_tax {
            best = i;
        }
    }
    options[best].is_best = true;
    let best_option = options[best].clone();

    for option in &options {
        log::debug!("{:?}: {:?}", option.scenario, option.total_tax);
    }

    let best_total = best_option.total_tax.amount().unwrap_or(separate_total);
    debug_assert!(
        best_total <= separate_total,
        "best option {best_total} exceeds separate filing {separate_total}"
    );
    let savings = (separate_total - best_total).max(Decimal::ZERO);

    let [separate, joint_assessment, personal_assessment_separate, personal_assessment_joint] = options;
    OptimizationResult {
        separate,
        joint_assessment,
        personal_assessment_separate,
        personal_assessment_joint,
        best_option,
        savings,
    }
}

/// Validate and sanitize a household, then compute every filing option.
///
/// Negative amounts are treated as zero with a warning. Amounts above
/// [`MAX_AMOUNT`] and a newborn count above the child count are rejected.
pub fn optimize_household(input: &HouseholdInput) -> HkTaxResult<ComputationOutput<OptimizationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let married = input.is_married();

    let (self_profile, coerced) = input.self_profile.sanitized();
    warnings.extend(coerced.into_iter().map(|f| coercion_warning("self", f)));
    validate_amounts("self", &self_profile)?;
    validate_children("self", &self_profile)?;

    let spouse = if married {
        let (spouse, coerced) = input.spouse.sanitized();
        warnings.extend(coerced.into_iter().map(|f| coercion_warning("spouse", f)));
        validate_amounts("spouse", &spouse)?;
        validate_children("spouse", &spouse)?;
        spouse
    } else {
        if input.spouse != PersonProfile::default() {
            warnings.push("Spouse details are ignored because the household is not married".into());
        }
        PersonProfile::default()
    };

    let result = calculate_tax_liability(&self_profile, &spouse);

    if result.best_option.total_tax == Liability::Payable(Decimal::ZERO) {
        warnings.push("No tax is payable under any filing option".into());
    }

    let assumptions = json!({
        "married": married,
        "scenarios_compared": result.options().iter().filter(|o| o.total_tax.is_applicable()).count(),
        "salaries_tax": "lower of progressive rates on net chargeable income and standard rate on net income",
        "personal_assessment_rental_factor": "80% of (gross rent - rates)",
        "tie_break": "first listed option wins",
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Hong Kong salaries, profits and property tax compared across separate, joint and personal assessment",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

fn coercion_warning(who: &str, field: &str) -> String {
    format!("{who}.{field} was negative and has been treated as 0")
}

fn validate_amounts(who: &str, profile: &PersonProfile) -> HkTaxResult<()> {
    if let Some((field, value)) = profile.amount_above(MAX_AMOUNT) {
        return Err(HkTaxError::InvalidInput {
            field: format!("{who}.{field}"),
            reason: format!(
                "{} exceeds the maximum supported amount of {}",
                format_hkd(value),
                format_hkd(MAX_AMOUNT)
            ),
        });
    }
    Ok(())
}

fn validate_children(who: &str, profile: &PersonProfile) -> HkTaxResult<()> {
    let a = &profile.allowances;
    if a.newborn_count > a.children_count {
        return Err(HkTaxError::InvalidInput {
            field: format!("{who}.allowances.newborn_count"),
            reason: format!(
                "newborn count ({}) cannot exceed children count ({})",
                a.newborn_count, a.children_count
            ),
        });
    }
    Ok(())
}
