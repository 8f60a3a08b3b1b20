use hk_tax_core::{
    calculate_tax_liability, optimize_household, render_report, FilingScenario, HkTaxError,
    HouseholdInput, Language, Liability, OptimizationResult, PersonProfile, ScenarioSelection,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn earner(salary: Decimal) -> PersonProfile {
    let mut p = PersonProfile::default();
    p.income.salary = salary;
    p
}

fn married(salary: Decimal) -> PersonProfile {
    let mut p = earner(salary);
    p.allowances.married = true;
    p
}

fn best_flags(r: &OptimizationResult) -> usize {
    r.options().iter().filter(|o| o.is_best).count()
}

fn payable(r: &OptimizationResult) -> Vec<Decimal> {
    r.options().iter().filter_map(|o| o.total_tax.amount()).collect()
}

// ===========================================================================
// Household invariants
// ===========================================================================

#[test]
fn test_exactly_one_best_and_non_negative_savings() {
    let households = [
        (earner(dec!(0)), PersonProfile::default()),
        (earner(dec!(250_000)), PersonProfile::default()),
        (married(dec!(0)), PersonProfile::default()),
        (married(dec!(900_000)), PersonProfile::default()),
        (married(dec!(420_000)), earner(dec!(380_000))),
        (married(dec!(3_000_000)), earner(dec!(150_000))),
    ];
    for (me, spouse) in &households {
        let r = calculate_tax_liability(me, spouse);
        assert_eq!(best_flags(&r), 1);
        assert!(r.best_option.is_best);
        assert!(r.savings >= Decimal::ZERO);
        for amount in payable(&r) {
            assert!(amount >= Decimal::ZERO);
            assert!(r.best_option.total_tax <= Liability::Payable(amount));
        }
    }
}

#[test]
fn test_concrete_unmarried_500k() {
    let r = calculate_tax_liability(&earner(dec!(500_000)), &PersonProfile::default());
    assert_eq!(r.best_option.total_tax, Liability::Payable(dec!(41_500)));
}

#[test]
fn test_zero_mpf_override_uses_computed_contribution() {
    let mut p = earner(dec!(500_000));
    p.deductions.mpf_mandatory_override = Some(Decimal::ZERO);
    let r = calculate_tax_liability(&p, &PersonProfile::default());
    assert_eq!(r.separate.total_tax, Liability::Payable(dec!(41_500)));
}

#[test]
fn test_voluntary_contribution_over_cap_changes_nothing() {
    let mut at_cap = married(dec!(1_200_000));
    at_cap.deductions.mpf_voluntary_tvc = dec!(60_000);
    let mut over_cap = at_cap.clone();
    over_cap.deductions.mpf_voluntary_tvc = dec!(1_000_000);
    let spouse = earner(dec!(200_000));

    let a = calculate_tax_liability(&at_cap, &spouse);
    let b = calculate_tax_liability(&over_cap, &spouse);
    assert_eq!(payable(&a), payable(&b));
}

#[test]
fn test_inputs_are_not_mutated() {
    let mut me = married(dec!(500_000));
    me.income.business_profit = dec!(200_000);
    me.income.rental_income = dec!(120_000);
    let spouse = earner(dec!(100_000));
    let (me_before, spouse_before) = (me.clone(), spouse.clone());

    let _ = calculate_tax_liability(&me, &spouse);
    assert_eq!(me, me_before);
    assert_eq!(spouse, spouse_before);
}

#[test]
fn test_tie_prefers_first_listed_option() {
    // Nobody owes anything, so separate filing keeps the flag
    let r = calculate_tax_liability(&married(dec!(100_000)), &earner(dec!(100_000)));
    assert!(payable(&r).iter().all(|t| t.is_zero()));
    assert_eq!(r.best_option.scenario, FilingScenario::SeparateFiling);
}

// ===========================================================================
// Married scenarios
// ===========================================================================

#[test]
fn test_single_earner_couple_benefits_from_pooling() {
    let r = calculate_tax_liability(&married(dec!(800_000)), &PersonProfile::default());
    assert!(r.savings >= Decimal::ZERO);
    assert!(r.personal_assessment_joint.total_tax <= r.separate.total_tax);
    assert_eq!(
        r.personal_assessment_joint.breakdown,
        vec!["All income aggregated", "Married Allowance applied"]
    );
}

#[test]
fn test_separate_breakdown_lists_each_spouse() {
    let r = calculate_tax_liability(&married(dec!(500_000)), &earner(dec!(500_000)));
    // Both have income, so each claims the basic allowance
    assert_eq!(
        r.separate.breakdown,
        vec!["Self: HK$41,500", "Spouse: HK$41,500"]
    );
    assert_eq!(r.separate.total_tax, Liability::Payable(dec!(83_000)));
}

#[test]
fn test_pa_rental_uses_80_percent_factor() {
    let mut me = earner(dec!(0));
    me.income.rental_income = dec!(300_000);
    me.income.rental_rates_paid = dec!(20_000);
    let r = calculate_tax_liability(&me, &PersonProfile::default());
    let lines = r.personal_assessment_separate.rendered_report();
    assert!(lines.contains(&"Property Income (NAV): HK$224,000".to_string()));
}

// ===========================================================================
// Checked envelope
// ===========================================================================

#[test]
fn test_envelope_metadata_and_warnings() {
    let mut input = HouseholdInput::default();
    input.self_profile = married(dec!(600_000));
    input.spouse.income.rental_income = dec!(-20_000);
    input.spouse.deductions.self_education = dec!(-1);

    let out = optimize_household(&input).unwrap();
    assert_eq!(
        out.warnings[0],
        "spouse.rental_income was negative and has been treated as 0"
    );
    assert_eq!(
        out.warnings[1],
        "spouse.self_education was negative and has been treated as 0"
    );
    assert_eq!(out.metadata.tax_year, "2024/25");
    assert_eq!(out.assumptions["married"], true);
    assert_eq!(out.assumptions["scenarios_compared"], 4);
}

#[test]
fn test_envelope_rejects_spouse_newborn_mismatch() {
    let mut input = HouseholdInput::default();
    input.self_profile = married(dec!(400_000));
    input.spouse.allowances.newborn_count = 1;
    match optimize_household(&input) {
        Err(HkTaxError::InvalidInput { field, .. }) => {
            assert_eq!(field, "spouse.allowances.newborn_count")
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_envelope_rejects_amounts_that_would_overflow_when_pooled() {
    let json = r#"{
        "self": {
            "income": { "salary": "50000000000000000000000000000" },
            "allowances": { "married": true }
        },
        "spouse": {
            "income": { "salary": "50000000000000000000000000000" }
        }
    }"#;
    let input: HouseholdInput = serde_json::from_str(json).unwrap();
    let outcome = std::panic::catch_unwind(|| optimize_household(&input));
    match outcome {
        Ok(Err(HkTaxError::InvalidInput { field, reason })) => {
            assert_eq!(field, "self.salary");
            assert!(reason.contains("maximum supported amount"));
        }
        Ok(other) => panic!("expected InvalidInput, got {other:?}"),
        Err(_) => panic!("optimize_household panicked"),
    }
}

#[test]
fn test_household_json_round_trip_through_envelope() {
    let json = r#"{
        "self": {
            "income": { "salary": "500000" },
            "allowances": { "married": false }
        }
    }"#;
    let input: HouseholdInput = serde_json::from_str(json).unwrap();
    let out = optimize_household(&input).unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["result"]["best_option"]["scenario"], "standard_filing");
    assert_eq!(value["result"]["joint_assessment"]["total_tax"], serde_json::Value::Null);
}

#[test]
fn test_report_rendering_all_scenarios() {
    let r = calculate_tax_liability(&married(dec!(600_000)), &earner(dec!(300_000)));
    let text = render_report(&r, Language::En, ScenarioSelection::All);
    for heading in [
        "## Separate Filing",
        "## Joint Assessment (Salaries)",
        "## Personal Assessment (Separate)",
        "## Personal Assessment (Joint)",
    ] {
        assert!(text.contains(heading), "missing {heading}");
    }
    assert_eq!(text.matches("[Best Option]").count(), 1);
}
