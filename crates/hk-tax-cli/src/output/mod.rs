pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Keys of the four filing options in an optimizer result, in comparison order.
const SCENARIO_KEYS: [&str; 4] = [
    "separate",
    "joint_assessment",
    "personal_assessment_separate",
    "personal_assessment_joint",
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// One row per filing option (label, total tax, best flag, breakdown) when
/// `result` is an optimizer result.
pub(crate) fn scenario_rows(result: &Value) -> Option<Vec<[String; 4]>> {
    let map = result.as_object()?;
    if !map.contains_key("best_option") {
        return None;
    }

    let rows = SCENARIO_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .map(|option| {
            [
                text(&option["label"]),
                total(&option["total_tax"]),
                text(&option["is_best"]),
                option["breakdown"]
                    .as_array()
                    .map(|lines| lines.iter().map(text).collect::<Vec<_>>().join("; "))
                    .unwrap_or_default(),
            ]
        })
        .collect();
    Some(rows)
}

/// A liability as printed in tables: the amount, or `N/A`.
pub(crate) fn total(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        other => text(other),
    }
}

pub(crate) fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hk_tax_core::{calculate_tax_liability, PersonProfile};
    use rust_decimal_macros::dec;

    #[test]
    fn test_scenario_rows_for_unmarried_household() {
        let mut me = PersonProfile::default();
        me.income.salary = dec!(500_000);
        let result = serde_json::to_value(calculate_tax_liability(&me, &PersonProfile::default())).unwrap();

        let rows = scenario_rows(&result).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0], "Standard Filing");
        assert_eq!(rows[0][2], "true");
        assert_eq!(rows[1][1], "N/A");
    }

    #[test]
    fn test_scenario_rows_ignores_other_results() {
        assert!(scenario_rows(&serde_json::json!({ "tax": "1" })).is_none());
    }
}
