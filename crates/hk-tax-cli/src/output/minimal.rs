use serde_json::Value;

use super::{text, total};

/// Print only the headline figure: the best option and its tax for the
/// optimizer, the tax for a single calculator.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(best) = result.get("best_option") {
        return format!("{}: {}", text(&best["label"]), total(&best["total_tax"]));
    }

    for key in ["tax", "savings"] {
        if let Some(val) = result.get(key).filter(|v| !v.is_null()) {
            return text(val);
        }
    }

    match result {
        Value::Object(map) => map
            .iter()
            .next()
            .map(|(key, val)| format!("{key}: {}", text(val)))
            .unwrap_or_default(),
        other => text(other),
    }
}
