use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{scenario_rows, text};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_result_table(result, map),
            None => print_flat_object(map),
        },
        _ => println!("{value}"),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    if let Some(rows) = scenario_rows(result) {
        let mut builder = Builder::default();
        builder.push_record(["Filing Option", "Total Tax", "Best", "Breakdown"]);
        for row in rows {
            builder.push_record(row);
        }
        println!("{}", Table::from(builder));
        println!("\nSavings vs separate filing: {}", text(&result["savings"]));
    } else if let Value::Object(res_map) = result {
        print_flat_object(res_map);
    } else {
        print_flat_object(envelope);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        let rendered = match val {
            // Derivation lines read better one per row
            Value::Array(items) => items.iter().map(text).collect::<Vec<_>>().join("\n"),
            other => text(other),
        };
        builder.push_record([key.clone(), rendered]);
    }
    println!("{}", Table::from(builder));
}
