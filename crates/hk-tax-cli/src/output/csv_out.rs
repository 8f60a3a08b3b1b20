use serde_json::Value;
use std::io;

use super::{scenario_rows, text};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_records(&mut wtr, value) {
        log::error!("CSV output failed: {e}");
    }
}

fn write_records<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    let result = value.get("result").unwrap_or(value);

    if let Some(rows) = scenario_rows(result) {
        wtr.write_record(["option", "total_tax", "is_best", "breakdown"])?;
        for row in rows {
            wtr.write_record(&row)?;
        }
    } else if let Value::Object(map) = result {
        wtr.write_record(["field", "value"])?;
        for (key, val) in map {
            match val {
                Value::Array(items) => {
                    for item in items {
                        wtr.write_record([key.as_str(), &text(item)])?;
                    }
                }
                other => wtr.write_record([key.as_str(), &text(other)])?,
            }
        }
    } else {
        wtr.write_record([text(result)])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_csv(value: &Value) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_records(&mut wtr, value).unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_calculator_rows() {
        let value = json!({ "result": { "tax": "1120", "derivation": ["a", "b"] } });
        let csv = to_csv(&value);
        assert!(csv.starts_with("field,value\n"));
        assert!(csv.contains("derivation,a\nderivation,b\n"));
    }
}
