use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// The result object is flattened into field,value rows; per-term mappings
/// and the amortization schedule use dotted keys (monthly_amortizations.12,
/// balance_80_amortizations.0.ma).
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let target = map.get("result").unwrap_or(value);
            let _ = wtr.write_record(["field", "value"]);
            write_flattened(&mut wtr, "", target);
        }
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_flattened(wtr: &mut csv::Writer<io::StdoutLock<'_>>, prefix: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                write_flattened(wtr, &path, val);
            }
        }
        Value::Array(arr) => {
            for (idx, val) in arr.iter().enumerate() {
                write_flattened(wtr, &format!("{prefix}.{idx}"), val);
            }
        }
        _ => {
            let _ = wtr.write_record([prefix, &format_csv_value(value)]);
        }
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    // Extract headers from first object
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
