use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::display_scalar;

/// Format output as tables: the result's scalar fields first, then one
/// titled table per nested section (breakdown, summary, property rows).
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_section(None, result);
                if let Some(breakdown) = map.get("breakdown") {
                    print_section(Some("breakdown"), breakdown);
                }
                print_envelope_notes(map);
            } else if let Some(Value::Array(rows)) = map.get("results") {
                print_rows(rows);
            } else {
                print_section(None, value);
            }
        }
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", display_scalar(value)),
    }
}

fn print_section(title: Option<&str>, value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(t) = title {
                println!("\n{t}:");
            }
            print_fields(map);
            for (key, nested) in map {
                match nested {
                    Value::Object(_) => print_section(Some(key), nested),
                    Value::Array(rows) if rows.iter().any(Value::is_object) => {
                        println!("\n{key}:");
                        print_rows(rows);
                    }
                    _ => {}
                }
            }
        }
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", display_scalar(value)),
    }
}

fn print_fields(map: &Map<String, Value>) {
    let scalars: Vec<(&String, &Value)> = map
        .iter()
        .filter(|(_, v)| !v.is_object() && !v.is_array())
        .collect();
    if scalars.is_empty() {
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in scalars {
        builder.push_record([key.clone(), display_scalar(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            println!("{}", display_scalar(item));
        }
        return;
    };

    let headers: Vec<String> = first
        .iter()
        .filter(|(_, v)| !v.is_object())
        .map(|(k, _)| k.clone())
        .collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(display_scalar).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));

    // Nested per-row objects (e.g. portfolio metrics) get their own table
    for item in rows {
        if let Value::Object(map) = item {
            for (key, nested) in map.iter().filter(|(_, v)| v.is_object()) {
                let label = map
                    .get("name")
                    .or_else(|| map.get("id"))
                    .map(display_scalar)
                    .unwrap_or_default();
                print_section(Some(&format!("{label} {key}")), nested);
            }
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
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
