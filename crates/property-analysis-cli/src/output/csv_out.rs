use serde_json::{Map, Value};
use std::io;

/// Write output as CSV to stdout. Values stay unrounded.
///
/// A result object becomes two-column `field,value` rows with nested
/// sections flattened to dotted keys; arrays of records (listings,
/// portfolio properties) become one row per record.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result").or_else(|| m.get("results")))
        .unwrap_or(value);

    let rows = match body {
        Value::Object(map) => match map.get("properties") {
            Some(Value::Array(records)) => records_to_rows(records),
            _ => field_rows(map),
        },
        Value::Array(records) => records_to_rows(records),
        other => vec![vec![scalar(other)]],
    };

    for row in rows {
        let _ = wtr.write_record(&row);
    }
    let _ = wtr.flush();
}

fn field_rows(map: &Map<String, Value>) -> Vec<Vec<String>> {
    let mut flat = Vec::new();
    flatten("", map, &mut flat);

    let mut rows = vec![vec!["field".to_string(), "value".to_string()]];
    rows.extend(flat.into_iter().map(|(k, v)| vec![k, v]));
    rows
}

fn records_to_rows(records: &[Value]) -> Vec<Vec<String>> {
    let flattened: Vec<Vec<(String, String)>> = records
        .iter()
        .map(|record| match record {
            Value::Object(map) => {
                let mut flat = Vec::new();
                flatten("", map, &mut flat);
                flat
            }
            other => vec![("value".to_string(), scalar(other))],
        })
        .collect();

    let Some(first) = flattened.first() else {
        return Vec::new();
    };
    let headers: Vec<String> = first.iter().map(|(k, _)| k.clone()).collect();

    let mut rows = vec![headers.clone()];
    for record in &flattened {
        rows.push(
            headers
                .iter()
                .map(|h| {
                    record
                        .iter()
                        .find(|(k, _)| k == h)
                        .map(|(_, v)| v.clone())
                        .unwrap_or_default()
                })
                .collect(),
        );
    }
    rows
}

fn flatten(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(nested) => flatten(&name, nested, out),
            other => out.push((name, scalar(other))),
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
