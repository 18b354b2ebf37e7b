use serde_json::Value;

use super::display_scalar;

/// Headline metric per command, in priority order.
const PRIORITY_KEYS: [&str; 4] = [
    "monthlyCashFlow",
    "cashOnCashReturn",
    "weightedYield",
    "capRate",
];

/// Print just the headline value of the output.
///
/// Looks for a well-known metric in the result (or its `summary`), then
/// falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    let search = result_obj.get("summary").unwrap_or(result_obj);

    if let Some(line) = headline(search) {
        println!("{line}");
        return;
    }

    if let Some(Value::Array(rows)) = value.get("results") {
        println!("{}", rows.len());
        return;
    }

    println!("{}", display_scalar(result_obj));
}

fn headline(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key) {
            if !val.is_null() {
                return Some(display_scalar(val));
            }
        }
    }
    map.iter()
        .next()
        .map(|(key, val)| format!("{key}: {}", display_scalar(val)))
}
