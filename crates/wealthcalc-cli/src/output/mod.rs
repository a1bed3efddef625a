pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Keys under which a result carries its per-period rows.
const SERIES_KEYS: [&str; 3] = ["series", "years", "rows"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The first per-period array in a result object, with its key.
pub(crate) fn series_of(result: &Map<String, Value>) -> Option<(&str, &[Value])> {
    SERIES_KEYS.iter().find_map(|key| match result.get(*key) {
        Some(Value::Array(rows)) => Some((*key, rows.as_slice())),
        _ => None,
    })
}

/// Flattens nested objects into dotted columns: `{"stock": {"value": 1}}` → `stock.value`.
pub(crate) fn flatten_row(row: &Value) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    flatten_into("", row, &mut out);
    out
}

pub(crate) fn flatten_into(prefix: &str, value: &Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(&name, val, out);
            }
        }
        other => out.push((prefix.to_string(), other.clone())),
    }
}
