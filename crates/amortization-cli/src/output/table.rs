use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::plain;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_result_table(result, map),
            None => print_field_table(map),
        },
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{value}"),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_field_table(res_map),
        _ => print_field_table(envelope),
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

/// Two-column table; nested objects (e.g. a presented schedule) are flattened
/// with dotted keys and row arrays are summarised by length.
fn print_field_table(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    push_fields(&mut builder, "", map);
    println!("{}", Table::from(builder));
}

fn push_fields(builder: &mut Builder, prefix: &str, map: &Map<String, Value>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => push_fields(builder, &name, inner),
            Value::Array(items) if items.iter().any(Value::is_object) => {
                builder.push_record([name, format!("[{} rows]", items.len())]);
            }
            _ => builder.push_record([name, plain(val)]),
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(headers.clone());

        for map in arr.iter().filter_map(Value::as_object) {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(plain).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", plain(item));
        }
    }
}
