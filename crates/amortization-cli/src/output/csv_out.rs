use serde_json::{Map, Value};
use std::io::{self, Write};

use super::plain;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => write_fields(&mut wtr, result),
            Some(Value::Array(rows)) => write_rows(&mut wtr, rows),
            _ => write_fields(&mut wtr, map),
        },
        Value::Array(rows) => write_rows(&mut wtr, rows),
        _ => wtr.write_record([plain(value)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {e}");
    }
}

/// Two-column CSV: field, value.
fn write_fields<W: Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.as_str(), &plain(val)])?;
    }
    Ok(())
}

/// One CSV row per object, headers from the first (e.g. schedule rows).
fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([plain(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for map in rows.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(plain).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}
