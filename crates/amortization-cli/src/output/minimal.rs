use serde_json::Value;

use super::plain;

/// Headline fields, in the order they are looked for.
const PRIORITY_KEYS: [&str; 6] = [
    "price_payment",
    "sac_first_payment",
    "monthly_payment",
    "fixed_payment",
    "formatted",
    "signed",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        if let Some(val) = PRIORITY_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|val| !val.is_null())
        {
            println!("{}", plain(val));
            return;
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{key}: {}", plain(val));
            return;
        }
    }

    // Schedules: print the period count and the first row's payment
    if let Value::Array(rows) = result_obj {
        match rows.first().and_then(|r| r.get("total")) {
            Some(total) => println!("{} periods, first payment {}", rows.len(), plain(total)),
            None => println!("{} periods", rows.len()),
        }
        return;
    }

    println!("{}", plain(result_obj));
}
