use serde_json::Value;

/// Print just the key answer from the output.
///
/// Objects: the first well-known field present, else the first field.
/// Arrays: one line per element, its `name` when it has one.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "opportunityIndex",
        "overallRank",
        "totalUnits",
        "percentile",
        "name",
    ];

    match result_obj {
        Value::Object(map) => {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", format_minimal(val));
                        return;
                    }
                }
            }

            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_minimal(val));
                return;
            }
            println!("{{}}");
        }
        Value::Array(items) => {
            for item in items {
                match item.get("name") {
                    Some(name) => println!("{}", format_minimal(name)),
                    None => println!("{}", format_minimal(item)),
                }
            }
        }
        other => println!("{}", format_minimal(other)),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
