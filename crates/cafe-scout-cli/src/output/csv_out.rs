use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = write_value(&mut wtr, value).and_then(|()| wtr.flush().map_err(csv::Error::from));
    if let Err(e) = written {
        log::error!("Failed to write CSV output: {}", e);
    }
}

fn write_value<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => write_fields(wtr, result),
            Some(Value::Array(rows)) => write_array_csv(wtr, rows),
            _ => write_fields(wtr, map),
        },
        Value::Array(arr) => write_array_csv(wtr, arr),
        _ => wtr.write_record([&format_csv_value(value)]),
    }
}

/// Two-column CSV: field, value
fn write_fields<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    map: &serde_json::Map<String, Value>,
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.as_str(), &format_csv_value(val)])?;
    }
    Ok(())
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    if arr.is_empty() {
        return Ok(());
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        wtr.write_record(&headers)?;

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                wtr.write_record(&row)?;
            }
        }
    } else {
        // Names list: one column
        wtr.write_record(["value"])?;
        for item in arr {
            wtr.write_record([&format_csv_value(item)])?;
        }
    }
    Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_value(&mut wtr, value).unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_names_list_gets_value_header() {
        let out = render(&json!({ "result": ["Myeong", "Yeouido"] }));
        assert_eq!(out, "value\nMyeong\nYeouido\n");
    }

    #[test]
    fn test_format_csv_value() {
        assert_eq!(format_csv_value(&json!("86.67")), "86.67");
        assert_eq!(format_csv_value(&Value::Null), "");
        assert_eq!(format_csv_value(&json!(3)), "3");
    }

    #[test]
    fn test_ranked_rows_use_first_row_headers() {
        let out = render(&json!({
            "result": [
                { "name": "Yeouido", "overallRank": 1 },
                { "name": "Seogyo", "overallRank": 5 }
            ]
        }));
        assert_eq!(out, "name,overallRank\nYeouido,1\nSeogyo,5\n");
    }

    #[test]
    fn test_single_object_result_is_field_value_pairs() {
        let out = render(&json!({ "result": { "totalUnits": 5 } }));
        assert_eq!(out, "field,value\ntotalUnits,5\n");
    }

    #[test]
    fn test_write_failure_is_reported() {
        struct Broken;
        impl io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }
        let mut wtr = csv::WriterBuilder::new().buffer_capacity(1).from_writer(Broken);
        let written = write_value(&mut wtr, &json!(["Myeong", "Yeouido"]))
            .and_then(|()| wtr.flush().map_err(csv::Error::from));
        assert!(written.is_err());
    }
}
