//! Purpose: Render JSON as a single line in the spacing AWS CLI docs use.
//! Exports: `render_json`.
//! Role: Small, pure formatter feeding the policy envelope builder.
//! Invariants: Members are separated by ", "; object keys are followed by ": ".
//! Invariants: Output re-parses to the input value.
use serde_json::Value;

pub fn render_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(val) => out.push_str(if *val { "true" } else { "false" }),
        Value::Number(num) => out.push_str(&num.to_string()),
        Value::String(text) => {
            let encoded = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
            out.push_str(&encoded);
        }
        Value::Array(items) => write_array(items, out),
        Value::Object(map) => write_object(map, out),
    }
}

fn write_array(items: &[Value], out: &mut String) {
    out.push('[');
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        write_value(item, out);
    }
    out.push(']');
}

fn write_object(map: &serde_json::Map<String, Value>, out: &mut String) {
    out.push('{');
    for (idx, (key, value)) in map.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        let encoded = serde_json::to_string(key).unwrap_or_else(|_| "\"\"".to_string());
        out.push_str(&encoded);
        out.push_str(": ");
        write_value(value, out);
    }
    out.push('}');
}
