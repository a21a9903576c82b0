//! Event payload access
//!
//! Payloads arrive as loosely shaped JSON. Nothing here enforces a schema:
//! fields are read with defaults and any value headed for the terminal is
//! coerced to text.

use serde_json::Value;

/// Read a payload field.
///
/// Looks at the top level first, then inside a nested `data` mapping, since
/// some runtimes wrap event fields that way.
#[must_use]
pub fn field<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    data.get(key)
        .or_else(|| data.get("data").and_then(|inner| inner.get(key)))
}

/// Read a payload field as a string slice, if it is one.
#[must_use]
pub fn str_field<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    field(data, key).and_then(Value::as_str)
}

/// Textual form of a value for display.
///
/// Strings are returned verbatim, `null` becomes empty, and everything else
/// is rendered as compact JSON.
#[must_use]
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Truthiness of a value: null, false, zero and empty containers are false.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Flatten a reasoning block into plain text.
///
/// Providers that do not put their reasoning in a top-level `thinking` or
/// `text` string nest it in `summary`/`content` structures of arbitrary
/// depth. Every non-empty string found is collected depth-first and the
/// fragments are joined one per line.
#[must_use]
pub fn flatten_reasoning_block(block: &Value) -> String {
    let mut fragments = Vec::new();
    for key in ["thinking", "text", "summary", "content"] {
        if let Some(value) = block.get(key) {
            collect_fragments(value, &mut fragments);
        }
    }
    fragments.join("\n")
}

fn collect_fragments<'a>(value: &'a Value, fragments: &mut Vec<&'a str>) {
    match value {
        Value::String(s) if !s.is_empty() => fragments.push(s),
        Value::Object(map) => {
            for key in ["text", "thinking", "summary", "content"] {
                if let Some(inner) = map.get(key) {
                    collect_fragments(inner, fragments);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_fragments(item, fragments);
            }
        }
        // Empty strings, numbers, booleans and null carry no text
        _ => {}
    }
}
