//! Flattening nested financial documents for model prompts
//!
//! Nested object keys are joined with a separator; list items use their
//! index as a key segment. The transform is pure and deterministic, so
//! test fixtures reproduce exactly.

use serde_json::{Map, Value};

/// Flatten a nested JSON object into dotted/indexed scalar keys
///
/// `flatten_json(&json!({"a": {"b": 1, "c": [2, 3]}}), "_")` yields
/// `{"a_b": 1, "a_c_0": 2, "a_c_1": 3}`.
pub fn flatten_json(data: &Value, separator: &str) -> Map<String, Value> {
    let mut out = Map::new();
    if let Value::Object(map) = data {
        for (key, value) in map {
            flatten_into(&mut out, key.clone(), value, separator);
        }
    }
    out
}

fn flatten_into(out: &mut Map<String, Value>, key: String, value: &Value, separator: &str) {
    match value {
        Value::Object(map) => {
            for (child_key, child) in map {
                flatten_into(out, format!("{key}{separator}{child_key}"), child, separator);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(out, format!("{key}{separator}{i}"), item, separator);
            }
        }
        scalar => {
            out.insert(key, scalar.clone());
        }
    }
}

/// Options for [`format_for_model`]
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Start delimiter wrapped around the JSON body
    pub delimiter_start: String,

    /// End delimiter wrapped around the JSON body
    pub delimiter_end: String,

    /// Whether to flatten nested structures first
    pub flatten_nested: bool,

    /// Top-level keys removed before formatting
    pub exclude_keys: Vec<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            delimiter_start: "BEGIN_JSON".to_string(),
            delimiter_end: "END_JSON".to_string(),
            flatten_nested: false,
            exclude_keys: Vec::new(),
        }
    }
}

/// Format a JSON document for a model prompt
///
/// Produces `{task_description}\n{start}\n{compact json}\n{end}`.
pub fn format_for_model(data: &Value, task_description: &str, options: &FormatOptions) -> String {
    let mut data = data.clone();
    if !options.exclude_keys.is_empty() {
        if let Value::Object(map) = &mut data {
            map.retain(|key, _| !options.exclude_keys.contains(key));
        }
    }

    let body = if options.flatten_nested {
        Value::Object(flatten_json(&data, "_"))
    } else {
        data
    };

    // Compact form; flattening already removed nesting when requested
    let json_string = body.to_string();
    format!(
        "{task_description}\n{}\n{json_string}\n{}",
        options.delimiter_start, options.delimiter_end
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_objects_and_lists() {
        let flat = flatten_json(&json!({"a": {"b": 1, "c": [2, 3]}}), "_");
        assert_eq!(flat.get("a_b"), Some(&json!(1)));
        assert_eq!(flat.get("a_c_0"), Some(&json!(2)));
        assert_eq!(flat.get("a_c_1"), Some(&json!(3)));
        assert_eq!(flat.len(), 3);
    }

    #[test]
    fn test_flatten_list_of_objects() {
        let flat = flatten_json(&json!({"items": [{"x": 1}, {"x": 2}]}), "_");
        assert_eq!(flat.get("items_0_x"), Some(&json!(1)));
        assert_eq!(flat.get("items_1_x"), Some(&json!(2)));
    }

    #[test]
    fn test_flatten_scalar_passthrough() {
        let flat = flatten_json(&json!({"plain": "value"}), "_");
        assert_eq!(flat.get("plain"), Some(&json!("value")));
    }

    #[test]
    fn test_format_for_model_with_flatten_and_excludes() {
        let data = json!({"keep": {"v": 1}, "drop": true});
        let prompt = format_for_model(
            &data,
            "Analyse these financial metrics",
            &FormatOptions {
                flatten_nested: true,
                exclude_keys: vec!["drop".to_string()],
                ..FormatOptions::default()
            },
        );
        assert!(prompt.starts_with("Analyse these financial metrics\nBEGIN_JSON\n"));
        assert!(prompt.ends_with("\nEND_JSON"));
        assert!(prompt.contains("keep_v"));
        assert!(!prompt.contains("drop"));
    }
}
