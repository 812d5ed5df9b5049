//! Value-level schema for structured model output
//!
//! A [`Schema`] is a plain tagged value describing the shape the model must
//! produce. The caller uses it three ways: it is sent to the provider to
//! constrain generation, it fills in declared defaults for fields the model
//! omits, and it type-checks the result before deserialization. Loop and
//! aggregation code depend only on the resulting typed value, never on how
//! validation happened.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

/// A type that can be requested from the model in structured mode
pub trait StructuredOutput: DeserializeOwned {
    /// Describe the expected shape, including per-field defaults
    fn schema() -> Schema;
}

/// Description of an expected output shape
#[derive(Debug, Clone)]
pub enum Schema {
    /// A string field, with an optional declared default
    String {
        /// Field description shown to the model
        description: String,
        /// Value used when the model omits the field
        default: Option<String>,
    },

    /// A boolean field
    Boolean {
        /// Field description shown to the model
        description: String,
        /// Value used when the model omits the field
        default: Option<bool>,
    },

    /// An integer field
    Integer {
        /// Field description shown to the model
        description: String,
        /// Value used when the model omits the field
        default: Option<i64>,
    },

    /// A homogeneous list; defaults to empty, never null
    Array {
        /// Field description shown to the model
        description: String,
        /// Schema of each element
        items: Box<Schema>,
    },

    /// A record with named properties
    Object {
        /// Description shown to the model
        description: String,
        /// Named properties in declaration order
        properties: Vec<(String, Schema)>,
    },
}

impl Schema {
    /// String field without a declared default (defaults to `""`)
    pub fn string(description: impl Into<String>) -> Self {
        Self::String {
            description: description.into(),
            default: None,
        }
    }

    /// String field with a declared default
    pub fn string_with_default(description: impl Into<String>, default: impl Into<String>) -> Self {
        Self::String {
            description: description.into(),
            default: Some(default.into()),
        }
    }

    /// Boolean field with a declared default
    pub fn boolean_with_default(description: impl Into<String>, default: bool) -> Self {
        Self::Boolean {
            description: description.into(),
            default: Some(default),
        }
    }

    /// Integer field with a declared default
    pub fn integer_with_default(description: impl Into<String>, default: i64) -> Self {
        Self::Integer {
            description: description.into(),
            default: Some(default),
        }
    }

    /// Array field
    pub fn array(description: impl Into<String>, items: Schema) -> Self {
        Self::Array {
            description: description.into(),
            items: Box::new(items),
        }
    }

    /// Object field
    pub fn object(
        description: impl Into<String>,
        properties: Vec<(&str, Schema)>,
    ) -> Self {
        Self::Object {
            description: description.into(),
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
        }
    }

    /// The value used for this schema when the model omits the field
    ///
    /// Sentinel defaults: empty string, `false`, `0`, empty list, or an
    /// object of its properties' defaults. Absence is never represented.
    pub fn default_value(&self) -> Value {
        match self {
            Self::String { default, .. } => {
                Value::String(default.clone().unwrap_or_default())
            }
            Self::Boolean { default, .. } => Value::Bool(default.unwrap_or(false)),
            Self::Integer { default, .. } => json!(default.unwrap_or(0)),
            Self::Array { .. } => Value::Array(Vec::new()),
            Self::Object { properties, .. } => {
                let mut map = Map::new();
                for (name, schema) in properties {
                    map.insert(name.clone(), schema.default_value());
                }
                Value::Object(map)
            }
        }
    }

    /// Fill in declared defaults for missing or null fields, recursively
    pub fn apply_defaults(&self, value: &mut Value) {
        match self {
            Self::Object { properties, .. } => {
                if let Value::Object(map) = value {
                    for (name, schema) in properties {
                        match map.get_mut(name) {
                            None => {
                                map.insert(name.clone(), schema.default_value());
                            }
                            Some(slot) if slot.is_null() => {
                                *slot = schema.default_value();
                            }
                            Some(slot) => schema.apply_defaults(slot),
                        }
                    }
                }
            }
            Self::Array { items, .. } => {
                if let Value::Array(elements) = value {
                    for element in elements {
                        items.apply_defaults(element);
                    }
                }
            }
            _ => {
                if value.is_null() {
                    *value = self.default_value();
                }
            }
        }
    }

    /// Type-check a (defaulted) value against this schema
    pub fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        self.validate_at(value, "$")
    }

    fn validate_at(&self, value: &Value, path: &str) -> std::result::Result<(), String> {
        match self {
            Self::String { .. } if value.is_string() => Ok(()),
            Self::Boolean { .. } if value.is_boolean() => Ok(()),
            Self::Integer { .. } if value.is_i64() || value.is_u64() => Ok(()),
            Self::Array { items, .. } => {
                let elements = value
                    .as_array()
                    .ok_or_else(|| format!("{path}: expected array"))?;
                for (i, element) in elements.iter().enumerate() {
                    items.validate_at(element, &format!("{path}[{i}]"))?;
                }
                Ok(())
            }
            Self::Object { properties, .. } => {
                let map = value
                    .as_object()
                    .ok_or_else(|| format!("{path}: expected object"))?;
                for (name, schema) in properties {
                    let field = map
                        .get(name)
                        .ok_or_else(|| format!("{path}.{name}: missing field"))?;
                    schema.validate_at(field, &format!("{path}.{name}"))?;
                }
                Ok(())
            }
            _ => Err(format!("{path}: type mismatch")),
        }
    }

    /// Render the schema in the provider wire format (OpenAPI-style types)
    pub fn to_value(&self) -> Value {
        match self {
            Self::String { description, .. } => json!({
                "type": "STRING",
                "description": description,
            }),
            Self::Boolean { description, .. } => json!({
                "type": "BOOLEAN",
                "description": description,
            }),
            Self::Integer { description, .. } => json!({
                "type": "INTEGER",
                "description": description,
            }),
            Self::Array { description, items } => json!({
                "type": "ARRAY",
                "description": description,
                "items": items.to_value(),
            }),
            Self::Object {
                description,
                properties,
            } => {
                let mut props = Map::new();
                for (name, schema) in properties {
                    props.insert(name.clone(), schema.to_value());
                }
                json!({
                    "type": "OBJECT",
                    "description": description,
                    "properties": props,
                })
            }
        }
    }
}
