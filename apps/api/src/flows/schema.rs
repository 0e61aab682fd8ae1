//! Builders for declared output shapes, in the OpenAPI subset the
//! Generative Language API accepts as `responseSchema`.

use serde_json::{json, Map, Value};

pub fn string(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

pub fn integer(description: &str) -> Value {
    json!({ "type": "INTEGER", "description": description })
}

pub fn enumeration(values: &[&str], description: &str) -> Value {
    json!({ "type": "STRING", "enum": values, "description": description })
}

pub fn array(items: Value, description: &str) -> Value {
    json!({ "type": "ARRAY", "items": items, "description": description })
}

pub fn string_list(description: &str) -> Value {
    array(json!({ "type": "STRING" }), description)
}

/// An object whose properties are all required, in declaration order.
pub fn object(properties: Vec<(&str, Value)>) -> Value {
    let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
    let ordering = required.clone();
    let props: Map<String, Value> = properties
        .into_iter()
        .map(|(name, shape)| (name.to_string(), shape))
        .collect();
    json!({
        "type": "OBJECT",
        "properties": props,
        "required": required,
        "propertyOrdering": ordering,
    })
}
