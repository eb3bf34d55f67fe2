//! Generic schema-driven response reduction
//!
//! Fallback used when an operation has no transform configuration: the raw
//! response is reduced to a compact textual outline, keeping the operation's
//! declared response fields when the schema names any.

use serde_json::Value;

use crate::domain::schema::ResolvedSchema;

/// Trait for the generic response reducer, keyed by the request's declared
/// endpoint. Infallible: unusable input degrades to a raw-text excerpt.
pub trait SchemaReducer: Send + Sync + std::fmt::Debug {
    fn reduce(&self, schema: &ResolvedSchema, endpoint: &str, raw_response: &str) -> String;
}

/// Default reducer rendering an indented `key: value` outline
#[derive(Debug, Clone)]
pub struct OutlineReducer {
    max_depth: usize,
    max_array_items: usize,
    max_raw_excerpt: usize,
}

impl OutlineReducer {
    pub fn new() -> Self {
        Self {
            max_depth: 4,
            max_array_items: 5,
            max_raw_excerpt: 400,
        }
    }

    fn outline(&self, value: &Value, indent: usize, out: &mut String) {
        if indent >= self.max_depth {
            out.push_str(&compact(value));
            out.push('\n');
            return;
        }

        let pad = "  ".repeat(indent);
        match value {
            Value::Object(map) if map.is_empty() => {
                out.push_str(&pad);
                out.push_str("{}\n");
            }
            Value::Object(map) => {
                for (key, field) in map {
                    if field.is_object() || field.is_array() {
                        out.push_str(&format!("{}{}:\n", pad, key));
                        self.outline(field, indent + 1, out);
                    } else {
                        out.push_str(&format!("{}{}: {}\n", pad, key, scalar(field)));
                    }
                }
            }
            Value::Array(items) => {
                for item in items.iter().take(self.max_array_items) {
                    if item.is_object() || item.is_array() {
                        out.push_str(&format!("{}-\n", pad));
                        self.outline(item, indent + 1, out);
                    } else {
                        out.push_str(&format!("{}- {}\n", pad, scalar(item)));
                    }
                }
                if items.len() > self.max_array_items {
                    out.push_str(&format!(
                        "{}(+{} more)\n",
                        pad,
                        items.len() - self.max_array_items
                    ));
                }
            }
            scalar_value => {
                out.push_str(&pad);
                out.push_str(&scalar(scalar_value));
                out.push('\n');
            }
        }
    }
}

impl Default for OutlineReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaReducer for OutlineReducer {
    fn reduce(&self, schema: &ResolvedSchema, endpoint: &str, raw_response: &str) -> String {
        let Ok(json) = serde_json::from_str::<Value>(raw_response) else {
            let mut excerpt = raw_response.to_string();
            excerpt.truncate(self.max_raw_excerpt);
            return excerpt;
        };

        let declared_fields = schema
            .operation_for_endpoint(endpoint)
            .map(|op| op.response_fields())
            .filter(|fields| !fields.is_empty());

        let reduced = match (&json, declared_fields) {
            (Value::Object(map), Some(fields)) => Value::Object(
                fields
                    .iter()
                    .filter_map(|name| map.get(name).map(|v| (name.clone(), v.clone())))
                    .collect(),
            ),
            _ => json,
        };

        let mut out = String::new();
        self.outline(&reduced, 0, &mut out);
        out.trim_end().to_string()
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
