//! Config-driven partial projection of response JSON
//!
//! A transform configuration mirrors the response structure and names only
//! the keys worth keeping. Objects are filtered key-by-key, arrays apply
//! their first element as a template to every item, and any scalar leaf in
//! the configuration means "take the full value here".

use serde_json::Value;

/// Reduce `full` to the shape described by `partial`
pub fn project(full: &Value, partial: &Value) -> Value {
    match partial {
        Value::Object(wanted) => match full {
            Value::Object(source) => Value::Object(
                wanted
                    .iter()
                    .filter_map(|(key, sub)| {
                        source.get(key).map(|value| (key.clone(), project(value, sub)))
                    })
                    .collect(),
            ),
            _ => Value::Null,
        },
        Value::Array(template) => match (full, template.first()) {
            (Value::Array(items), Some(item_template)) => Value::Array(
                items
                    .iter()
                    .map(|item| project(item, item_template))
                    .collect(),
            ),
            (Value::Array(items), None) => Value::Array(items.clone()),
            _ => Value::Null,
        },
        _ => full.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keeps_only_named_keys() {
        let full = json!({"id": 1, "name": "A", "internal_token": "secret"});
        let partial = json!({"id": true, "name": true});

        assert_eq!(project(&full, &partial), json!({"id": 1, "name": "A"}));
    }

    #[test]
    fn test_nested_projection() {
        let full = json!({
            "user": {"id": 1, "email": "a@example.com", "password_hash": "x"},
            "meta": {"page": 1}
        });
        let partial = json!({"user": {"id": true, "email": true}});

        assert_eq!(
            project(&full, &partial),
            json!({"user": {"id": 1, "email": "a@example.com"}})
        );
    }

    #[test]
    fn test_array_template_applied_to_every_item() {
        let full = json!({
            "items": [
                {"sku": "a", "price": 10, "warehouse": "x"},
                {"sku": "b", "price": 20, "warehouse": "y"}
            ]
        });
        let partial = json!({"items": [{"sku": true, "price": true}]});

        assert_eq!(
            project(&full, &partial),
            json!({"items": [{"sku": "a", "price": 10}, {"sku": "b", "price": 20}]})
        );
    }

    #[test]
    fn test_empty_array_template_keeps_items() {
        let full = json!([1, 2, 3]);
        let partial = json!([]);

        assert_eq!(project(&full, &partial), json!([1, 2, 3]));
    }

    #[test]
    fn test_missing_keys_are_dropped() {
        let full = json!({"id": 1});
        let partial = json!({"id": true, "absent": true});

        assert_eq!(project(&full, &partial), json!({"id": 1}));
    }

    #[test]
    fn test_shape_mismatch_yields_null() {
        let partial = json!({"id": true});
        assert_eq!(project(&json!([1, 2]), &partial), Value::Null);
        assert_eq!(project(&json!("text"), &json!([{ "a": true }])), Value::Null);
    }

    #[test]
    fn test_scalar_leaf_takes_full_value() {
        let full = json!({"count": 5});
        let partial = json!({"count": true});

        assert_eq!(project(&full, &partial), json!({"count": 5}));
    }
}
