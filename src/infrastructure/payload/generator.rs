//! Payload generation seam and the schema-driven default generator

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::schema::{ParameterLocation, ResolvedSchema};
use crate::domain::workflow::{validate_operation_id, RequestDescriptor};
use crate::domain::DomainError;

/// Trait for turning an abstract operation id into a concrete request.
///
/// Implementations receive the free-form input text, the raw response text of
/// the previous step and the per-app state snapshot; how those are combined
/// into parameter and body values is implementation-defined.
#[async_trait]
pub trait PayloadGenerator: Send + Sync + std::fmt::Debug {
    async fn generate(
        &self,
        schema: &ResolvedSchema,
        text: &str,
        operation_id: &str,
        prev_api_response: &str,
        app_id: Option<&str>,
        state: &Value,
    ) -> Result<RequestDescriptor, DomainError>;
}

/// Mechanical generator that instantiates requests straight from the
/// operation's schema entry.
///
/// Parameter and body values are looked up by name, first in the state
/// snapshot, then in the previous step's response JSON. Body properties with
/// neither source fall back to the schema's declared default.
#[derive(Debug, Clone, Default)]
pub struct SchemaPayloadGenerator;

impl SchemaPayloadGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PayloadGenerator for SchemaPayloadGenerator {
    async fn generate(
        &self,
        schema: &ResolvedSchema,
        _text: &str,
        operation_id: &str,
        prev_api_response: &str,
        _app_id: Option<&str>,
        state: &Value,
    ) -> Result<RequestDescriptor, DomainError> {
        validate_operation_id(operation_id)?;

        let operation = schema.operation(operation_id).ok_or_else(|| {
            DomainError::not_found(format!(
                "Operation '{}' not found in resolved schema",
                operation_id
            ))
        })?;

        let base_url = schema.base_url().ok_or_else(|| {
            DomainError::configuration("Resolved schema declares no server base URL")
        })?;

        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), operation.path());
        let prev_json: Option<Value> = serde_json::from_str(prev_api_response).ok();

        let mut descriptor =
            RequestDescriptor::new(operation_id, operation.method(), endpoint);

        for parameter in operation.parameters() {
            let value = lookup(parameter.name(), state, prev_json.as_ref());

            match (value, parameter.location()) {
                (Some(v), ParameterLocation::Path) => {
                    descriptor = descriptor.with_path_param(parameter.name(), value_to_string(&v));
                }
                (Some(v), ParameterLocation::Query) => {
                    descriptor = descriptor.with_query_param(parameter.name(), value_to_string(&v));
                }
                // header parameters are satisfied by the forwarded inbound headers
                (Some(_), ParameterLocation::Header) => {}
                (None, _) if parameter.is_required() => {
                    return Err(DomainError::validation(format!(
                        "Missing value for required parameter '{}' of operation '{}'",
                        parameter.name(),
                        operation_id
                    )));
                }
                (None, _) => {}
            }
        }

        if operation.method().has_body() {
            if let Some(body_schema) = operation.request_body_schema() {
                descriptor = descriptor.with_body_schema(instantiate_body(
                    body_schema,
                    state,
                    prev_json.as_ref(),
                ));
            }
        }

        Ok(descriptor)
    }
}

/// Look a value up by name, state first, previous response second
fn lookup(name: &str, state: &Value, prev: Option<&Value>) -> Option<Value> {
    if let Some(value) = state.get(name) {
        if !value.is_null() {
            return Some(value.clone());
        }
    }

    prev.and_then(|p| p.get(name)).cloned().filter(|v| !v.is_null())
}

/// Build a request body from the declared object schema
fn instantiate_body(body_schema: &Value, state: &Value, prev: Option<&Value>) -> Value {
    let Some(properties) = body_schema.get("properties").and_then(Value::as_object) else {
        return Value::Object(Map::new());
    };

    let mut body = Map::new();
    for (name, property) in properties {
        if let Some(value) = lookup(name, state, prev) {
            body.insert(name.clone(), value);
        } else if let Some(default) = property.get("default") {
            body.insert(name.clone(), default.clone());
        }
    }

    Value::Object(body)
}

/// Convert a JSON value to its parameter string representation
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
