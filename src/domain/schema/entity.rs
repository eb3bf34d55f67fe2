//! Resolved API schema handle
//!
//! Resolution of the OpenAPI document happens outside this crate; what
//! arrives here is an already-flattened view of the operations a workflow
//! may invoke, keyed by operation id.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::workflow::HttpMethod;

/// Where an operation parameter is carried
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
}

/// A single declared operation parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParameterSpec {
    name: String,
    location: ParameterLocation,

    #[serde(default)]
    required: bool,
}

impl ParameterSpec {
    pub fn path(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ParameterLocation::Path,
            // path segments are always required
            required: true,
        }
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ParameterLocation::Query,
            required: false,
        }
    }

    pub fn header(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ParameterLocation::Header,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> ParameterLocation {
        self.location
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Flattened view of one schema-described operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationSpec {
    /// Operation id as declared in the API document
    operation_id: String,

    /// Path template relative to the server base URL, with `{param}` segments
    path: String,

    /// HTTP method
    method: HttpMethod,

    /// Optional operation summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<String>,

    /// Declared parameters
    #[serde(default)]
    parameters: Vec<ParameterSpec>,

    /// JSON schema of the request body, when the operation takes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_body_schema: Option<Value>,

    /// Top-level property names of the declared success response, used by
    /// the generic response reducer
    #[serde(default)]
    response_fields: Vec<String>,
}

impl OperationSpec {
    pub fn new(
        operation_id: impl Into<String>,
        method: HttpMethod,
        path: impl Into<String>,
    ) -> Self {
        Self {
            operation_id: operation_id.into(),
            path: path.into(),
            method,
            summary: None,
            parameters: Vec::new(),
            request_body_schema: None,
            response_fields: Vec::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_request_body_schema(mut self, schema: Value) -> Self {
        self.request_body_schema = Some(schema);
        self
    }

    pub fn with_response_fields(mut self, fields: Vec<String>) -> Self {
        self.response_fields = fields;
        self
    }

    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn request_body_schema(&self) -> Option<&Value> {
        self.request_body_schema.as_ref()
    }

    pub fn response_fields(&self) -> &[String] {
        &self.response_fields
    }
}

/// Pre-resolved API schema: operation lookup plus the server base URL the
/// document declared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ResolvedSchema {
    /// API title, when the document declared one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    /// Server base URL from the document's server list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,

    /// Operations keyed by operation id, in document order
    #[serde(default)]
    operations: IndexMap<String, OperationSpec>,
}

impl ResolvedSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_operation(mut self, operation: OperationSpec) -> Self {
        self.operations
            .insert(operation.operation_id().to_string(), operation);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Look up an operation by id
    pub fn operation(&self, operation_id: &str) -> Option<&OperationSpec> {
        self.operations.get(operation_id)
    }

    pub fn contains(&self, operation_id: &str) -> bool {
        self.operations.contains_key(operation_id)
    }

    pub fn operation_ids(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Find the operation whose path the given endpoint resolves to
    pub fn operation_for_endpoint(&self, endpoint: &str) -> Option<&OperationSpec> {
        self.operations
            .values()
            .find(|op| endpoint.ends_with(op.path()))
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
