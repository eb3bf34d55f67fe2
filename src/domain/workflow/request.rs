//! Typed request descriptor produced by payload generation

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP request method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
}

impl HttpMethod {
    /// Whether requests with this method carry a body
    pub fn has_body(&self) -> bool {
        matches!(self, Self::POST | Self::PUT | Self::PATCH | Self::DELETE)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GET => "GET",
            Self::POST => "POST",
            Self::PUT => "PUT",
            Self::DELETE => "DELETE",
            Self::PATCH => "PATCH",
            Self::HEAD => "HEAD",
            Self::OPTIONS => "OPTIONS",
        }
    }
}

/// Concrete request for one API operation, with named transport fields
/// consumed by the invoker.
///
/// Path parameters are kept separate from the endpoint: the endpoint retains
/// its `{param}` placeholders and the invoker substitutes them at call time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestDescriptor {
    /// Operation ID this request was generated for
    operation_id: String,

    /// Absolute URL, possibly containing `{param}` placeholders
    endpoint: String,

    /// HTTP method
    #[serde(default)]
    method: HttpMethod,

    /// Values for `{param}` placeholders in the endpoint
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    path_params: HashMap<String, String>,

    /// Query string parameters
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    query_params: HashMap<String, String>,

    /// Request body (null when the operation takes none)
    #[serde(default)]
    body_schema: Value,
}

impl RequestDescriptor {
    /// Create a new descriptor for an operation
    pub fn new(
        operation_id: impl Into<String>,
        method: HttpMethod,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            operation_id: operation_id.into(),
            endpoint: endpoint.into(),
            method,
            path_params: HashMap::new(),
            query_params: HashMap::new(),
            body_schema: Value::Null,
        }
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    pub fn with_body_schema(mut self, body: Value) -> Self {
        self.body_schema = body;
        self
    }

    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path_params(&self) -> &HashMap<String, String> {
        &self.path_params
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    pub fn body_schema(&self) -> &Value {
        &self.body_schema
    }

    /// Endpoint with all `{param}` placeholders substituted
    pub fn resolved_url(&self) -> String {
        let mut url = self.endpoint.clone();
        for (name, value) in &self.path_params {
            url = url.replace(&format!("{{{}}}", name), value);
        }
        url
    }
}
