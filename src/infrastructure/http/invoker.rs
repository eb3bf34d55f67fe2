use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::workflow::{HttpMethod, RequestDescriptor};
use crate::domain::DomainError;

/// Raw response of an API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw body text
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON
    pub fn json(&self) -> Result<Value, DomainError> {
        serde_json::from_str(&self.body)
            .map_err(|e| DomainError::provider("http", format!("API response is not JSON: {}", e)))
    }
}

/// Trait for invoking generated API requests (for mocking)
#[async_trait]
pub trait ApiInvoker: Send + Sync + std::fmt::Debug {
    /// Send the request, forwarding the given headers verbatim
    async fn call(
        &self,
        headers: &HashMap<String, String>,
        request: &RequestDescriptor,
    ) -> Result<ApiResponse, DomainError>;
}

/// Real API invoker using reqwest
#[derive(Debug, Clone)]
pub struct HttpApiInvoker {
    client: reqwest::Client,
}

impl HttpApiInvoker {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: std::time::Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

impl Default for HttpApiInvoker {
    fn default() -> Self {
        Self::new()
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::HEAD => reqwest::Method::HEAD,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
    }
}

#[async_trait]
impl ApiInvoker for HttpApiInvoker {
    async fn call(
        &self,
        headers: &HashMap<String, String>,
        request: &RequestDescriptor,
    ) -> Result<ApiResponse, DomainError> {
        let url = request.resolved_url();
        let mut builder = self.client.request(to_reqwest_method(request.method()), &url);

        for (key, value) in headers {
            builder = builder.header(key, value);
        }

        if !request.query_params().is_empty() {
            builder = builder.query(request.query_params());
        }

        if request.method().has_body() && !request.body_schema().is_null() {
            builder = builder.json(request.body_schema());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DomainError::provider("http", format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::provider("http", format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(DomainError::provider(
                "http",
                format!("HTTP {}: {}", status, body),
            ));
        }

        Ok(ApiResponse::new(status.as_u16(), body))
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::RwLock;

    /// Scripted invoker keyed by operation id
    #[derive(Debug, Default)]
    pub struct MockApiInvoker {
        responses: RwLock<HashMap<String, ApiResponse>>,
        errors: RwLock<HashMap<String, String>>,
        calls: RwLock<Vec<(RequestDescriptor, HashMap<String, String>)>>,
    }

    impl MockApiInvoker {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, operation_id: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
            self.responses
                .write()
                .unwrap()
                .insert(operation_id.into(), ApiResponse::new(status, body));
            self
        }

        pub fn with_error(self, operation_id: impl Into<String>, error: impl Into<String>) -> Self {
            self.errors
                .write()
                .unwrap()
                .insert(operation_id.into(), error.into());
            self
        }

        /// Requests seen so far, with the headers passed alongside them
        pub fn calls(&self) -> Vec<(RequestDescriptor, HashMap<String, String>)> {
            self.calls.read().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApiInvoker for MockApiInvoker {
        async fn call(
            &self,
            headers: &HashMap<String, String>,
            request: &RequestDescriptor,
        ) -> Result<ApiResponse, DomainError> {
            self.calls
                .write()
                .unwrap()
                .push((request.clone(), headers.clone()));

            if let Some(error) = self.errors.read().unwrap().get(request.operation_id()) {
                return Err(DomainError::provider("mock", error));
            }

            self.responses
                .read()
                .unwrap()
                .get(request.operation_id())
                .cloned()
                .ok_or_else(|| {
                    DomainError::provider(
                        "mock",
                        format!("No scripted response for operation '{}'", request.operation_id()),
                    )
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_response_json_decode() {
        let response = ApiResponse::new(200, r#"{"id": 1}"#);
        assert_eq!(response.json().unwrap(), json!({"id": 1}));

        let response = ApiResponse::new(200, "<html>oops</html>");
        let err = response.json().unwrap_err();
        assert!(err.to_string().contains("API response is not JSON"));
    }

    #[tokio::test]
    async fn test_call_substitutes_path_and_forwards_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/42"))
            .and(header("x-session", "abc"))
            .and(query_param("verbose", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":42}"#))
            .mount(&server)
            .await;

        let request = RequestDescriptor::new(
            "getUser",
            HttpMethod::GET,
            format!("{}/users/{{user_id}}", server.uri()),
        )
        .with_path_param("user_id", "42")
        .with_query_param("verbose", "true");

        let headers = HashMap::from([("x-session".to_string(), "abc".to_string())]);

        let invoker = HttpApiInvoker::new();
        let response = invoker.call(&headers, &request).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.text(), r#"{"id":42}"#);
    }

    #[tokio::test]
    async fn test_call_sends_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(json!({"name": "A"})))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":1,"name":"A"}"#))
            .mount(&server)
            .await;

        let request =
            RequestDescriptor::new("createUser", HttpMethod::POST, format!("{}/users", server.uri()))
                .with_body_schema(json!({"name": "A"}));

        let invoker = HttpApiInvoker::new();
        let response = invoker.call(&HashMap::new(), &request).await.unwrap();

        assert_eq!(response.status(), 201);
    }

    #[tokio::test]
    async fn test_call_non_success_status_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let request =
            RequestDescriptor::new("ping", HttpMethod::GET, format!("{}/down", server.uri()));

        let invoker = HttpApiInvoker::new();
        let err = invoker.call(&HashMap::new(), &request).await.unwrap_err();

        assert!(err.to_string().contains("HTTP 502"));
        assert!(err.to_string().contains("bad gateway"));
    }

    #[tokio::test]
    async fn test_call_transport_error() {
        let request =
            RequestDescriptor::new("ping", HttpMethod::GET, "http://127.0.0.1:1/unreachable");

        let invoker = HttpApiInvoker::new();
        let err = invoker.call(&HashMap::new(), &request).await.unwrap_err();

        assert!(err.to_string().contains("Request failed"));
    }
}
