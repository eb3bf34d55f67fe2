//! Mutable per-run accumulators threaded through the step loop

use indexmap::IndexMap;

use super::request::RequestDescriptor;

/// Fixed key seeded into the result map at run start
pub const WORKFLOW_NAME_KEY: &str = "Workflow Name";

/// State scoped to one workflow execution.
///
/// Both maps are insertion-ordered and only ever grow; a repeated operation
/// ID overwrites the value at its key. `prev_api_response` holds the raw body
/// text of the most recent successful call only, never a reduced value.
#[derive(Debug, Clone)]
pub struct RunState {
    api_request_data: IndexMap<String, RequestDescriptor>,
    prev_api_response: String,
    record_info: IndexMap<String, String>,
}

impl RunState {
    /// Create run state seeded with the workflow name entry
    pub fn new(workflow_name: &str) -> Self {
        let mut record_info = IndexMap::new();
        record_info.insert(WORKFLOW_NAME_KEY.to_string(), workflow_name.to_string());

        Self {
            api_request_data: IndexMap::new(),
            prev_api_response: String::new(),
            record_info,
        }
    }

    /// Record the generated request for an attempted step
    pub fn record_request(&mut self, operation_id: &str, request: RequestDescriptor) {
        self.api_request_data
            .insert(operation_id.to_string(), request);
    }

    /// Record the reduced result for a completed step
    pub fn record_result(&mut self, operation_id: &str, reduced: String) {
        self.record_info.insert(operation_id.to_string(), reduced);
    }

    /// Replace the previous-response context with the latest raw body text
    pub fn set_prev_response(&mut self, body: String) {
        self.prev_api_response = body;
    }

    pub fn prev_response(&self) -> &str {
        &self.prev_api_response
    }

    pub fn api_request_data(&self) -> &IndexMap<String, RequestDescriptor> {
        &self.api_request_data
    }

    pub fn record_info(&self) -> &IndexMap<String, String> {
        &self.record_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workflow::request::HttpMethod;

    fn descriptor(op: &str) -> RequestDescriptor {
        RequestDescriptor::new(op, HttpMethod::GET, format!("https://x.test/{}", op))
    }

    #[test]
    fn test_new_seeds_workflow_name() {
        let state = RunState::new("My workflow");

        assert_eq!(state.record_info().len(), 1);
        assert_eq!(
            state.record_info().get(WORKFLOW_NAME_KEY),
            Some(&"My workflow".to_string())
        );
        assert!(state.api_request_data().is_empty());
        assert_eq!(state.prev_response(), "");
    }

    #[test]
    fn test_results_preserve_insertion_order() {
        let mut state = RunState::new("wf");
        state.record_result("first", "1".to_string());
        state.record_result("second", "2".to_string());

        let keys: Vec<&str> = state.record_info().keys().map(String::as_str).collect();
        assert_eq!(keys, vec![WORKFLOW_NAME_KEY, "first", "second"]);
    }

    #[test]
    fn test_operation_id_collision_overwrites() {
        let mut state = RunState::new("wf");
        state.record_request("getUser", descriptor("getUser"));
        state.record_result("getUser", "old".to_string());
        state.record_request("getUser", descriptor("getUser").with_query_param("v", "2"));
        state.record_result("getUser", "new".to_string());

        assert_eq!(state.api_request_data().len(), 1);
        assert_eq!(state.record_info().len(), 2);
        assert_eq!(state.record_info().get("getUser"), Some(&"new".to_string()));
        assert_eq!(
            state
                .api_request_data()
                .get("getUser")
                .unwrap()
                .query_params()
                .get("v"),
            Some(&"2".to_string())
        );
    }

    #[test]
    fn test_prev_response_replaced_not_appended() {
        let mut state = RunState::new("wf");
        state.set_prev_response("{\"a\":1}".to_string());
        state.set_prev_response("{\"b\":2}".to_string());

        assert_eq!(state.prev_response(), "{\"b\":2}");
    }
}
