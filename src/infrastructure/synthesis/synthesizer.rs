//! Final response synthesis

use async_trait::async_trait;
use indexmap::IndexMap;
use tracing::debug;

use crate::domain::workflow::{RequestDescriptor, WORKFLOW_NAME_KEY};

/// Trait for rendering the final text from the accumulated run results.
///
/// Infallible by contract; implementations backed by fallible services are
/// expected to degrade to a best-effort rendering internally.
#[async_trait]
pub trait Synthesizer: Send + Sync + std::fmt::Debug {
    async fn synthesize(
        &self,
        text: &str,
        record_info: &IndexMap<String, String>,
        api_request_data: &IndexMap<String, RequestDescriptor>,
        bot_id: &str,
    ) -> String;
}

/// Deterministic synthesizer rendering one section per operation result
#[derive(Debug, Clone, Default)]
pub struct SummarySynthesizer;

impl SummarySynthesizer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Synthesizer for SummarySynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        record_info: &IndexMap<String, String>,
        api_request_data: &IndexMap<String, RequestDescriptor>,
        bot_id: &str,
    ) -> String {
        debug!(bot_id, operations = api_request_data.len(), "rendering workflow summary");

        let workflow_name = record_info
            .get(WORKFLOW_NAME_KEY)
            .map(String::as_str)
            .unwrap_or("unnamed");

        let mut out = format!(
            "Workflow '{}' ran {} operation(s) for: {}\n",
            workflow_name,
            api_request_data.len(),
            text
        );

        for (operation_id, result) in record_info {
            if operation_id == WORKFLOW_NAME_KEY {
                continue;
            }

            match api_request_data.get(operation_id) {
                Some(request) => out.push_str(&format!(
                    "\n{} ({} {}):\n{}\n",
                    operation_id,
                    request.method().as_str(),
                    request.endpoint(),
                    result
                )),
                None => out.push_str(&format!("\n{}:\n{}\n", operation_id, result)),
            }
        }

        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workflow::HttpMethod;

    fn request(op: &str) -> RequestDescriptor {
        RequestDescriptor::new(op, HttpMethod::GET, format!("https://x.test/{}", op))
    }

    #[tokio::test]
    async fn test_renders_header_and_sections() {
        let synthesizer = SummarySynthesizer::new();

        let mut record_info = IndexMap::new();
        record_info.insert(WORKFLOW_NAME_KEY.to_string(), "Onboarding".to_string());
        record_info.insert("getUser".to_string(), "id: 1\nname: A".to_string());

        let mut requests = IndexMap::new();
        requests.insert("getUser".to_string(), request("getUser"));

        let summary = synthesizer
            .synthesize("fetch my user", &record_info, &requests, "bot-1")
            .await;

        assert!(summary.starts_with("Workflow 'Onboarding' ran 1 operation(s) for: fetch my user"));
        assert!(summary.contains("getUser (GET https://x.test/getUser):"));
        assert!(summary.contains("name: A"));
    }

    #[tokio::test]
    async fn test_empty_run_renders_header_only() {
        let synthesizer = SummarySynthesizer::new();

        let mut record_info = IndexMap::new();
        record_info.insert(WORKFLOW_NAME_KEY.to_string(), "Empty".to_string());

        let summary = synthesizer
            .synthesize("nothing to do", &record_info, &IndexMap::new(), "bot-1")
            .await;

        assert_eq!(summary, "Workflow 'Empty' ran 0 operation(s) for: nothing to do");
    }

    #[tokio::test]
    async fn test_result_without_request_entry_still_rendered() {
        let synthesizer = SummarySynthesizer::new();

        let mut record_info = IndexMap::new();
        record_info.insert(WORKFLOW_NAME_KEY.to_string(), "wf".to_string());
        record_info.insert("getUser".to_string(), "ok".to_string());

        let summary = synthesizer
            .synthesize("q", &record_info, &IndexMap::new(), "bot-1")
            .await;

        assert!(summary.contains("getUser:\nok"));
    }
}
