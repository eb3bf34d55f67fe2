//! Workflow executor trait

use std::collections::HashMap;

use async_trait::async_trait;

use super::entity::WorkflowRecord;
use super::outcome::ExecutionOutcome;
use crate::domain::schema::ResolvedSchema;

/// Ambient identifiers for a single run, forwarded to collaborators and log
/// context but not interpreted by the executor itself.
#[derive(Debug, Clone, Default)]
pub struct RunScope {
    /// Base URL of the target API server (diagnostic context)
    pub server_base_url: String,

    /// Application the workflow runs on behalf of; selects per-app state and
    /// per-app transform configurations
    pub app_id: Option<String>,

    /// Opaque identifier forwarded to the synthesizer
    pub bot_id: String,
}

impl RunScope {
    pub fn new(server_base_url: impl Into<String>, bot_id: impl Into<String>) -> Self {
        Self {
            server_base_url: server_base_url.into(),
            app_id: None,
            bot_id: bot_id.into(),
        }
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }
}

/// Trait for executing a workflow record against a resolved API schema.
///
/// `execute` is infallible by contract: every failure is folded into the
/// returned [`ExecutionOutcome`], either as an abort or as a logged skip.
#[async_trait]
pub trait WorkflowExecutor: Send + Sync + std::fmt::Debug {
    /// Run every step of every flow in order and synthesize a final text
    /// from the accumulated results.
    ///
    /// `headers` is the inbound request's header set, forwarded verbatim to
    /// every API call.
    async fn execute(
        &self,
        record: &WorkflowRecord,
        schema: &ResolvedSchema,
        text: &str,
        headers: &HashMap<String, String>,
        scope: &RunScope,
    ) -> ExecutionOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_scope_builder() {
        let scope = RunScope::new("https://api.example.com", "bot-1").with_app_id("crm");

        assert_eq!(scope.server_base_url, "https://api.example.com");
        assert_eq!(scope.app_id(), Some("crm"));
        assert_eq!(scope.bot_id, "bot-1");
    }

    #[test]
    fn test_run_scope_default_has_no_app() {
        let scope = RunScope::new("https://api.example.com", "bot-1");
        assert_eq!(scope.app_id(), None);
    }
}
