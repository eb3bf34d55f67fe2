//! Workflow step executor implementation

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::OrchestratorConfig;
use crate::domain::schema::ResolvedSchema;
use crate::domain::workflow::{
    ExecutionOutcome, RunScope, RunState, StepError, WorkflowExecutor, WorkflowRecord,
};
use crate::infrastructure::http::{ApiInvoker, HttpApiInvoker};
use crate::infrastructure::payload::{PayloadGenerator, SchemaPayloadGenerator};
use crate::infrastructure::state::{InMemoryStateProvider, StateProvider};
use crate::infrastructure::synthesis::{SummarySynthesizer, Synthesizer};
use crate::infrastructure::transform::{
    project, FileConfigLoader, OutlineReducer, SchemaReducer, TransformConfigLoader,
};

/// Workflow step executor.
///
/// Runs flows in order and steps within a flow in order; each step's request
/// is generated against the raw response text of the most recent successful
/// call. A transport or JSON-decoding failure aborts the whole run; any other
/// step failure is logged and skipped.
pub struct WorkflowExecutorImpl {
    payload_generator: Arc<dyn PayloadGenerator>,
    invoker: Arc<dyn ApiInvoker>,
    config_loader: Arc<dyn TransformConfigLoader>,
    reducer: Arc<dyn SchemaReducer>,
    synthesizer: Arc<dyn Synthesizer>,
    state_provider: Arc<dyn StateProvider>,
}

impl WorkflowExecutorImpl {
    pub fn new(
        payload_generator: Arc<dyn PayloadGenerator>,
        invoker: Arc<dyn ApiInvoker>,
        config_loader: Arc<dyn TransformConfigLoader>,
        reducer: Arc<dyn SchemaReducer>,
        synthesizer: Arc<dyn Synthesizer>,
        state_provider: Arc<dyn StateProvider>,
    ) -> Self {
        Self {
            payload_generator,
            invoker,
            config_loader,
            reducer,
            synthesizer,
            state_provider,
        }
    }

    /// Create an executor wired with the shipped default collaborators
    pub fn from_config(config: &OrchestratorConfig) -> Self {
        Self::new(
            Arc::new(SchemaPayloadGenerator::new()),
            Arc::new(HttpApiInvoker::with_timeout(Duration::from_millis(
                config.http.timeout_ms,
            ))),
            Arc::new(FileConfigLoader::new(config.transforms.config_dir.clone())),
            Arc::new(OutlineReducer::new()),
            Arc::new(SummarySynthesizer::new()),
            Arc::new(InMemoryStateProvider::new()),
        )
    }

    /// Run one step: generate the request, invoke it and fold the reduced
    /// response into the accumulators.
    async fn run_step(
        &self,
        schema: &ResolvedSchema,
        text: &str,
        headers: &HashMap<String, String>,
        app_id: Option<&str>,
        operation_id: &str,
        state_snapshot: &Value,
        run: &mut RunState,
    ) -> Result<(), StepError> {
        let request = self
            .payload_generator
            .generate(
                schema,
                text,
                operation_id,
                run.prev_response(),
                app_id,
                state_snapshot,
            )
            .await
            .map_err(|e| {
                StepError::recoverable(operation_id, format!("Payload generation failed: {}", e))
            })?;

        run.record_request(operation_id, request.clone());

        info!(operation_id, payload = %request.body_schema(), "Making API call");

        let response = self
            .invoker
            .call(headers, &request)
            .await
            .map_err(|e| StepError::fatal(operation_id, e.to_string()))?;

        let response_json = response
            .json()
            .map_err(|e| StepError::fatal(operation_id, e.to_string()))?;

        run.set_prev_response(response.text().to_string());

        let partial_config = self
            .config_loader
            .load(app_id, operation_id)
            .await
            .map_err(|e| {
                StepError::recoverable(operation_id, format!("Transform config load failed: {}", e))
            })?;

        let reduced = match partial_config {
            None => {
                warn!(
                    operation_id,
                    "No transform config found; consider adding one for this operation id"
                );
                self.reducer
                    .reduce(schema, request.endpoint(), response.text())
            }
            Some(partial) => {
                debug!(operation_id, "Applying transform config");
                let projected = project(&response_json, &partial);
                serde_json::to_string(&projected).map_err(|e| {
                    StepError::recoverable(
                        operation_id,
                        format!("Failed to serialize reduced response: {}", e),
                    )
                })?
            }
        };

        run.record_result(operation_id, reduced);
        Ok(())
    }

    async fn execute_inner(
        &self,
        record: &WorkflowRecord,
        schema: &ResolvedSchema,
        text: &str,
        headers: &HashMap<String, String>,
        scope: &RunScope,
    ) -> ExecutionOutcome {
        debug!("Executing workflow '{}'", record.name());

        let app_id = scope.app_id();
        let state_snapshot = self.state_provider.snapshot(app_id, headers).await;
        let mut run = RunState::new(record.name());

        for flow in record.flows() {
            for step in flow.steps() {
                let operation_id = step.open_api_operation_id();

                match self
                    .run_step(
                        schema,
                        text,
                        headers,
                        app_id,
                        operation_id,
                        &state_snapshot,
                        &mut run,
                    )
                    .await
                {
                    Ok(()) => {}
                    Err(StepError::Fatal {
                        operation_id: failed_op,
                        message,
                    }) => {
                        error!(
                            operation_id = %failed_op,
                            error = %message,
                            "API call failed, aborting run"
                        );
                        return ExecutionOutcome::aborted(failed_op, message);
                    }
                    Err(step_error) => {
                        error!(
                            operation_id,
                            text,
                            server_base_url = %scope.server_base_url,
                            app = app_id.unwrap_or_default(),
                            headers = ?headers.keys().collect::<Vec<_>>(),
                            error = %step_error,
                            "Step failed, skipping"
                        );
                    }
                }
            }
        }

        let summary = self
            .synthesizer
            .synthesize(text, run.record_info(), run.api_request_data(), &scope.bot_id)
            .await;

        ExecutionOutcome::completed(summary)
    }
}

impl fmt::Debug for WorkflowExecutorImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowExecutorImpl").finish_non_exhaustive()
    }
}

#[async_trait]
impl WorkflowExecutor for WorkflowExecutorImpl {
    async fn execute(
        &self,
        record: &WorkflowRecord,
        schema: &ResolvedSchema,
        text: &str,
        headers: &HashMap<String, String>,
        scope: &RunScope,
    ) -> ExecutionOutcome {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "workflow_run",
            run_id = %run_id,
            workflow = %record.name(),
            bot = %scope.bot_id
        );

        self.execute_inner(record, schema, text, headers, scope)
            .instrument(span)
            .await
    }
}
