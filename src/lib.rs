//! PMP Workflow Orchestrator
//!
//! Executes the declared API operations of a workflow record against an
//! externally described HTTP API, feeding each step's raw response into the
//! next step's payload generation and folding each step's reduced response
//! into a running result map, then synthesizes a final text from everything
//! gathered.
//!
//! The executor composes pluggable collaborators: a payload generator, an
//! HTTP invoker, a transform-config loader with a schema-driven fallback
//! reducer, a state provider and a synthesizer. Default implementations of
//! each ship in [`infrastructure`]; resolution of the OpenAPI document
//! itself happens outside this crate and arrives as a
//! [`domain::schema::ResolvedSchema`] handle.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::OrchestratorConfig;

pub use domain::{
    ExecutionOutcome, Flow, FlowStep, HttpMethod, OperationSpec, ParameterLocation, ParameterSpec,
    RequestDescriptor, ResolvedSchema, RunScope, WorkflowExecutor, WorkflowRecord,
};

pub use infrastructure::http::{ApiInvoker, ApiResponse, HttpApiInvoker};
pub use infrastructure::observability::init_tracing;
pub use infrastructure::payload::{PayloadGenerator, SchemaPayloadGenerator};
pub use infrastructure::state::{InMemoryStateProvider, StateProvider};
pub use infrastructure::synthesis::{SummarySynthesizer, Synthesizer};
pub use infrastructure::transform::{
    FileConfigLoader, OutlineReducer, SchemaReducer, TransformConfigLoader,
};
pub use infrastructure::workflow::WorkflowExecutorImpl;
