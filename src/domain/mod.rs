//! Domain layer - entities, errors and collaborator seams

pub mod error;
pub mod schema;
pub mod workflow;

pub use error::DomainError;
pub use schema::{OperationSpec, ParameterLocation, ParameterSpec, ResolvedSchema};
pub use workflow::{
    validate_operation_id, ExecutionOutcome, Flow, FlowStep, HttpMethod, RequestDescriptor,
    RunScope, RunState, StepError, WorkflowExecutor, WorkflowRecord, WORKFLOW_NAME_KEY,
};
