//! Workflow domain module
//!
//! A workflow record is an ordered list of flows, each an ordered list of
//! steps naming an API operation by its OpenAPI operation id. Execution
//! threads state strictly forward: each step's request is generated from the
//! previous step's raw response, and each step's reduced result is folded
//! into an insertion-ordered accumulator visible to the final synthesis.

mod entity;
mod error;
mod executor;
mod outcome;
mod request;
mod state;

pub use entity::{
    validate_operation_id, Flow, FlowStep, WorkflowRecord, MAX_OPERATION_ID_LENGTH,
};
pub use error::StepError;
pub use executor::{RunScope, WorkflowExecutor};
pub use outcome::ExecutionOutcome;
pub use request::{HttpMethod, RequestDescriptor};
pub use state::{RunState, WORKFLOW_NAME_KEY};
