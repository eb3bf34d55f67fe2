//! Workflow record entities

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Maximum length for operation IDs
pub const MAX_OPERATION_ID_LENGTH: usize = 100;

/// Regex pattern for valid operation IDs: alphanumeric plus `_`, `.` and `-`
static OPERATION_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.-]+$").unwrap());

/// Validate an operation ID string
pub fn validate_operation_id(id: &str) -> Result<(), DomainError> {
    if id.is_empty() {
        return Err(DomainError::validation("Operation ID cannot be empty"));
    }

    if id.len() > MAX_OPERATION_ID_LENGTH {
        return Err(DomainError::validation(format!(
            "Operation ID exceeds maximum length of {} characters",
            MAX_OPERATION_ID_LENGTH
        )));
    }

    if !OPERATION_ID_PATTERN.is_match(id) {
        return Err(DomainError::validation(format!(
            "Invalid operation ID '{}': must be alphanumeric with '_', '.' or '-'",
            id
        )));
    }

    Ok(())
}

/// A single declared API operation invocation within a flow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowStep {
    /// Operation ID correlating this step to a schema-described API operation
    /// and an optional transform configuration
    open_api_operation_id: String,
}

impl FlowStep {
    /// Create a new step for the given operation ID
    pub fn new(operation_id: impl Into<String>) -> Self {
        Self {
            open_api_operation_id: operation_id.into(),
        }
    }

    /// Get the operation ID
    pub fn open_api_operation_id(&self) -> &str {
        &self.open_api_operation_id
    }
}

/// An ordered group of steps within a workflow record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Flow {
    /// Optional flow name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    /// Ordered list of steps; order is significant, each step may depend on
    /// the previous step's response
    #[serde(default)]
    steps: Vec<FlowStep>,
}

impl Flow {
    /// Create a new empty flow
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_step(mut self, step: FlowStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_steps(mut self, steps: Vec<FlowStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn steps(&self) -> &[FlowStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// An immutable workflow definition: ordered flows of ordered steps
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowRecord {
    /// Human-readable workflow name
    name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// Ordered list of flows; may be absent in stored records
    #[serde(default)]
    flows: Vec<Flow>,
}

impl WorkflowRecord {
    /// Create a new workflow record
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            flows: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_flow(mut self, flow: Flow) -> Self {
        self.flows.push(flow);
        self
    }

    pub fn with_flows(mut self, flows: Vec<Flow>) -> Self {
        self.flows = flows;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    pub fn is_empty(&self) -> bool {
        self.flows.iter().all(Flow::is_empty)
    }

    /// Total number of steps across all flows
    pub fn step_count(&self) -> usize {
        self.flows.iter().map(|f| f.steps().len()).sum()
    }
}
