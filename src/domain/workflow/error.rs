//! Step failure severities

use thiserror::Error;

/// Failure of a single step, split into the two severities the executor
/// enforces: a `Fatal` call failure aborts the whole run, anything else is
/// logged and the step is skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StepError {
    /// HTTP transport error or non-JSON response body
    #[error("API call failed for operation '{operation_id}': {message}")]
    Fatal {
        operation_id: String,
        message: String,
    },

    /// Any other per-step failure: payload generation, transform config
    /// loading, transform application
    #[error("Step '{operation_id}' failed: {message}")]
    Recoverable {
        operation_id: String,
        message: String,
    },
}

impl StepError {
    pub fn fatal(operation_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fatal {
            operation_id: operation_id.into(),
            message: message.into(),
        }
    }

    pub fn recoverable(operation_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Recoverable {
            operation_id: operation_id.into(),
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }

    pub fn operation_id(&self) -> &str {
        match self {
            Self::Fatal { operation_id, .. } | Self::Recoverable { operation_id, .. } => {
                operation_id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StepError::fatal("getUser", "connection refused");
        assert_eq!(
            err.to_string(),
            "API call failed for operation 'getUser': connection refused"
        );
        assert!(err.is_fatal());

        let err = StepError::recoverable("getUser", "no such operation");
        assert_eq!(err.to_string(), "Step 'getUser' failed: no such operation");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_operation_id_accessor() {
        assert_eq!(StepError::fatal("a", "x").operation_id(), "a");
        assert_eq!(StepError::recoverable("b", "x").operation_id(), "b");
    }
}
