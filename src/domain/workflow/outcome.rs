//! Tagged outcome of a workflow run

use serde::{Deserialize, Serialize};

/// Result of executing a workflow record.
///
/// A broken API call invalidates the whole workflow's narrative, so a
/// transport or JSON-decoding failure aborts the run instead of producing a
/// partial synthesis. The two variants let callers branch on that without
/// inspecting the shape of the returned value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// A step's API call failed at the transport layer or returned a
    /// non-JSON body; no synthesis was attempted
    Aborted {
        /// Operation whose call failed
        operation_id: String,

        /// Failure description
        reason: String,
    },

    /// The run completed and the synthesizer produced a final text, possibly
    /// over an empty result map
    Completed {
        /// Synthesized summary text
        text: String,
    },
}

impl ExecutionOutcome {
    /// Create an aborted outcome
    pub fn aborted(operation_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Aborted {
            operation_id: operation_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a completed outcome
    pub fn completed(text: impl Into<String>) -> Self {
        Self::Completed { text: text.into() }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    /// Synthesized text, if the run completed
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Completed { text } => Some(text),
            Self::Aborted { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_outcome() {
        let outcome = ExecutionOutcome::completed("All done");

        assert!(!outcome.is_aborted());
        assert_eq!(outcome.text(), Some("All done"));
    }

    #[test]
    fn test_aborted_outcome() {
        let outcome = ExecutionOutcome::aborted("getUser", "connection refused");

        assert!(outcome.is_aborted());
        assert_eq!(outcome.text(), None);
    }

    #[test]
    fn test_serialization() {
        let outcome = ExecutionOutcome::aborted("getUser", "HTTP 502");
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"status\":\"aborted\""));
        assert!(json.contains("\"operation_id\":\"getUser\""));

        let deserialized: ExecutionOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, outcome);
    }
}
