//! Per-app conversational state snapshots

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

/// Trait for fetching the state snapshot a run's payload generation sees.
///
/// The snapshot is opaque to the executor; it is fetched once at run start
/// and passed unchanged to every payload generation.
#[async_trait]
pub trait StateProvider: Send + Sync + std::fmt::Debug {
    async fn snapshot(&self, app_id: Option<&str>, headers: &HashMap<String, String>) -> Value;
}

/// In-memory provider keeping one state document per app
#[derive(Debug, Default)]
pub struct InMemoryStateProvider {
    states: std::sync::RwLock<HashMap<String, Value>>,
}

impl InMemoryStateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state document for an app
    pub fn set_state(&self, app_id: impl Into<String>, state: Value) {
        self.states.write().unwrap().insert(app_id.into(), state);
    }
}

#[async_trait]
impl StateProvider for InMemoryStateProvider {
    async fn snapshot(&self, app_id: Option<&str>, _headers: &HashMap<String, String>) -> Value {
        app_id
            .and_then(|app| self.states.read().unwrap().get(app).cloned())
            .unwrap_or(Value::Null)
    }
}
