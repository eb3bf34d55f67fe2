//! Per-app, per-operation transform configuration loading

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::workflow::validate_operation_id;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Trait for loading the optional partial-extraction configuration of an
/// operation. Absence is a valid, logged outcome.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransformConfigLoader: Send + Sync {
    async fn load<'a>(
        &self,
        app_id: Option<&'a str>,
        operation_id: &'a str,
    ) -> Result<Option<Value>, DomainError>;
}

/// File-backed loader: `{root}/{app_id}/{operation_id}.json`, falling back to
/// `{root}/{operation_id}.json` for configs shared across apps.
#[derive(Debug, Clone)]
pub struct FileConfigLoader {
    root: PathBuf,
}

impl FileConfigLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn candidates(&self, app_id: Option<&str>, operation_id: &str) -> Vec<PathBuf> {
        let file_name = format!("{}.json", operation_id);
        let mut paths = Vec::new();

        if let Some(app) = app_id {
            paths.push(self.root.join(app).join(&file_name));
        }
        paths.push(self.root.join(&file_name));
        paths
    }
}

#[async_trait]
impl TransformConfigLoader for FileConfigLoader {
    async fn load<'a>(
        &self,
        app_id: Option<&'a str>,
        operation_id: &'a str,
    ) -> Result<Option<Value>, DomainError> {
        // the id doubles as a file name, so garbage must not reach the path join
        validate_operation_id(operation_id)?;

        for path in self.candidates(app_id, operation_id) {
            match tokio::fs::read_to_string(&path).await {
                Ok(contents) => {
                    let config = serde_json::from_str(&contents).map_err(|e| {
                        DomainError::configuration(format!(
                            "Invalid transform config {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    return Ok(Some(config));
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(DomainError::configuration(format!(
                        "Failed to read transform config {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }

        Ok(None)
    }
}
