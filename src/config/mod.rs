//! Typed application configuration

mod app_config;

pub use app_config::{HttpConfig, LogFormat, LoggingConfig, OrchestratorConfig, TransformsConfig};
