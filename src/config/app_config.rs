use std::path::PathBuf;

use serde::Deserialize;

/// Orchestrator configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OrchestratorConfig {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub transforms: TransformsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout applied by the invoker
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransformsConfig {
    /// Root directory of per-app transform configuration files
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_ms: 30000 }
    }
}

impl Default for TransformsConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("config/transformers"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl OrchestratorConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("ORCHESTRATOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
