use anyhow::{Context, Result};
use jde_config_core::KnowledgeBase;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Name reported by the index and health endpoints
    #[serde(default = "default_service_name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Allow cross-origin requests from any origin
    #[serde(default = "default_enabled")]
    pub cors: bool,

    /// Log a span for every request
    #[serde(default = "default_enabled")]
    pub request_trace: bool,
}

fn default_service_name() -> String {
    "jde-config-server".to_string()
}

fn default_enabled() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cors: default_enabled(),
            request_trace: default_enabled(),
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if !config_path.exists() {
            tracing::info!(
                path = %config_path.display(),
                "Configuration file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(config_path).context("Failed to read configuration file")?;
        let config = toml::from_str(&content).context("Failed to parse configuration file")?;
        tracing::info!(path = %config_path.display(), "Loaded configuration");

        Ok(config)
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub kb: Arc<KnowledgeBase>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            config: config.clone(),
            kb: Arc::new(KnowledgeBase::load()),
        }
    }
}
