//! Service configuration

use anyhow::Result;
use serde::Deserialize;

/// Estimator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    /// API server port for the form, estimate and health endpoints
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Path to the trained salary model artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Version label reported for the loaded model
    #[serde(default = "default_model_version")]
    pub model_version: String,
}

fn default_api_port() -> u16 {
    8080
}

fn default_model_path() -> String {
    "models/salary2025.onnx".to_string()
}

fn default_model_version() -> String {
    "v0.1.0".to_string()
}

impl EstimatorConfig {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("ESTIMATOR"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| EstimatorConfig {
            api_port: default_api_port(),
            model_path: default_model_path(),
            model_version: default_model_version(),
        }))
    }
}
