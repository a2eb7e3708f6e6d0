//! Salary Estimator - profile-based salary prediction service
//!
//! Serves a small profile form and produces salary estimates by running
//! a pre-trained regression model loaded once at startup.

use anyhow::{Context, Result};
use estimator_lib::{
    health::{components, HealthRegistry},
    observability::{EstimatorMetrics, StructuredLogger},
    predictor::{OnnxPredictor, Predictor},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting salary-estimator");

    // Load configuration
    let config = config::EstimatorConfig::load()?;
    info!(model_path = %config.model_path, "Service configured");

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::PREDICTOR).await;
    health_registry.register(components::API).await;

    // Initialize metrics and structured logging
    let metrics = EstimatorMetrics::new();
    let logger = StructuredLogger::new("salary-estimator");
    logger.log_startup(SERVICE_VERSION, &config.model_version);

    // Load the model once; a failure here is fatal since the process
    // cannot serve any estimate without it.
    let predictor = OnnxPredictor::from_path(&config.model_path, &config.model_version)
        .with_context(|| format!("cannot serve estimates without a model ({})", config.model_path))?;
    metrics.set_model_version(predictor.model_version());
    logger.log_model_loaded(&config.model_path, predictor.model_version());

    let predictor: Arc<dyn Predictor> = Arc::new(predictor);

    // Create shared application state
    let app_state = Arc::new(api::AppState::new(
        predictor,
        health_registry.clone(),
        metrics,
        logger.clone(),
    ));

    // Mark the service as ready now that the model is loaded
    health_registry.set_ready(true).await;

    // Start the API server
    tokio::spawn(api::serve(config.api_port, app_state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");

    Ok(())
}
