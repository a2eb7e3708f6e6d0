//! Observability infrastructure for the estimator service
//!
//! Provides:
//! - Prometheus metrics (prediction latency, estimate/rejection counts, model version)
//! - Structured JSON logging with tracing

use crate::models::{ProfileInput, SalaryEstimate};
use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, GaugeVec, Histogram, IntCounter,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<EstimatorMetricsInner> = OnceLock::new();

/// Inner metrics structure that holds the actual Prometheus metrics
struct EstimatorMetricsInner {
    prediction_latency_seconds: Histogram,
    estimates_total: IntCounter,
    schema_errors_total: IntCounter,
    input_errors_total: IntCounter,
    prediction_errors_total: IntCounter,
    model_version_info: GaugeVec,
}

impl EstimatorMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram!(
                "salary_estimator_prediction_latency_seconds",
                "Time spent running model inference for an estimate",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            estimates_total: register_int_counter!(
                "salary_estimator_estimates_total",
                "Total number of salary estimates produced"
            )
            .expect("Failed to register estimates_total"),

            schema_errors_total: register_int_counter!(
                "salary_estimator_schema_errors_total",
                "Total number of feature vectors rejected by schema validation"
            )
            .expect("Failed to register schema_errors_total"),

            input_errors_total: register_int_counter!(
                "salary_estimator_input_errors_total",
                "Total number of requests rejected while parsing profile input"
            )
            .expect("Failed to register input_errors_total"),

            prediction_errors_total: register_int_counter!(
                "salary_estimator_prediction_errors_total",
                "Total number of model inference failures"
            )
            .expect("Failed to register prediction_errors_total"),

            model_version_info: register_gauge_vec!(
                "salary_estimator_model_version_info",
                "Information about the currently loaded salary model",
                &["version"]
            )
            .expect("Failed to register model_version_info"),
        }
    }
}

/// Estimator metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct EstimatorMetrics {
    _private: (),
}

impl Default for EstimatorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimatorMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(EstimatorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &EstimatorMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record a prediction latency observation
    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner().prediction_latency_seconds.observe(duration_secs);
    }

    pub fn inc_estimates(&self) {
        self.inner().estimates_total.inc();
    }

    pub fn inc_schema_errors(&self) {
        self.inner().schema_errors_total.inc();
    }

    pub fn inc_input_errors(&self) {
        self.inner().input_errors_total.inc();
    }

    pub fn inc_prediction_errors(&self) {
        self.inner().prediction_errors_total.inc();
    }

    /// Update model version info
    pub fn set_model_version(&self, version: &str) {
        self.inner().model_version_info.reset();
        self.inner()
            .model_version_info
            .with_label_values(&[version])
            .set(1.0);
    }
}

/// Structured logger for estimator events
///
/// Provides consistent JSON-formatted logging for estimates, rejected
/// requests, and lifecycle events.
#[derive(Clone)]
pub struct StructuredLogger {
    service: String,
}

impl StructuredLogger {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Log a produced estimate
    pub fn log_estimate(&self, profile: &ProfileInput, estimate: &SalaryEstimate) {
        info!(
            event = "estimate_produced",
            service = %self.service,
            education = %profile.education.label(),
            years_coding = profile.years_coding,
            country = %profile.country.label(),
            knows_java = profile.knows_java,
            knows_python = profile.knows_python,
            knows_sql = profile.knows_sql,
            knows_go = profile.knows_go,
            predicted_usd = estimate.predicted_usd,
            low_usd = estimate.low_usd,
            high_usd = estimate.high_usd,
            model_version = %estimate.model_version,
            "Produced salary estimate"
        );
    }

    /// Log a request rejected before reaching the model
    pub fn log_rejected(&self, stage: &str, reason: &str) {
        warn!(
            event = "request_rejected",
            service = %self.service,
            stage = %stage,
            reason = %reason,
            "Rejected estimate request"
        );
    }

    /// Log a model inference failure
    pub fn log_prediction_failure(&self, reason: &str) {
        warn!(
            event = "prediction_failed",
            service = %self.service,
            reason = %reason,
            "Model inference failed"
        );
    }

    /// Log a successful model load
    pub fn log_model_loaded(&self, path: &str, model_version: &str) {
        info!(
            event = "model_loaded",
            service = %self.service,
            path = %path,
            model_version = %model_version,
            "Salary model loaded"
        );
    }

    /// Log service startup
    pub fn log_startup(&self, version: &str, model_version: &str) {
        info!(
            event = "service_started",
            service = %self.service,
            service_version = %version,
            model_version = %model_version,
            "Salary estimator started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            service = %self.service,
            reason = %reason,
            "Salary estimator shutting down"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Country, Education};

    #[test]
    fn test_metrics_handle_records_observations() {
        // Metrics live in a process-wide registry, so a single handle is
        // exercised rather than asserted on.
        let metrics = EstimatorMetrics::new();

        metrics.observe_prediction_latency(0.002);
        metrics.inc_estimates();
        metrics.inc_schema_errors();
        metrics.inc_input_errors();
        metrics.inc_prediction_errors();
        metrics.set_model_version("v1.0.0");
    }

    #[test]
    fn test_structured_logger_events() {
        let logger = StructuredLogger::new("test-estimator");
        assert_eq!(logger.service, "test-estimator");

        let profile = ProfileInput {
            education: Education::Bachelors,
            years_coding: 5,
            country: Country::UnitedStates,
            knows_java: true,
            knows_python: true,
            knows_sql: false,
            knows_go: false,
        };
        let estimate = SalaryEstimate {
            predicted_usd: 95_000.0,
            low_usd: 80_750.0,
            high_usd: 109_250.0,
            model_version: "v1.0.0".to_string(),
            generated_at: 0,
        };

        logger.log_estimate(&profile, &estimate);
        logger.log_rejected("schema", "missing column");
        logger.log_model_loaded("models/salary2025.onnx", "v1.0.0");
    }
}
