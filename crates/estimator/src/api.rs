//! HTTP surface: profile form, estimate endpoint, health checks and
//! Prometheus metrics

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use estimator_lib::{
    encoder::{self, FeatureSchema},
    health::{ComponentStatus, HealthRegistry},
    models::{Country, Education, ProfileInput, SalaryEstimate},
    observability::{EstimatorMetrics, StructuredLogger},
    predictor::{format_usd, EstimateFormatter, Predictor},
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Upper bound of the years-of-experience slider
const MAX_YEARS_CODING: u8 = 40;

/// Shared application state
pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
    pub schema: FeatureSchema,
    pub formatter: EstimateFormatter,
    pub health_registry: HealthRegistry,
    pub metrics: EstimatorMetrics,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(
        predictor: Arc<dyn Predictor>,
        health_registry: HealthRegistry,
        metrics: EstimatorMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            predictor,
            schema: FeatureSchema::new(),
            formatter: EstimateFormatter::new(),
            health_registry,
            metrics,
            logger,
        }
    }
}

/// Raw form fields as posted by the profile page
///
/// Unchecked toggles are simply absent from the form body, hence the
/// serde defaults.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub education: String,
    pub years_coding: u8,
    pub country: String,
    #[serde(default)]
    pub knows_java: bool,
    #[serde(default)]
    pub knows_python: bool,
    #[serde(default)]
    pub knows_sql: bool,
    #[serde(default)]
    pub knows_go: bool,
}

/// Estimate payload returned to the result surface
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub predicted_usd: f32,
    pub low_usd: f32,
    pub high_usd: f32,
    pub predicted_display: String,
    pub range_display: String,
    pub model_version: String,
    pub generated_at: i64,
}

impl From<SalaryEstimate> for EstimateResponse {
    fn from(estimate: SalaryEstimate) -> Self {
        Self {
            predicted_display: format_usd(estimate.predicted_usd),
            range_display: format!(
                "{} - {}",
                format_usd(estimate.low_usd),
                format_usd(estimate.high_usd)
            ),
            predicted_usd: estimate.predicted_usd,
            low_usd: estimate.low_usd,
            high_usd: estimate.high_usd,
            model_version: estimate.model_version,
            generated_at: estimate.generated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn reject(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

/// The profile form
async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// Produce a salary estimate from the posted profile
///
/// Education must be one of the form's labels; an unrecognized country
/// folds into the one-hot baseline. Schema validation failures block the
/// predict call and surface the offending columns.
async fn estimate(
    State(state): State<Arc<AppState>>,
    Form(request): Form<EstimateRequest>,
) -> Response {
    let education = match request.education.parse::<Education>() {
        Ok(education) => education,
        Err(err) => {
            state.metrics.inc_input_errors();
            state.logger.log_rejected("input", &err.to_string());
            return reject(StatusCode::UNPROCESSABLE_ENTITY, err.to_string());
        }
    };

    let profile = ProfileInput {
        education,
        // The slider bounds years on the client; clamp here so a bypassed
        // form cannot push values outside the trained range.
        years_coding: request.years_coding.min(MAX_YEARS_CODING),
        country: Country::from_label(&request.country),
        knows_java: request.knows_java,
        knows_python: request.knows_python,
        knows_sql: request.knows_sql,
        knows_go: request.knows_go,
    };

    let vector = encoder::encode(&profile);
    if let Err(err) = state.schema.validate(&vector) {
        state.metrics.inc_schema_errors();
        state.logger.log_rejected("schema", &err.to_string());
        return reject(StatusCode::UNPROCESSABLE_ENTITY, err.to_string());
    }

    let start = Instant::now();
    let predicted = match state.predictor.predict(&vector) {
        Ok(predicted) => predicted,
        Err(err) => {
            state.metrics.inc_prediction_errors();
            state.logger.log_prediction_failure(&err.to_string());
            return reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "prediction failed".to_string(),
            );
        }
    };
    state
        .metrics
        .observe_prediction_latency(start.elapsed().as_secs_f64());
    state.metrics.inc_estimates();

    let estimate = state
        .formatter
        .format(predicted, state.predictor.model_version());
    state.logger.log_estimate(&profile, &estimate);

    (StatusCode::OK, Json(EstimateResponse::from(estimate))).into_response()
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 once the model is loaded
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/estimate", post(estimate))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Salary Estimator</title>
</head>
<body>
  <h1>Salary Estimator</h1>
  <p>Fill out your details below to get an estimated salary prediction based on your profile.</p>
  <form method="post" action="/estimate">
    <fieldset>
      <legend>Profile Information</legend>
      <label>
        Highest education level
        <select name="education">
          <option>High School</option>
          <option>Bachelor's Degree</option>
          <option>Master's Degree</option>
          <option>PhD</option>
        </select>
      </label>
      <label>
        Years of programming experience
        <input type="range" name="years_coding" min="0" max="40" value="3">
      </label>
      <label>
        Country
        <select name="country">
          <option>United States</option>
          <option>United Kingdom</option>
          <option>Germany</option>
          <option>Other</option>
        </select>
      </label>
    </fieldset>
    <fieldset>
      <legend>Programming Languages Known</legend>
      <label><input type="checkbox" name="knows_java" value="true"> Java</label>
      <label><input type="checkbox" name="knows_python" value="true"> Python</label>
      <label><input type="checkbox" name="knows_sql" value="true"> SQL</label>
      <label><input type="checkbox" name="knows_go" value="true"> Go</label>
    </fieldset>
    <button type="submit">Estimate My Salary</button>
  </form>
</body>
</html>
"#;
