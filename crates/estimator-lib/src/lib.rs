//! Core library for the salary estimator service
//!
//! This crate provides the core functionality for:
//! - Profile input types and the fixed feature schema
//! - Feature encoding and schema validation
//! - ONNX model inference
//! - Health checks and observability

pub mod encoder;
pub mod health;
pub mod models;
pub mod observability;
pub mod predictor;

pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{EstimatorMetrics, StructuredLogger};
