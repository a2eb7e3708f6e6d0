//! ML prediction engine

mod inference;
mod output;

pub use inference::{ModelError, OnnxPredictor};
pub use output::{format_usd, EstimateFormatter, RANGE_MARGIN};

use crate::models::FeatureVector;
use anyhow::Result;

/// Trait for prediction implementations
pub trait Predictor: Send + Sync {
    /// Predict an annual salary in USD from an encoded feature vector
    ///
    /// Takes `&self` and never mutates, so one instance can serve
    /// concurrent callers without locking.
    fn predict(&self, features: &FeatureVector) -> Result<f32>;

    /// Version label of the loaded model
    fn model_version(&self) -> &str;
}
