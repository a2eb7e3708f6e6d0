//! ONNX inference using tract
//!
//! Loads the trained salary regression artifact from disk and runs
//! single-row inference on encoded feature vectors.

use super::Predictor;
use crate::encoder::NUM_FEATURES;
use crate::models::FeatureVector;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tract_onnx::prelude::*;
use tracing::{debug, warn};

/// Maximum inference latency before warning (5ms target)
const MAX_INFERENCE_MS: u128 = 5;

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Errors from loading or running the model artifact
#[derive(Debug, Error)]
pub enum ModelError {
    /// Fatal at startup: the process cannot serve estimates without a
    /// model and there is no retry or degraded mode.
    #[error("failed to load salary model from {path}")]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("model returned no output values")]
    EmptyOutput,
}

/// ONNX-based salary predictor
///
/// The optimized plan is immutable after construction; predictions only
/// read it.
#[derive(Debug)]
pub struct OnnxPredictor {
    model: TractModel,
    version: String,
}

impl OnnxPredictor {
    /// Load and optimize the model artifact from disk
    pub fn from_path(path: impl AsRef<Path>, version: impl Into<String>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let model = Self::load_model(path).map_err(|source| ModelError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Salary model loaded");
        Ok(Self {
            model,
            version: version.into(),
        })
    }

    fn load_model(path: &Path) -> Result<TractModel> {
        let model = tract_onnx::onnx()
            .model_for_path(path)
            .context("Failed to parse ONNX model")?
            .with_input_fact(0, f32::fact([1, NUM_FEATURES]).into())
            .context("Failed to set input shape")?
            .into_optimized()
            .context("Failed to optimize model")?
            .into_runnable()
            .context("Failed to create runnable model")?;
        Ok(model)
    }

    /// Convert a validated feature vector to the single-row input tensor
    fn features_to_tensor(&self, features: &FeatureVector) -> Result<Tensor> {
        let array = tract_ndarray::Array2::from_shape_vec((1, NUM_FEATURES), features.values())
            .context("Feature vector does not match the model input shape")?;
        Ok(array.into())
    }
}

impl Predictor for OnnxPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<f32> {
        let start = Instant::now();

        let input = self.features_to_tensor(features)?;
        let result = self.model.run(tvec!(input.into()))?;
        let output = result.first().context("No output from model")?;
        let output_view = output.to_array_view::<f32>()?;
        let predicted = output_view
            .iter()
            .next()
            .copied()
            .ok_or(ModelError::EmptyOutput)?;

        let elapsed = start.elapsed();
        if elapsed.as_millis() > MAX_INFERENCE_MS {
            warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                "Inference exceeded {}ms target", MAX_INFERENCE_MS
            );
        } else {
            debug!(elapsed_us = elapsed.as_micros() as u64, "Inference completed");
        }

        Ok(predicted)
    }

    fn model_version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_rejects_garbage_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not an onnx model").unwrap();

        let err = OnnxPredictor::from_path(file.path(), "v0.0.0").unwrap_err();
        match err {
            ModelError::Load { ref path, .. } => assert_eq!(path, file.path()),
            ref other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_missing_artifact() {
        let err = OnnxPredictor::from_path("/nonexistent/salary.onnx", "v0.0.0").unwrap_err();
        assert!(matches!(err, ModelError::Load { .. }));
    }
}
