//! Predictor - the full inference pipeline
//!
//! record → vector → scaler → engine → arg-max → label
//!
//! Artifacts are loaded once and shared read-only. A failure at any step
//! fails that request only; there is no fallback path.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::logic::features::{layout_hash, FeatureVector, LayoutDrift, StudentRecord, FEATURE_COUNT, FEATURE_VERSION};
use crate::logic::model::artifact::{self, ArtifactInfo};
use crate::logic::model::{
    Backend, DenseNetwork, InferenceEngine, InferenceError, LabelDecoder, LabelError, OnnxEngine,
    Scaler, ScalerError, ScalerKind,
};


// ============================================================================
// CONFIG
// ============================================================================

/// Where the artifacts live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_path: PathBuf,
    pub backend: Backend,
    pub scaler_path: PathBuf,
    /// JSON array of class names; `None` keeps the default order
    pub labels_path: Option<PathBuf>,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("scaling failed: {0}")]
    Scaler(#[from] ScalerError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("stale feature vector: {0}")]
    Layout(#[from] LayoutDrift),

    #[error("label decoding failed: {0}")]
    Label(#[from] LabelError),

    #[error("failed to read artifact {path}: {source}")]
    Artifact {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub class_index: usize,
    /// Raw model output, one score per class
    pub probabilities: Vec<f32>,
    pub inference_time_us: u64,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicted Class: {}", self.label)
    }
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub backend: Backend,
    pub model: Option<ArtifactInfo>,
    pub scaler: Option<ArtifactInfo>,
    pub scaler_kind: ScalerKind,
    pub classes: Vec<String>,
    pub feature_count: usize,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Engine Status for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub inference_device: String,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
    pub metadata: ModelMetadata,
}

// ============================================================================
// PREDICTOR
// ============================================================================

pub struct Predictor {
    scaler: Scaler,
    engine: Box<dyn InferenceEngine>,
    labels: LabelDecoder,
    metadata: ModelMetadata,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl Predictor {
    /// Assemble from already-loaded parts
    pub fn new(scaler: Scaler, engine: Box<dyn InferenceEngine>, labels: LabelDecoder) -> Self {
        let metadata = ModelMetadata {
            backend: engine.backend(),
            model: None,
            scaler: None,
            scaler_kind: scaler.kind,
            classes: labels.classes().to_vec(),
            feature_count: FEATURE_COUNT,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            loaded_at: chrono::Utc::now(),
        };

        Self {
            scaler,
            engine,
            labels,
            metadata,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    /// Load every artifact named in the config
    pub fn load(config: &ModelConfig) -> Result<Self, PredictError> {
        let engine: Box<dyn InferenceEngine> = match config.backend {
            Backend::Onnx => Box::new(OnnxEngine::load(&config.model_path)?),
            Backend::Dense => Box::new(DenseNetwork::load(&config.model_path)?),
        };
        let scaler = Scaler::load(&config.scaler_path)?;
        let labels = match &config.labels_path {
            Some(path) => LabelDecoder::load(path)?,
            None => LabelDecoder::default(),
        };

        let model_info = fingerprint(&config.model_path)?;
        let scaler_info = fingerprint(&config.scaler_path)?;

        log::info!("Predictor ready: {} backend, classes {:?}", engine.backend(), labels.classes());

        let mut predictor = Self::new(scaler, engine, labels);
        predictor.metadata.model = Some(model_info);
        predictor.metadata.scaler = Some(scaler_info);
        Ok(predictor)
    }

    /// Predict from a form submission
    pub fn predict(&self, record: &StudentRecord) -> Result<Prediction, PredictError> {
        self.predict_vector(&record.to_vector())
    }

    /// Predict from an assembled vector; stamps from another layout are refused
    pub fn predict_vector(&self, vector: &FeatureVector) -> Result<Prediction, PredictError> {
        vector.check_layout()?;
        log::trace!("Feature vector: {}", vector.to_log_entry());
        self.predict_values(vector.as_slice())
    }

    /// Run the pipeline on raw values in layout order
    pub fn predict_values(&self, values: &[f32]) -> Result<Prediction, PredictError> {
        let start_time = Instant::now();

        let scaled = self.scaler.transform(values)?;
        let probabilities = self.engine.predict_proba(&scaled)?;
        let (class_index, label) = self.labels.decode_scores(&probabilities)?;
        let label = label.to_string();

        let inference_time_us = start_time.elapsed().as_micros() as u64;

        // Track metrics
        self.latency_sum_us.fetch_add(inference_time_us, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        log::debug!("Predicted {} (class {}, {:?}) in {}us", label, class_index, probabilities, inference_time_us);

        Ok(Prediction {
            label,
            class_index,
            probabilities,
            inference_time_us,
        })
    }

    pub fn classes(&self) -> &[String] {
        self.labels.classes()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: true,
            inference_device: self.engine.device().to_string(),
            avg_latency_ms: avg,
            inference_count: count,
            metadata: self.metadata.clone(),
        }
    }
}

fn fingerprint(path: &Path) -> Result<ArtifactInfo, PredictError> {
    artifact::fingerprint(path).map_err(|source| PredictError::Artifact {
        path: path.display().to_string(),
        source,
    })
}
