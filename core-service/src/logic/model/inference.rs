//! Inference Engine - ONNX Runtime Integration
//!
//! Load và chạy ONNX model (Keras model exported with tf2onnx).
//! Input: one row of scaled features, shape `(1, FEATURE_COUNT)`.
//! Output: one score per class, read from the model's first output.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("failed to load model: {0}")]
    Load(String),

    #[error("model expects {expected} inputs, got {actual}")]
    InputLength { expected: usize, actual: usize },

    #[error("inference failed: {0}")]
    Runtime(String),

    #[error("model produced no output")]
    EmptyOutput,
}

// ============================================================================
// BACKEND
// ============================================================================

/// Which engine serves the model artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Onnx,
    Dense,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Onnx => write!(f, "onnx"),
            Backend::Dense => write!(f, "dense"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onnx" => Ok(Backend::Onnx),
            "dense" | "json" => Ok(Backend::Dense),
            other => Err(format!("unknown model backend: {}", other)),
        }
    }
}

// ============================================================================
// INFERENCE ENGINE TRAIT
// ============================================================================

/// Trait cho inference engines (ONNX, pure-Rust dense, ...)
///
/// Engines are loaded once and shared read-only across requests.
pub trait InferenceEngine: Send + Sync {
    /// One forward pass: scaled features in, one score per class out
    fn predict_proba(&self, input: &[f32]) -> Result<Vec<f32>, InferenceError>;

    fn backend(&self) -> Backend;

    /// Human-readable device/runtime name for status output
    fn device(&self) -> &'static str;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX Runtime session
pub struct OnnxEngine {
    // session.run needs exclusive access
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxEngine {
    /// Load ONNX model từ file
    pub fn load(model_path: &Path) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(InferenceError::ModelNotFound(model_path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError::Load(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Load(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError::Load(format!("Failed to load model: {}", e)))?;

        Self::from_session(session)
    }

    /// Load ONNX model từ bytes
    pub fn load_from_bytes(model_bytes: &[u8]) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| InferenceError::Load(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Load(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| InferenceError::Load(format!("Load from memory error: {}", e)))?;

        Self::from_session(session)
    }

    fn from_session(session: Session) -> Result<Self, InferenceError> {
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError::Load("No output defined".to_string()))?;

        log::info!("ONNX model loaded successfully (output: {})", output_name);

        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl InferenceEngine for OnnxEngine {
    fn predict_proba(&self, input: &[f32]) -> Result<Vec<f32>, InferenceError> {
        let input_array = Array2::<f32>::from_shape_vec((1, input.len()), input.to_vec())
            .map_err(|e| InferenceError::Runtime(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Runtime(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Runtime(e.to_string()))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or(InferenceError::EmptyOutput)?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Runtime(format!("Extract error: {}", e)))?;

        if data.is_empty() {
            return Err(InferenceError::EmptyOutput);
        }

        Ok(data.to_vec())
    }

    fn backend(&self) -> Backend {
        Backend::Onnx
    }

    fn device(&self) -> &'static str {
        "ONNX Runtime (CPU)"
    }
}
