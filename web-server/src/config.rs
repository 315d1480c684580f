//! Configuration module

use std::env;
use std::path::PathBuf;

use student_outcome_core::constants::{DEFAULT_BACKEND, DEFAULT_MODEL_PATH, DEFAULT_SCALER_PATH};
use student_outcome_core::{Backend, ModelConfig};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Model artifact (ONNX or dense JSON)
    pub model_path: PathBuf,

    /// Which engine reads `model_path`
    pub backend: Backend,

    /// Fitted scaler parameters
    pub scaler_path: PathBuf,

    /// Optional class-name override
    pub labels_path: Option<PathBuf>,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_name = lookup("MODEL_BACKEND").unwrap_or_else(|| DEFAULT_BACKEND.to_string());
        let backend = backend_name.parse().unwrap_or_else(|e| {
            tracing::warn!("{}, falling back to {}", e, DEFAULT_BACKEND);
            Backend::Onnx
        });

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8501),

            model_path: lookup("MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
                .into(),

            backend,

            scaler_path: lookup("SCALER_PATH")
                .unwrap_or_else(|| DEFAULT_SCALER_PATH.to_string())
                .into(),

            labels_path: lookup("LABELS_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),

            environment: lookup("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Artifact locations for the predictor
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            model_path: self.model_path.clone(),
            backend: self.backend,
            scaler_path: self.scaler_path.clone(),
            labels_path: self.labels_path.clone(),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
