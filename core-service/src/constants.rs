//! Central Configuration Constants
//!
//! Single source of truth for artifact defaults.
//! To change where the server looks for the model, only edit this file
//! (or set the matching environment variable).

/// Default model artifact (Keras model exported to ONNX)
pub const DEFAULT_MODEL_PATH: &str = "models/student_classification_model.onnx";

/// Default fitted scaler parameters
pub const DEFAULT_SCALER_PATH: &str = "models/scaler.json";

/// Default model backend
pub const DEFAULT_BACKEND: &str = "onnx";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Student Classification Model";
