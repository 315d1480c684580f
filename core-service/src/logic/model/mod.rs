//! Model Module - AI/ML Inference Engine
//!
//! Tách logic inference khỏi feature assembly.
//! Dễ dàng swap model backend (ONNX hoặc dense JSON).

pub mod artifact;
pub mod dense;
pub mod inference;
pub mod labels;
pub mod scaler;

// Re-export common types
pub use artifact::ArtifactInfo;
pub use dense::DenseNetwork;
pub use inference::{Backend, InferenceEngine, InferenceError, OnnxEngine};
pub use labels::{argmax, LabelDecoder, LabelError, DEFAULT_CLASSES};
pub use scaler::{Scaler, ScalerError, ScalerKind};
