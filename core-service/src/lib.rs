//! Student Outcome Core
//!
//! Feature schema, vector assembly and inference for the student outcome
//! classifier (`Dropout` / `Graduate` / `Enrolled`).
//!
//! ```text
//! StudentRecord ──► FeatureVector ──► Scaler ──► InferenceEngine ──► arg-max ──► label
//!   (34 fields)      (layout order)   (fitted)    (ONNX / dense)
//! ```

pub mod constants;
pub mod logic;

pub use logic::features::{
    field_spec, DomainError, FeatureVector, FieldDomain, FieldSpec, LayoutInfo, RecordError,
    StudentRecord, FEATURE_COUNT, FEATURE_LAYOUT, FIELD_SCHEMA,
};
pub use logic::model::{Backend, InferenceEngine, InferenceError, LabelDecoder, Scaler};
pub use logic::predictor::{EngineStatus, ModelConfig, ModelMetadata, PredictError, Prediction, Predictor};
