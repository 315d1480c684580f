//! Logic Module - Business Logic & Engines
//!
//! - `features/` - Field schema, record and vector layout
//! - `model/` - Scaler, inference engines (ONNX, dense), label decoding
//! - `predictor/` - The request pipeline tying them together

pub mod features;
pub mod model;
pub mod predictor;
