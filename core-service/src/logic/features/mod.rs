//! Features Module - Feature Schema & Vector Assembly
//!
//! Định nghĩa thứ tự features và domain của từng field.
//! Form, scaler và model đều dựa vào layout ở đây.

pub mod codes;
pub mod layout;
pub mod record;
pub mod schema;
pub mod vector;

// Re-export common types
pub use layout::{check_layout, layout_hash, LayoutDrift, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use record::{RecordError, StudentRecord};
pub use schema::{field_spec, DomainError, FieldDomain, FieldSpec, FIELD_SCHEMA};
pub use vector::{FeatureVector, VectorLengthError};
