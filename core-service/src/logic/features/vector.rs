//! Feature Vector - dữ liệu đầu vào cho scaler
//!
//! A fixed-width `[f32; FEATURE_COUNT]` stamped with the layout it was
//! built against. Raw slices only become vectors through `try_from_slice`,
//! so a short or long row never reaches the scaler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layout::{check_layout, layout_hash, slot_of, LayoutDrift, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
use super::schema::FIELD_SCHEMA;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub version: u8,
    pub layout_hash: u32,
    /// One value per slot of `FEATURE_LAYOUT`
    #[serde(with = "fixed_values")]
    pub values: [f32; FEATURE_COUNT],
}

/// Wrong number of values for the current layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} feature values, got {actual}")]
pub struct VectorLengthError {
    pub expected: usize,
    pub actual: usize,
}

impl FeatureVector {
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn zeroed() -> Self {
        Self::from_values([0.0; FEATURE_COUNT])
    }

    /// The form's initial value for every field
    pub fn defaults() -> Self {
        let mut values = [0.0f32; FEATURE_COUNT];
        for (slot, spec) in values.iter_mut().zip(FIELD_SCHEMA.iter()) {
            *slot = spec.default as f32;
        }
        Self::from_values(values)
    }

    pub fn try_from_slice(values: &[f32]) -> Result<Self, VectorLengthError> {
        <[f32; FEATURE_COUNT]>::try_from(values)
            .map(Self::from_values)
            .map_err(|_| VectorLengthError {
                expected: FEATURE_COUNT,
                actual: values.len(),
            })
    }

    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn value(&self, name: &str) -> Option<f32> {
        slot_of(name).map(|slot| self.values[slot])
    }

    /// Returns false for names outside the layout
    pub fn set(&mut self, name: &str, value: f32) -> bool {
        match slot_of(name) {
            Some(slot) => {
                self.values[slot] = value;
                true
            }
            None => false,
        }
    }

    /// Whether this vector was built against the running layout
    pub fn check_layout(&self) -> Result<(), LayoutDrift> {
        check_layout(self.version, self.layout_hash)
    }

    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }

    /// Name-keyed copy for structured log lines
    pub fn to_log_entry(&self) -> serde_json::Value {
        let named: BTreeMap<&str, f32> = self.named_values().collect();
        serde_json::json!({
            "layout": format!("v{}/{:08x}", self.version, self.layout_hash),
            "features": named,
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::defaults()
    }
}

impl From<[f32; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f32; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

impl TryFrom<Vec<f32>> for FeatureVector {
    type Error = VectorLengthError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Self::try_from_slice(&values)
    }
}

// serde only derives for arrays up to 32 elements
mod fixed_values {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::FEATURE_COUNT;

    pub fn serialize<S: Serializer>(values: &[f32; FEATURE_COUNT], serializer: S) -> Result<S::Ok, S::Error> {
        values.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f32; FEATURE_COUNT], D::Error> {
        let values = Vec::<f32>::deserialize(deserializer)?;
        let len = values.len();
        values
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"exactly FEATURE_COUNT values"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_vector() {
        let vector = FeatureVector::zeroed();
        assert_eq!(vector.len(), FEATURE_COUNT);
        assert!(vector.check_layout().is_ok());
        assert!(vector.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_defaults_follow_schema() {
        let vector = FeatureVector::default();
        assert_eq!(vector.value("marital_status"), Some(1.0));
        assert_eq!(vector.value("age_at_enrollment"), Some(20.0));
        assert_eq!(vector.value("gdp"), Some(0.0));
    }

    #[test]
    fn test_try_from_slice_rejects_wrong_length() {
        let err = FeatureVector::try_from_slice(&[0.0; 33]).unwrap_err();
        assert_eq!(err, VectorLengthError { expected: FEATURE_COUNT, actual: 33 });
        assert!(FeatureVector::try_from(vec![1.0; 35]).is_err());
        assert!(FeatureVector::try_from(vec![1.0; FEATURE_COUNT]).is_ok());
    }

    #[test]
    fn test_set_by_name() {
        let mut vector = FeatureVector::zeroed();
        assert!(vector.set("debtor", 1.0));
        assert!(!vector.set("unknown", 1.0));
        assert_eq!(vector.as_array()[13], 1.0);
        assert_eq!(vector.value("debtor"), Some(1.0));
        assert_eq!(vector.value("unknown"), None);
    }

    #[test]
    fn test_stale_stamp_detected() {
        let mut vector = FeatureVector::zeroed();
        vector.layout_hash ^= 0xFFFF;
        let drift = vector.check_layout().unwrap_err();
        assert_eq!(drift.found_hash, layout_hash() ^ 0xFFFF);
    }

    #[test]
    fn test_serde_keeps_fixed_width() {
        let mut vector = FeatureVector::defaults();
        vector.set("inflation_rate", 1.4);
        let json = serde_json::to_string(&vector).unwrap();
        let back: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vector);

        let short = r#"{"version":1,"layout_hash":0,"values":[1.0,2.0]}"#;
        assert!(serde_json::from_str::<FeatureVector>(short).is_err());
    }

    #[test]
    fn test_log_entry_names_every_slot() {
        let entry = FeatureVector::defaults().to_log_entry();
        let features = entry["features"].as_object().unwrap();
        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(features["age_at_enrollment"], 20.0);
        assert!(entry["layout"].as_str().unwrap().starts_with("v1/"));
    }
}
