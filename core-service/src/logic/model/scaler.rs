//! Feature Scaler - fitted transform applied before inference
//!
//! Parameters are exported from the training notebook as JSON:
//!
//! ```json
//! { "kind": "standard", "mean": [..], "scale": [..], "layout_hash": 1234 }
//! { "kind": "min_max", "min": [..], "scale": [..] }
//! { "kind": "identity" }
//! ```
//!
//! `standard` computes `(x - mean) / scale`, `min_max` computes
//! `x * scale + min` (scikit-learn `MinMaxScaler.min_` / `scale_`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::features::layout::{check_layout, FEATURE_COUNT, FEATURE_VERSION};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalerKind {
    Standard,
    MinMax,
    Identity,
}

/// Fitted scaler parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub kind: ScalerKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mean: Vec<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub min: Vec<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scale: Vec<f32>,
    /// Layout the scaler was fit against, when the exporter recorded it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_version: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_hash: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScalerError {
    #[error("failed to read scaler: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scaler file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed scaler: {0}")]
    Malformed(String),

    #[error("scaler expects {expected} features, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

impl Scaler {
    pub fn standard(mean: Vec<f32>, scale: Vec<f32>) -> Result<Self, ScalerError> {
        let scaler = Self { kind: ScalerKind::Standard, mean, scale, ..Self::identity() };
        scaler.check()?;
        Ok(scaler)
    }

    pub fn min_max(min: Vec<f32>, scale: Vec<f32>) -> Result<Self, ScalerError> {
        let scaler = Self { kind: ScalerKind::MinMax, min, scale, ..Self::identity() };
        scaler.check()?;
        Ok(scaler)
    }

    pub fn identity() -> Self {
        Self {
            kind: ScalerKind::Identity,
            mean: Vec::new(),
            min: Vec::new(),
            scale: Vec::new(),
            feature_version: None,
            layout_hash: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ScalerError> {
        let scaler: Scaler = serde_json::from_str(json)?;
        scaler.check()?;
        Ok(scaler)
    }

    /// Load scaler parameters from file
    pub fn load(path: &Path) -> Result<Self, ScalerError> {
        log::info!("Loading scaler from: {}", path.display());

        let scaler = Self::from_json(&std::fs::read_to_string(path)?)?;
        scaler.warn_on_layout_drift();

        log::info!(
            "Scaler loaded ({:?}, width {})",
            scaler.kind,
            scaler.width().map_or_else(|| "any".to_string(), |w| w.to_string())
        );
        Ok(scaler)
    }

    fn check(&self) -> Result<(), ScalerError> {
        let offset = match self.kind {
            ScalerKind::Identity => return Ok(()),
            ScalerKind::Standard => &self.mean,
            ScalerKind::MinMax => &self.min,
        };

        if offset.is_empty() {
            return Err(ScalerError::Malformed("no fitted parameters".to_string()));
        }
        if offset.len() != self.scale.len() {
            return Err(ScalerError::Malformed(format!(
                "{} offsets but {} scale factors",
                offset.len(),
                self.scale.len()
            )));
        }
        if offset.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err(ScalerError::Malformed("non-finite parameter".to_string()));
        }
        Ok(())
    }

    /// The artifact is still used on drift; only the request path enforces width.
    fn warn_on_layout_drift(&self) {
        if let Some(width) = self.width() {
            if width != FEATURE_COUNT {
                log::warn!("Scaler width {} differs from feature count {}", width, FEATURE_COUNT);
            }
        }
        if let Some(hash) = self.layout_hash {
            let version = self.feature_version.unwrap_or(FEATURE_VERSION);
            if let Err(e) = check_layout(version, hash) {
                log::warn!("Scaler was fit against another layout: {}", e);
            }
        }
    }

    // ========================================================================
    // TRANSFORM
    // ========================================================================

    /// Number of features the scaler was fit on (`None` for identity)
    pub fn width(&self) -> Option<usize> {
        match self.kind {
            ScalerKind::Identity => None,
            ScalerKind::Standard | ScalerKind::MinMax => Some(self.scale.len()),
        }
    }

    /// Apply the fitted transform
    pub fn transform(&self, input: &[f32]) -> Result<Vec<f32>, ScalerError> {
        if let Some(expected) = self.width() {
            if input.len() != expected {
                return Err(ScalerError::WidthMismatch { expected, actual: input.len() });
            }
        }

        let scaled = match self.kind {
            ScalerKind::Identity => input.to_vec(),
            ScalerKind::Standard => input
                .iter()
                .zip(self.mean.iter().zip(&self.scale))
                .map(|(x, (mean, scale))| {
                    // zero-variance features are fit with scale 1
                    let scale = if *scale == 0.0 { 1.0 } else { *scale };
                    (x - mean) / scale
                })
                .collect(),
            ScalerKind::MinMax => input
                .iter()
                .zip(self.min.iter().zip(&self.scale))
                .map(|(x, (min, scale))| x * scale + min)
                .collect(),
        };

        Ok(scaled)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_standard_transform() {
        let scaler = Scaler::standard(vec![1.0, 10.0, 5.0], vec![2.0, 5.0, 0.0]).unwrap();
        let out = scaler.transform(&[3.0, 0.0, 7.0]).unwrap();
        assert_eq!(out, vec![1.0, -2.0, 2.0]);
    }

    #[test]
    fn test_min_max_transform() {
        let scaler = Scaler::min_max(vec![-0.5, 0.0], vec![0.1, 2.0]).unwrap();
        let out = scaler.transform(&[10.0, 0.25]).unwrap();
        assert!((out[0] - 0.5).abs() < 1e-6);
        assert!((out[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_identity_accepts_any_width() {
        let scaler = Scaler::identity();
        assert_eq!(scaler.width(), None);
        assert_eq!(scaler.transform(&[1.0, 2.0]).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_width_mismatch_is_error() {
        let scaler = Scaler::standard(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap();
        match scaler.transform(&[0.0; 33]) {
            Err(ScalerError::WidthMismatch { expected, actual }) => {
                assert_eq!(expected, FEATURE_COUNT);
                assert_eq!(actual, 33);
            }
            other => panic!("expected width mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_parameters_rejected() {
        assert!(matches!(Scaler::standard(vec![0.0; 3], vec![1.0; 2]), Err(ScalerError::Malformed(_))));
        assert!(matches!(Scaler::standard(vec![], vec![]), Err(ScalerError::Malformed(_))));
        assert!(matches!(Scaler::min_max(vec![f32::NAN], vec![1.0]), Err(ScalerError::Malformed(_))));
    }

    #[test]
    fn test_from_json() {
        let scaler = Scaler::from_json(r#"{"kind":"standard","mean":[1.0,2.0],"scale":[1.0,4.0]}"#).unwrap();
        assert_eq!(scaler.kind, ScalerKind::Standard);
        assert_eq!(scaler.width(), Some(2));

        assert!(matches!(Scaler::from_json(r#"{"kind":"robust"}"#), Err(ScalerError::Parse(_))));
        assert!(matches!(Scaler::from_json(r#"{"kind":"min_max","min":[1.0]}"#), Err(ScalerError::Malformed(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"kind":"identity"}}"#).unwrap();
        let scaler = Scaler::load(file.path()).unwrap();
        assert_eq!(scaler, Scaler::identity());

        assert!(matches!(Scaler::load(Path::new("/nonexistent/scaler.json")), Err(ScalerError::Io(_))));
    }
}
