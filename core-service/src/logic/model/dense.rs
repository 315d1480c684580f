//! Dense Network - pure-Rust forward pass for exported Keras `Dense` stacks
//!
//! No ONNX Runtime needed. Weights are exported per layer as JSON:
//!
//! ```json
//! {
//!   "name": "student_classification_model",
//!   "layers": [
//!     { "weights": [[..], ..], "bias": [..], "activation": "relu" },
//!     { "weights": [[..], ..], "bias": [..], "activation": "softmax" }
//!   ]
//! }
//! ```
//!
//! `weights` is the Keras kernel: one row per input, one column per unit.

use std::path::Path;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::inference::{Backend, InferenceEngine, InferenceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    fn apply(self, x: &mut Array1<f32>) {
        match self {
            Activation::Linear => {}
            Activation::Relu => x.mapv_inplace(|v| v.max(0.0)),
            Activation::Sigmoid => x.mapv_inplace(|v| 1.0 / (1.0 + (-v).exp())),
            Activation::Tanh => x.mapv_inplace(f32::tanh),
            Activation::Softmax => softmax(x),
        }
    }
}

/// Numerically stable softmax
pub fn softmax(x: &mut Array1<f32>) {
    let max = x.fold(f32::NEG_INFINITY, |acc, &v| acc.max(v));
    x.mapv_inplace(|v| (v - max).exp());
    let sum = x.sum();
    if sum > 0.0 {
        x.mapv_inplace(|v| v / sum);
    }
}

// ============================================================================
// SERIALIZED FORM
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DenseLayerData {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
    activation: Activation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DenseModelData {
    #[serde(default)]
    name: String,
    layers: Vec<DenseLayerData>,
}

// ============================================================================
// NETWORK
// ============================================================================

#[derive(Debug, Clone)]
struct DenseLayer {
    weights: Array2<f32>,
    bias: Array1<f32>,
    activation: Activation,
}

#[derive(Debug, Clone)]
pub struct DenseNetwork {
    name: String,
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Load model from JSON
    pub fn from_json(json: &str) -> Result<Self, InferenceError> {
        let data: DenseModelData = serde_json::from_str(json)
            .map_err(|e| InferenceError::Load(format!("JSON parse failed: {}", e)))?;

        if data.layers.is_empty() {
            return Err(InferenceError::Load("model has no layers".to_string()));
        }

        let mut layers = Vec::with_capacity(data.layers.len());
        let mut previous_units: Option<usize> = None;

        for (i, layer) in data.layers.into_iter().enumerate() {
            let inputs = layer.weights.len();
            let units = layer.weights.first().map_or(0, Vec::len);

            if inputs == 0 || units == 0 {
                return Err(InferenceError::Load(format!("layer {} has an empty kernel", i)));
            }
            if layer.weights.iter().any(|row| row.len() != units) {
                return Err(InferenceError::Load(format!("layer {} has ragged kernel rows", i)));
            }
            if layer.bias.len() != units {
                return Err(InferenceError::Load(format!(
                    "layer {} has {} units but {} biases",
                    i,
                    units,
                    layer.bias.len()
                )));
            }
            if let Some(expected) = previous_units {
                if expected != inputs {
                    return Err(InferenceError::Load(format!(
                        "layer {} expects {} inputs but previous layer has {} units",
                        i, inputs, expected
                    )));
                }
            }
            previous_units = Some(units);

            let flat: Vec<f32> = layer.weights.into_iter().flatten().collect();
            let weights = Array2::from_shape_vec((inputs, units), flat)
                .map_err(|e| InferenceError::Load(format!("layer {}: {}", i, e)))?;

            layers.push(DenseLayer {
                weights,
                bias: Array1::from_vec(layer.bias),
                activation: layer.activation,
            });
        }

        Ok(Self { name: data.name, layers })
    }

    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        log::info!("Loading dense model from: {}", path.display());

        if !path.exists() {
            return Err(InferenceError::ModelNotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)
            .map_err(|e| InferenceError::Load(format!("Failed to read model: {}", e)))?;
        let network = Self::from_json(&json)?;

        log::info!(
            "Dense model '{}' loaded ({} layers, {} inputs, {} classes)",
            network.name,
            network.layers.len(),
            network.input_width(),
            network.output_width()
        );
        Ok(network)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_width(&self) -> usize {
        self.layers.first().map_or(0, |l| l.weights.nrows())
    }

    pub fn output_width(&self) -> usize {
        self.layers.last().map_or(0, |l| l.weights.ncols())
    }

    fn forward(&self, input: &[f32]) -> Result<Array1<f32>, InferenceError> {
        let expected = self.input_width();
        if input.len() != expected {
            return Err(InferenceError::InputLength { expected, actual: input.len() });
        }

        let mut x = Array1::from_vec(input.to_vec());
        for layer in &self.layers {
            x = x.dot(&layer.weights) + &layer.bias;
            layer.activation.apply(&mut x);
        }
        Ok(x)
    }
}

impl InferenceEngine for DenseNetwork {
    fn predict_proba(&self, input: &[f32]) -> Result<Vec<f32>, InferenceError> {
        Ok(self.forward(input)?.to_vec())
    }

    fn backend(&self) -> Backend {
        Backend::Dense
    }

    fn device(&self) -> &'static str {
        "ndarray (CPU)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_LAYER: &str = r#"{
        "name": "tiny",
        "layers": [
            { "weights": [[1.0, -1.0], [0.5, 0.5]], "bias": [0.0, 0.0], "activation": "relu" },
            { "weights": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], "bias": [0.0, 0.0, 0.0], "activation": "softmax" }
        ]
    }"#;

    #[test]
    fn test_forward_pass() {
        let net = DenseNetwork::from_json(TWO_LAYER).unwrap();
        assert_eq!(net.name(), "tiny");
        assert_eq!(net.input_width(), 2);
        assert_eq!(net.output_width(), 3);

        // hidden = relu([1*2 + 0.5*0, -1*2 + 0.5*0]) = [2, 0]
        let probs = net.predict_proba(&[2.0, 0.0]).unwrap();
        let e2 = 2.0f32.exp();
        let total = e2 + 2.0;
        assert!((probs[0] - e2 / total).abs() < 1e-6);
        assert!((probs[1] - 1.0 / total).abs() < 1e-6);
        assert!((probs[2] - 1.0 / total).abs() < 1e-6);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let mut x = Array1::from_vec(vec![1000.0, 1001.0, 999.0]);
        softmax(&mut x);
        assert!((x.sum() - 1.0).abs() < 1e-6);
        assert!(x[1] > x[0] && x[0] > x[2]);
    }

    #[test]
    fn test_activations() {
        let mut x = Array1::from_vec(vec![-1.0, 0.0, 1.0]);
        Activation::Relu.apply(&mut x);
        assert_eq!(x.to_vec(), vec![0.0, 0.0, 1.0]);

        let mut x = Array1::from_vec(vec![0.0]);
        Activation::Sigmoid.apply(&mut x);
        assert_eq!(x[0], 0.5);
    }

    #[test]
    fn test_wrong_input_width() {
        let net = DenseNetwork::from_json(TWO_LAYER).unwrap();
        let result = net.predict_proba(&[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(InferenceError::InputLength { expected: 2, actual: 3 })));
    }

    #[test]
    fn test_malformed_models_rejected() {
        let cases = [
            r#"{"layers": []}"#,
            r#"{"layers": [{"weights": [[1.0, 2.0], [3.0]], "bias": [0.0, 0.0], "activation": "relu"}]}"#,
            r#"{"layers": [{"weights": [[1.0]], "bias": [0.0, 0.0], "activation": "relu"}]}"#,
            r#"{"layers": [
                {"weights": [[1.0, 2.0]], "bias": [0.0, 0.0], "activation": "relu"},
                {"weights": [[1.0]], "bias": [0.0], "activation": "softmax"}
            ]}"#,
            r#"{"layers": [{"weights": [[1.0]], "bias": [0.0], "activation": "gelu"}]}"#,
        ];
        for json in cases {
            assert!(matches!(DenseNetwork::from_json(json), Err(InferenceError::Load(_))), "accepted: {}", json);
        }
    }
}
