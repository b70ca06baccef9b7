//! Dense-network digit classifier with weights loaded from JSON.
//!
//! The parameter file holds a list of fully-connected layers (row-major
//! weight matrices plus biases) trained offline on cell crops. Hidden layers
//! use ReLU; the output layer is a 10-way softmax. Shape consistency is
//! validated at load time so a malformed file degrades to a
//! model-unavailable condition instead of a runtime panic.

use super::{CLASS_COUNT, DigitClassifier};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Activation {
    Relu,
    Softmax,
}

#[derive(Clone, Debug, Deserialize)]
struct Layer {
    /// Row-major: `weights[out][in]`.
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
    activation: Activation,
}

#[derive(Clone, Debug, Deserialize)]
struct ModelFile {
    /// Input square side length in pixels.
    input_side: usize,
    layers: Vec<Layer>,
}

/// Feed-forward digit classifier.
#[derive(Clone, Debug)]
pub struct MlpClassifier {
    input_side: usize,
    layers: Vec<Layer>,
}

impl MlpClassifier {
    /// Load and validate a parameter file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read model {}: {e}", path.display()))?;
        let model: ModelFile = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse model {}: {e}", path.display()))?;
        Self::from_parts(model.input_side, model.layers)
            .map_err(|e| format!("Invalid model {}: {e}", path.display()))
    }

    fn from_parts(input_side: usize, layers: Vec<Layer>) -> Result<Self, String> {
        if input_side == 0 {
            return Err("input side must be positive".into());
        }
        if layers.is_empty() {
            return Err("model has no layers".into());
        }
        let mut width = input_side * input_side;
        for (i, layer) in layers.iter().enumerate() {
            if layer.weights.is_empty() || layer.weights.len() != layer.bias.len() {
                return Err(format!("layer {i}: weight/bias row mismatch"));
            }
            for row in &layer.weights {
                if row.len() != width {
                    return Err(format!(
                        "layer {i}: expected {width} inputs, found {}",
                        row.len()
                    ));
                }
            }
            width = layer.weights.len();
        }
        if width != CLASS_COUNT {
            return Err(format!("final layer must emit {CLASS_COUNT} classes"));
        }
        match layers.last() {
            Some(last) if last.activation == Activation::Softmax => {}
            _ => return Err("final layer must be softmax".into()),
        }
        Ok(Self { input_side, layers })
    }

    fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            let mut next = Vec::with_capacity(layer.weights.len());
            for (row, &b) in layer.weights.iter().zip(&layer.bias) {
                let z: f32 = row.iter().zip(&current).map(|(w, x)| w * x).sum::<f32>() + b;
                next.push(z);
            }
            match layer.activation {
                Activation::Relu => {
                    for z in &mut next {
                        *z = z.max(0.0);
                    }
                }
                Activation::Softmax => softmax(&mut next),
            }
            current = next;
        }
        current
    }
}

impl DigitClassifier for MlpClassifier {
    fn input_side(&self) -> usize {
        self.input_side
    }

    fn scores(&self, input: &[f32]) -> [f32; CLASS_COUNT] {
        let out = self.forward(input);
        let mut scores = [0.0; CLASS_COUNT];
        scores.copy_from_slice(&out[..CLASS_COUNT]);
        scores
    }
}

/// Numerically stable in-place softmax.
fn softmax(z: &mut [f32]) {
    let max = z.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0;
    for v in z.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    if sum > 0.0 {
        for v in z.iter_mut() {
            *v /= sum;
        }
    }
}
