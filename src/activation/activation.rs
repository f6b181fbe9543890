use serde::{Serialize, Deserialize};
use std::f64::consts::{E, PI};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
    Identity,
    /// Vector-valued; only meaningful through `apply()`.
    Softmax,
    Tanh,
    LeakyReLU { alpha: f64 },
    Elu { alpha: f64 },
    Gelu,
    Swish,
}

impl ActivationFunction {
    /// Applies the activation to a whole pre-activation vector.
    pub fn apply(&self, z: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::Softmax => softmax(z),
            _ => z.iter().map(|&x| self.function(x)).collect(),
        }
    }

    /// Element-wise activation. `Softmax` passes values through unchanged
    /// here; use `apply()` for the normalised vector.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Identity | ActivationFunction::Softmax => x,
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Elu { alpha } => {
                if x > 0.0 { x } else { alpha * (E.powf(x) - 1.0) }
            }
            ActivationFunction::Gelu => {
                let c = (2.0_f64 / PI).sqrt();
                0.5 * x * (1.0 + (c * (x + 0.044715 * x.powi(3))).tanh())
            }
            ActivationFunction::Swish => x / (1.0 + E.powf(-x)),
        }
    }

    /// Whether every output of this activation lies in [0, 1].
    pub fn is_probabilistic(&self) -> bool {
        matches!(self, ActivationFunction::Softmax | ActivationFunction::Sigmoid)
    }
}

/// Softmax with max-subtraction so large logits do not overflow `exp`.
fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
