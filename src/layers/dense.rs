use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    /// Shape (input_size, size).
    pub weights: Matrix,
    /// Shape (1, size).
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Layer {
        Layer {
            size,
            weights: Matrix::random(input_size, size),
            biases: Matrix::random(1, size),
            activator: activation
        }
    }

    /// Number of inputs this layer expects.
    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// a = σ(xW + b). Keeps no state, so a shared `&Layer` can serve many threads.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let z = &(&Matrix::row(input) * &self.weights) + &self.biases;
        self.activator.apply(&z.data[0])
    }

    /// Checks that weights and biases agree with `size`.
    pub fn is_consistent(&self) -> bool {
        self.weights.is_well_formed()
            && self.biases.is_well_formed()
            && self.weights.cols == self.size
            && self.biases.rows == 1
            && self.biases.cols == self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_layer(activator: ActivationFunction) -> Layer {
        Layer {
            size: 2,
            weights: Matrix::from_data(vec![vec![1.0, -1.0], vec![0.5, 2.0]]),
            biases: Matrix::row(&[0.0, 1.0]),
            activator,
        }
    }

    #[test]
    fn forward_identity() {
        let layer = fixed_layer(ActivationFunction::Identity);
        assert_eq!(layer.forward(&[2.0, 4.0]), vec![4.0, 7.0]);
    }

    #[test]
    fn forward_is_repeatable() {
        let layer = fixed_layer(ActivationFunction::Softmax);
        assert_eq!(layer.forward(&[0.3, 0.1]), layer.forward(&[0.3, 0.1]));
    }

    #[test]
    fn new_layer_shapes() {
        let layer = Layer::new(3, 5, ActivationFunction::ReLU);
        assert_eq!(layer.input_size(), 5);
        assert!(layer.is_consistent());
    }

    #[test]
    fn inconsistent_bias_is_detected() {
        let mut layer = fixed_layer(ActivationFunction::Identity);
        layer.biases = Matrix::row(&[0.0, 1.0, 2.0]);
        assert!(!layer.is_consistent());
    }
}
