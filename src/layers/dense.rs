use rand::Rng;

use crate::math::{Matrix, vector};

/// A fully connected affine layer: `z = W·x + b`.
///
/// `weights` has shape (size, input_size), so row `i` holds the incoming
/// weights of unit `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer{
    pub size: usize,
    pub weights: Matrix,
    pub biases: Vec<f64>,
}

impl Layer {
    /// Gaussian weights with the given standard deviation, zero biases.
    pub fn new<R: Rng>(size: usize, input_size: usize, std_dev: f64, rng: &mut R) -> Layer {
        Layer {
            size,
            weights: Matrix::gaussian(size, input_size, std_dev, rng),
            biases: vec![0.0; size],
        }
    }

    /// Assembles a layer from existing parameters. Returns `None` when the
    /// bias length does not match the weight rows.
    pub fn from_parts(weights: Matrix, biases: Vec<f64>) -> Option<Layer> {
        if weights.rows != biases.len() {
            return None;
        }
        Some(Layer { size: weights.rows, weights, biases })
    }

    /// Pre-activation `W·x + b`.
    pub fn feed_from(&self, input: &[f64]) -> Vec<f64> {
        let mut z = self.weights.mul_vec(input);
        vector::add_assign(&mut z, &self.biases);
        z
    }

    /// `W -= lr * dW`, `b -= lr * db`.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &[f64], lr: f64) {
        self.weights.sub_scaled(weights_grad, lr);
        vector::sub_scaled(&mut self.biases, biases_grad, lr);
    }

    pub fn is_finite(&self) -> bool {
        self.weights.is_finite() && vector::is_finite(&self.biases)
    }
}
