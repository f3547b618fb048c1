use crate::math::{Matrix, vector};
use crate::network::Architecture;

/// Accumulated gradients for all four parameter tensors.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub w1: Matrix,
    pub b1: Vec<f64>,
    pub w2: Matrix,
    pub b2: Vec<f64>,
}

impl Gradients {
    pub fn zeros(arch: &Architecture) -> Gradients {
        Gradients {
            w1: Matrix::zeros(arch.hidden_size, arch.input_size),
            b1: vec![0.0; arch.hidden_size],
            w2: Matrix::zeros(arch.output_size, arch.hidden_size),
            b2: vec![0.0; arch.output_size],
        }
    }

    /// Batch-mean gradient: every entry divided by `count`.
    pub fn mean(&self, count: usize) -> Gradients {
        let n = count as f64;
        let div_rows = |m: &Matrix| Matrix {
            rows: m.rows,
            cols: m.cols,
            data: m.data.iter().map(|row| row.iter().map(|g| g / n).collect()).collect(),
        };
        Gradients {
            w1: div_rows(&self.w1),
            b1: self.b1.iter().map(|g| g / n).collect(),
            w2: div_rows(&self.w2),
            b2: self.b2.iter().map(|g| g / n).collect(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.w1.is_finite()
            && vector::is_finite(&self.b1)
            && self.w2.is_finite()
            && vector::is_finite(&self.b2)
    }
}
