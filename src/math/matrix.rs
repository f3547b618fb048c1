use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;

/// Dense row-major matrix. `data[i]` is row `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    /// Both u1 and u2 must be uniform on (0, 1].
    fn sample_standard_normal<R: Rng>(rng: &mut R) -> f64 {
        // Draw two independent uniform samples in (0, 1] to avoid log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Zero-mean Gaussian initialization with a fixed standard deviation.
    ///
    /// Entries are drawn row by row from `rng`, so a seeded generator yields
    /// bit-identical matrices across runs.
    pub fn gaussian<R: Rng>(rows: usize, cols: usize, std_dev: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = Matrix::sample_standard_normal(rng) * std_dev;
            }
        }
        res
    }

    /// Builds a matrix from nested rows, rejecting empty or ragged input.
    pub fn from_data(data: Vec<Vec<f64>>) -> Option<Matrix> {
        let cols = data.first()?.len();
        if cols == 0 || data.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Matrix {
            rows: data.len(),
            cols,
            data
        })
    }

    /// `self · v`. Panics if `v.len() != self.cols`.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.cols, "Matrices are of incorrect sizes");
        self.data.iter()
            .map(|row| row.iter().zip(v).map(|(w, x)| w * x).sum())
            .collect()
    }

    /// `selfᵗ · v` without materialising the transpose.
    pub fn transpose_mul_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.rows, "Matrices are of incorrect sizes");
        let mut res = vec![0.0; self.cols];
        for (row, &scale) in self.data.iter().zip(v) {
            for (r, w) in res.iter_mut().zip(row) {
                *r += w * scale;
            }
        }
        res
    }

    /// Rank-1 accumulation: `self += outer(a, b)`.
    pub fn add_outer(&mut self, a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), self.rows, "Matrices are of incorrect sizes");
        assert_eq!(b.len(), self.cols, "Matrices are of incorrect sizes");
        for (row, &ai) in self.data.iter_mut().zip(a) {
            for (cell, &bj) in row.iter_mut().zip(b) {
                *cell += ai * bj;
            }
        }
    }

    /// `self -= scale * rhs`, elementwise.
    pub fn sub_scaled(&mut self, rhs: &Matrix, scale: f64) {
        assert!(self.same_shape(rhs), "Matrices are of incorrect sizes");
        for (row, rhs_row) in self.data.iter_mut().zip(&rhs.data) {
            for (cell, g) in row.iter_mut().zip(rhs_row) {
                *cell -= scale * g;
            }
        }
    }

    pub fn same_shape(&self, other: &Matrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// True when no entry is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|row| row.iter().all(|x| x.is_finite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn m(data: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_data(data).unwrap()
    }

    #[test]
    fn mul_vec_and_transpose_mul_vec() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(a.mul_vec(&[1.0, 0.0, -1.0]), vec![-2.0, -2.0]);
        assert_eq!(a.transpose_mul_vec(&[1.0, 2.0]), vec![9.0, 12.0, 15.0]);
    }

    #[test]
    fn add_outer_accumulates() {
        let mut a = Matrix::zeros(2, 2);
        a.add_outer(&[1.0, 2.0], &[3.0, 4.0]);
        a.add_outer(&[1.0, 0.0], &[1.0, 1.0]);
        assert_eq!(a.data, vec![vec![4.0, 5.0], vec![6.0, 8.0]]);
    }

    #[test]
    fn sub_scaled_updates_in_place() {
        let mut a = m(vec![vec![1.0, 1.0]]);
        a.sub_scaled(&m(vec![vec![2.0, -4.0]]), 0.5);
        assert_eq!(a.data, vec![vec![0.0, 3.0]]);
    }

    #[test]
    fn from_data_rejects_ragged_rows() {
        assert!(Matrix::from_data(vec![vec![1.0], vec![1.0, 2.0]]).is_none());
        assert!(Matrix::from_data(vec![]).is_none());
    }

    #[test]
    fn gaussian_is_reproducible_for_a_seed() {
        let a = Matrix::gaussian(8, 5, 0.1, &mut StdRng::seed_from_u64(7));
        let b = Matrix::gaussian(8, 5, 0.1, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.is_finite());
    }

    #[test]
    fn is_finite_detects_nan() {
        let mut a = Matrix::zeros(2, 2);
        assert!(a.is_finite());
        a.data[1][0] = f64::NAN;
        assert!(!a.is_finite());
    }
}
