/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Small epsilon added inside log() to prevent log(0) = -inf.
const EPS: f64 = 1e-12;

impl CrossEntropyLoss {
    /// One-hot target of length `classes` with a 1 at `label`.
    pub fn one_hot(label: usize, classes: usize) -> Vec<f64> {
        let mut target = vec![0.0; classes];
        if let Some(slot) = target.get_mut(label) {
            *slot = 1.0;
        }
        target
    }

    /// Computes the scalar cross-entropy loss:
    ///   L = -sum(expected[i] * log(predicted[i] + eps))
    ///
    /// `predicted` — softmax probabilities, shape [n_classes]
    /// `expected`  — one-hot target distribution, shape [n_classes]
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| -e * (p + EPS).ln())
            .sum()
    }

    /// Gradient of the combined Softmax + cross-entropy w.r.t. the pre-softmax
    /// logits:
    ///   ∂L/∂z_i = predicted[i] - expected[i]
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| p - e)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hot_marks_label() {
        assert_eq!(CrossEntropyLoss::one_hot(2, 4), vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn derivative_is_prediction_minus_target() {
        let d = CrossEntropyLoss::derivative(&[0.25, 0.75], &[0.0, 1.0]);
        assert_eq!(d, vec![0.25, -0.25]);
    }

    #[test]
    fn loss_falls_as_true_class_probability_rises() {
        let target = CrossEntropyLoss::one_hot(1, 2);
        assert!(CrossEntropyLoss::loss(&[0.2, 0.8], &target) < CrossEntropyLoss::loss(&[0.6, 0.4], &target));
    }
}
