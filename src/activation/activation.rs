/// Added to the softmax denominator so that an all-underflow row does not
/// divide by zero.
pub const SOFTMAX_EPS: f64 = 1e-8;

/// Rectified linear activation, elementwise: `max(z, 0)`.
///
/// NaN propagates rather than being clamped to zero, so a corrupted input
/// stays visible downstream.
pub fn relu(z: &[f64]) -> Vec<f64> {
    z.iter().map(|&x| if x < 0.0 { 0.0 } else { x }).collect()
}

/// Applies the ReLU derivative to `delta` as a gate: entries whose
/// activation is not strictly positive are zeroed.
///
/// `activated` is the post-ReLU output `h = max(z, 0)`, so `h > 0` exactly
/// when `z > 0`.
pub fn relu_gate(delta: &[f64], activated: &[f64]) -> Vec<f64> {
    assert_eq!(delta.len(), activated.len());
    delta.iter().zip(activated)
        .map(|(&d, &h)| if h > 0.0 { d } else { 0.0 })
        .collect()
}

/// Numerically stabilised softmax.
///
/// The maximum logit is subtracted before exponentiating, and `SOFTMAX_EPS`
/// is added to the sum of exponentials:
///   p_i = exp(z_i - max z) / (sum_j exp(z_j - max z) + eps)
///
/// The order (shift, then exponentiate, then normalise) is part of the
/// contract; the outputs are compared bit-for-bit in tests.
pub fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|&x| (x - max).exp()).collect();
    let denom = exps.iter().sum::<f64>() + SOFTMAX_EPS;
    exps.into_iter().map(|e| e / denom).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_clamps_negatives() {
        assert_eq!(relu(&[-1.0, 0.0, 2.5]), vec![0.0, 0.0, 2.5]);
        assert!(relu(&[f64::NAN])[0].is_nan());
    }

    #[test]
    fn relu_gate_blocks_inactive_units() {
        assert_eq!(relu_gate(&[1.0, -2.0, 3.0], &[0.0, 0.5, 0.0]), vec![0.0, -2.0, 0.0]);
    }

    #[test]
    fn softmax_matches_hand_computation() {
        let p = softmax(&[1.0, 2.0, 3.0]);
        let e = [(-2.0f64).exp(), (-1.0f64).exp(), 1.0];
        let denom = e.iter().sum::<f64>() + SOFTMAX_EPS;
        for (got, want) in p.iter().zip(e.iter().map(|x| x / denom)) {
            assert_eq!(*got, want);
        }
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn softmax_survives_huge_logits() {
        let p = softmax(&[1e300, -1e300, 5e299]);
        assert!(p.iter().all(|x| x.is_finite()));
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-6);
        assert!(p[0] > 0.99);
    }
}
