use serde::{Serialize, Deserialize};

/// Summary of one `train` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    /// Samples that passed validation and took part in training.
    pub samples_used: usize,
    /// Samples dropped for a wrong vector length or out-of-range label.
    pub samples_skipped: usize,
    /// Epochs actually run (0 when there was nothing to train on).
    pub epochs: usize,
    /// Batch updates applied to the parameters.
    pub batches_applied: usize,
    /// Batch updates discarded because they would have produced non-finite
    /// gradients or parameters.
    pub batches_rejected: usize,
    /// Mean pre-update cross-entropy over the samples of applied batches in
    /// the last epoch, if any batch was applied.
    pub mean_loss: Option<f64>,
}

impl TrainReport {
    /// True when the call left the parameters unchanged.
    pub fn is_noop(&self) -> bool {
        self.batches_applied == 0
    }
}
