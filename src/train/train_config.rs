use serde::{Serialize, Deserialize};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`     — full passes over the submitted samples per call
/// - `batch_size` — samples per mini-batch; the last batch may be shorter.
///                  A value of `0` is treated as `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        TrainConfig { epochs, batch_size }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig { epochs: 1, batch_size: 16 }
    }
}
