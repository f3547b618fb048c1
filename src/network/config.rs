use serde::{Serialize, Deserialize};

use crate::train::TrainConfig;

/// Default location of the persisted weights.
pub const DEFAULT_WEIGHTS_PATH: &str = "nn.json";

/// Seed used for weight initialisation unless overridden.
pub const DEFAULT_SEED: u64 = 0x5eed_0c12;

/// Layer sizes of the single-hidden-layer classifier.
///
/// Fields:
/// - `input_size`  — length of the pixel vector (20×20 = 400)
/// - `hidden_size` — number of ReLU units
/// - `output_size` — number of classes (digits 0–9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Architecture {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
}

impl Default for Architecture {
    fn default() -> Self {
        Architecture { input_size: 400, hidden_size: 64, output_size: 10 }
    }
}

/// Everything fixed for the lifetime of a `Network`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub architecture: Architecture,
    pub learning_rate: f64,
    /// Standard deviation of the Gaussian used for `W1` and `W2`.
    pub init_std_dev: f64,
    pub seed: u64,
    pub train: TrainConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            architecture: Architecture::default(),
            learning_rate: 0.05,
            init_std_dev: 0.1,
            seed: DEFAULT_SEED,
            train: TrainConfig::default(),
        }
    }
}
