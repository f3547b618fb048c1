use std::path::Path;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::activation::{relu, softmax};
use crate::error::{EngineError, Result};
use crate::layers::Layer;
use crate::math::vector;
use crate::network::config::{Architecture, NetworkConfig};
use crate::network::persist::WeightFile;
use crate::optim::Sgd;
use crate::sample::Sample;
use crate::train::{train_loop, TrainReport};

/// Intermediate values of one forward pass, kept for backpropagation.
#[derive(Debug, Clone)]
pub struct ForwardPass {
    /// Post-ReLU hidden activations `h1`.
    pub hidden: Vec<f64>,
    /// Softmax output `yhat`.
    pub probabilities: Vec<f64>,
}

/// Single-hidden-layer classifier: input → ReLU hidden → softmax output.
///
/// The architecture and learning rate are fixed at construction; only
/// `train` and `load` change the parameters.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    hidden: Layer,
    output: Layer,
}

impl Network {
    /// Freshly initialised network. `W1`/`W2` come from a Gaussian seeded
    /// with `config.seed`, both bias vectors start at zero.
    pub fn new(config: NetworkConfig) -> Network {
        let arch = config.architecture;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let hidden = Layer::new(arch.hidden_size, arch.input_size, config.init_std_dev, &mut rng);
        let output = Layer::new(arch.output_size, arch.hidden_size, config.init_std_dev, &mut rng);
        Network { config, hidden, output }
    }

    /// Builds a network and, when `weights_path` is given, overwrites its
    /// parameters from that file if it exists.
    pub fn initialize(config: NetworkConfig, weights_path: Option<&Path>) -> Result<Network> {
        let mut network = Network::new(config);
        if let Some(path) = weights_path {
            network.load(path)?;
        }
        Ok(network)
    }

    /// Builds a network with explicit parameters instead of random ones.
    pub fn from_weights(config: NetworkConfig, weights: WeightFile) -> Result<Network> {
        let (hidden, output) = weights.into_layers(&config.architecture)?;
        Ok(Network { config, hidden, output })
    }

    pub fn architecture(&self) -> &Architecture {
        &self.config.architecture
    }

    pub fn hidden_layer(&self) -> &Layer {
        &self.hidden
    }

    pub fn output_layer(&self) -> &Layer {
        &self.output
    }

    /// Forward pass with the input length checked.
    pub fn forward(&self, input: &[f64]) -> Result<ForwardPass> {
        let expected = self.config.architecture.input_size;
        if input.len() != expected {
            return Err(EngineError::InvalidInput { expected, actual: input.len() });
        }
        Ok(self.forward_unchecked(input))
    }

    /// `h1 = relu(W1·x + b1)`, `yhat = softmax(W2·h1 + b2)`.
    pub(crate) fn forward_unchecked(&self, input: &[f64]) -> ForwardPass {
        let hidden = relu(&self.hidden.feed_from(input));
        let probabilities = softmax(&self.output.feed_from(&hidden));
        ForwardPass { hidden, probabilities }
    }

    /// Class probabilities for `input`. Fails with `NumericCorruption` if the
    /// distribution is not finite.
    pub fn probabilities(&self, input: &[f64]) -> Result<Vec<f64>> {
        let probabilities = self.forward(input)?.probabilities;
        if !vector::is_finite(&probabilities) {
            return Err(EngineError::NumericCorruption(
                "output distribution contains non-finite values".to_owned(),
            ));
        }
        Ok(probabilities)
    }

    /// Most probable class for `input`.
    ///
    /// Besides `InvalidInput` for a wrong length, this fails with
    /// `NumericCorruption` when the input is non-finite or so large that the
    /// hidden pre-activations overflow `f64` (all-`1e308` pixels, for
    /// example). No class is guessed from an overflowed distribution.
    pub fn predict(&self, input: &[f64]) -> Result<usize> {
        let probabilities = self.probabilities(input)?;
        Ok(vector::argmax(&probabilities))
    }

    /// Minibatch SGD over `samples` using the configured batch size and epoch
    /// count. Malformed samples are skipped and batches that would introduce
    /// non-finite parameters are discarded; neither is an error.
    pub fn train(&mut self, samples: &[Sample]) -> TrainReport {
        let optimizer = Sgd::new(self.config.learning_rate);
        let train_config = self.config.train;
        train_loop(self, samples, &optimizer, &train_config)
    }

    /// Swaps in a complete new parameter set.
    pub(crate) fn replace_layers(&mut self, hidden: Layer, output: Layer) {
        self.hidden = hidden;
        self.output = output;
    }

    /// The current parameters in their persisted form.
    pub fn snapshot(&self) -> WeightFile {
        WeightFile::from_layers(&self.hidden, &self.output)
    }

    /// Writes the parameters to `path`, replacing any previous file atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.snapshot().write_atomic(path)?;
        info!(path = %path.display(), "saved network weights");
        Ok(())
    }

    /// Replaces the parameters with those stored at `path`.
    ///
    /// Returns `Ok(false)` and leaves the network untouched when the file
    /// does not exist. A file whose shapes differ from the architecture is a
    /// `Configuration` error and also leaves the network untouched.
    pub fn load(&mut self, path: &Path) -> Result<bool> {
        let Some(weights) = WeightFile::read(path)? else {
            debug!(path = %path.display(), "no persisted weights; keeping initial parameters");
            return Ok(false);
        };
        let (hidden, output) = weights.into_layers(&self.config.architecture)?;
        if !(hidden.is_finite() && output.is_finite()) {
            return Err(EngineError::NumericCorruption(format!(
                "{} contains non-finite parameters", path.display()
            )));
        }
        self.replace_layers(hidden, output);
        info!(path = %path.display(), "loaded network weights");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_config() -> NetworkConfig {
        NetworkConfig {
            architecture: Architecture { input_size: 3, hidden_size: 4, output_size: 2 },
            ..NetworkConfig::default()
        }
    }

    #[test]
    fn new_network_has_expected_shapes_and_zero_biases() {
        let net = Network::new(NetworkConfig::default());
        assert_eq!((net.hidden_layer().weights.rows, net.hidden_layer().weights.cols), (64, 400));
        assert_eq!((net.output_layer().weights.rows, net.output_layer().weights.cols), (10, 64));
        assert!(net.hidden_layer().biases.iter().all(|&b| b == 0.0));
        assert!(net.output_layer().biases.iter().all(|&b| b == 0.0));
    }

    #[test]
    fn different_seeds_give_different_weights() {
        let a = Network::new(tiny_config());
        let b = Network::new(NetworkConfig { seed: 1, ..tiny_config() });
        assert_ne!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn forward_rejects_wrong_length() {
        let net = Network::new(tiny_config());
        match net.forward(&[1.0, 2.0]) {
            Err(EngineError::InvalidInput { expected: 3, actual: 2 }) => {}
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn nan_input_is_reported_not_classified() {
        let net = Network::new(tiny_config());
        assert!(matches!(
            net.predict(&[f64::NAN, 0.0, 0.0]),
            Err(EngineError::NumericCorruption(_))
        ));
    }

    #[test]
    fn load_without_file_keeps_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let mut net = Network::new(tiny_config());
        let before = net.snapshot();
        assert!(!net.load(&dir.path().join("missing.json")).unwrap());
        assert_eq!(net.snapshot(), before);
    }

    #[test]
    fn failed_load_leaves_network_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.json");
        Network::new(NetworkConfig::default()).save(&path).unwrap();

        let mut net = Network::new(tiny_config());
        let before = net.snapshot();
        assert!(matches!(net.load(&path), Err(EngineError::Configuration(_))));
        assert_eq!(net.snapshot(), before);
    }
}
