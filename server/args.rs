use std::path::PathBuf;

use clap::Parser;
use digit_ocr::network::{Architecture, NetworkConfig, DEFAULT_SEED, DEFAULT_WEIGHTS_PATH};
use digit_ocr::TrainConfig;

/// Serve the digit classifier and its drawing page over HTTP.
#[derive(Parser, Debug)]
#[command(name = "ocr-server", version, about)]
pub struct ServerArgs {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8000")]
    pub addr: String,

    /// File the network weights are loaded from and saved to.
    #[arg(long, default_value = DEFAULT_WEIGHTS_PATH)]
    pub weights: PathBuf,

    /// Start from freshly initialised weights even if the weights file exists.
    #[arg(long)]
    pub no_load: bool,

    #[arg(long, default_value_t = 0.05)]
    pub learning_rate: f64,

    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: u64,

    /// Epochs run over the submitted samples per training request.
    #[arg(long, default_value_t = 1)]
    pub epochs: usize,

    /// Seed for weight initialisation.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Largest request body accepted, in bytes.
    #[arg(long, default_value_t = 8 * 1024 * 1024)]
    pub max_body_bytes: usize,
}

impl ServerArgs {
    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            architecture: Architecture::default(),
            learning_rate: self.learning_rate,
            seed: self.seed,
            train: TrainConfig::new(self.epochs, self.batch_size as usize),
            ..NetworkConfig::default()
        }
    }
}
