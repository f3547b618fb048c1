pub mod config;
pub mod network;
pub mod persist;

pub use config::{Architecture, NetworkConfig, DEFAULT_SEED, DEFAULT_WEIGHTS_PATH};
pub use network::{ForwardPass, Network};
pub use persist::WeightFile;
