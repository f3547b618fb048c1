pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod sample;
pub mod error;
pub mod service;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use layers::dense::Layer;
pub use network::{Architecture, Network, NetworkConfig, WeightFile, DEFAULT_WEIGHTS_PATH};
pub use optim::sgd::Sgd;
pub use sample::Sample;
pub use error::EngineError;
pub use train::{TrainConfig, TrainReport};
pub use service::{OcrService, Reply};
