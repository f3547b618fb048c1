pub mod activation;

pub use activation::{relu, relu_gate, softmax, SOFTMAX_EPS};
