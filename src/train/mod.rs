pub mod gradients;
pub mod loop_fn;
pub mod report;
pub mod train_config;

pub use gradients::Gradients;
pub use loop_fn::train_loop;
pub use report::TrainReport;
pub use train_config::TrainConfig;
