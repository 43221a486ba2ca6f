mod builder;
mod config;
mod metrics;
mod report;
mod trainer;

pub use builder::TrainerBuilder;
pub use config::{
    InitConfig, LayerConfig, LossConfig, ModelConfig, OptimizerConfig, TrainingConfig,
};
pub use metrics::count_errors;
pub use report::{EpochStats, TrainingReport};
pub use trainer::ModelTrainer;
