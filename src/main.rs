use std::{env, fs, num::NonZeroUsize};

use anyhow::Context;
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use serde::Deserialize;

use ml_framework::{
    dataset::generate_disc_set,
    training::{
        LossConfig, ModelConfig, OptimizerConfig, TrainerBuilder, TrainingConfig, count_errors,
    },
};

/// The full description of one disc-classification run: what to train,
/// how to train it, and how much data to generate.
#[derive(Debug, Deserialize)]
struct ExperimentConfig {
    model: ModelConfig,
    training: TrainingConfig,
    train_samples: usize,
    test_samples: usize,
}

impl ExperimentConfig {
    /// The stock experiment: a 3-hidden-block MLP of width 16 trained for
    /// 200 epochs of batch-100 gradient descent at lr 5e-2, on 1000 train
    /// and 1000 test points.
    fn stock() -> anyhow::Result<Self> {
        Ok(Self {
            model: ModelConfig::mlp(2, 2, 3, 16)?,
            training: TrainingConfig {
                optimizer: OptimizerConfig::GradientDescent {
                    learning_rate: 5e-2,
                },
                loss_fn: LossConfig::Mse,
                epochs: NonZeroUsize::new(200).unwrap(),
                batch_size: NonZeroUsize::new(100).unwrap(),
                seed: None,
            },
            train_samples: 1000,
            test_samples: 1000,
        })
    }
}

fn load_config() -> anyhow::Result<ExperimentConfig> {
    let mut config = match env::var("CONFIG") {
        Ok(path) => {
            let content =
                fs::read_to_string(&path).with_context(|| format!("cannot read '{path}'"))?;
            serde_json::from_str(&content).context("invalid experiment config")?
        }
        Err(_) => ExperimentConfig::stock()?,
    };

    if let Ok(seed) = env::var("SEED") {
        config.training.seed = Some(seed.parse().context("SEED must be an integer")?);
    }
    if let Ok(epochs) = env::var("EPOCHS") {
        config.training.epochs = epochs.parse().context("EPOCHS must be a positive integer")?;
    }
    if let Ok(samples) = env::var("SAMPLES") {
        let samples = samples.parse().context("SAMPLES must be a positive integer")?;
        config.train_samples = samples;
        config.test_samples = samples;
    }

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    let mut data_rng = match config.training.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let train_set = generate_disc_set(config.train_samples, &mut data_rng)?;
    let test_set = generate_disc_set(config.test_samples, &mut data_rng)?;
    info!(
        "generated {} train and {} test samples",
        train_set.len(),
        test_set.len()
    );

    let mut trainer = TrainerBuilder::new().build(&config.model, &config.training)?;
    let report = trainer.train(&train_set, Some(&test_set), config.training.epochs)?;
    let last = report.last().context("no epochs were run")?;
    info!("final loss {:.6}", last.loss());

    let model = trainer.into_model();
    let batch_size = config.training.batch_size;
    let train_errors = count_errors(&model, &train_set, batch_size)?;
    let test_errors = count_errors(&model, &test_set, batch_size)?;

    println!(
        "train error rate: {:.4} ({train_errors}/{})",
        train_errors as f32 / train_set.len() as f32,
        train_set.len()
    );
    println!(
        "test error rate: {:.4} ({test_errors}/{})",
        test_errors as f32 / test_set.len() as f32,
        test_set.len()
    );

    Ok(())
}
