use std::num::NonZeroUsize;

use serde::Deserialize;

use crate::error::{NnErr, Result};

/// The configuration for a param initialization scheme.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitConfig {
    Const { value: f32 },
    Uniform { low: f32, high: f32 },
    XavierUniform { fan_in: usize, fan_out: usize },
    Kaiming { fan_in: usize },
    Normal { mean: f32, std_dev: f32 },
}

/// The configuration for a single layer.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerConfig {
    Linear { dim: (usize, usize), init: InitConfig },
    Relu,
    Tanh,
}

/// The configuration for a model.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelConfig {
    Sequential { layers: Vec<LayerConfig> },
}

impl ModelConfig {
    /// The stock multilayer perceptron: an input projection followed by
    /// `hidden_layers` ReLU blocks of width `layer_size` and a
    /// tanh-squashed output head. Weights use Xavier uniform init.
    ///
    /// # Returns
    /// An error if any of the dimensions is zero.
    pub fn mlp(
        dim_in: usize,
        dim_out: usize,
        hidden_layers: usize,
        layer_size: usize,
    ) -> Result<Self> {
        if dim_in == 0 || dim_out == 0 || hidden_layers == 0 || layer_size == 0 {
            return Err(NnErr::InvalidConfig("mlp dimensions must be nonzero"));
        }

        let mut layers = vec![
            LayerConfig::Linear {
                dim: (dim_in, layer_size),
                init: InitConfig::XavierUniform {
                    fan_in: dim_in,
                    fan_out: layer_size,
                },
            },
            LayerConfig::Relu,
        ];

        for _ in 0..hidden_layers {
            layers.push(LayerConfig::Linear {
                dim: (layer_size, layer_size),
                init: InitConfig::XavierUniform {
                    fan_in: layer_size,
                    fan_out: layer_size,
                },
            });
            layers.push(LayerConfig::Relu);
        }

        layers.push(LayerConfig::Linear {
            dim: (layer_size, dim_out),
            init: InitConfig::XavierUniform {
                fan_in: layer_size,
                fan_out: dim_out,
            },
        });
        layers.push(LayerConfig::Tanh);

        Ok(Self::Sequential { layers })
    }
}

/// The configuration for an optimizer.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerConfig {
    GradientDescent { learning_rate: f32 },
}

/// The configuration for a loss function.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossConfig {
    Mse,
}

/// The configuration for a training run.
#[derive(Debug, Deserialize)]
pub struct TrainingConfig {
    pub optimizer: OptimizerConfig,
    pub loss_fn: LossConfig,
    pub epochs: NonZeroUsize,
    pub batch_size: NonZeroUsize,
    pub seed: Option<u64>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mlp_builds_the_expected_topology() {
        let ModelConfig::Sequential { layers } = ModelConfig::mlp(2, 2, 3, 16).unwrap();

        // input projection + relu, 3 hidden blocks, output head + tanh
        assert_eq!(layers.len(), 2 + 3 * 2 + 2);
        assert!(matches!(
            layers[0],
            LayerConfig::Linear { dim: (2, 16), .. }
        ));
        assert!(matches!(layers[1], LayerConfig::Relu));
        assert!(matches!(
            layers[layers.len() - 2],
            LayerConfig::Linear { dim: (16, 2), .. }
        ));
        assert!(matches!(layers[layers.len() - 1], LayerConfig::Tanh));
    }

    #[test]
    fn mlp_rejects_zero_dimensions() {
        assert!(ModelConfig::mlp(2, 2, 0, 16).is_err());
        assert!(ModelConfig::mlp(2, 2, 3, 0).is_err());
    }

    #[test]
    fn configs_deserialize_from_snake_case_json() {
        let json = r#"{
            "optimizer": { "gradient_descent": { "learning_rate": 0.05 } },
            "loss_fn": "mse",
            "epochs": 200,
            "batch_size": 100,
            "seed": 42
        }"#;

        let config: TrainingConfig = serde_json::from_str(json).unwrap();

        assert!(matches!(
            config.optimizer,
            OptimizerConfig::GradientDescent { learning_rate } if learning_rate == 0.05
        ));
        assert!(matches!(config.loss_fn, LossConfig::Mse));
        assert_eq!(config.epochs.get(), 200);
        assert_eq!(config.seed, Some(42));
    }
}
