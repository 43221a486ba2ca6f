use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    ModelTrainer,
    config::{InitConfig, LayerConfig, LossConfig, ModelConfig, OptimizerConfig, TrainingConfig},
};
use crate::{
    arch::{ParamInit, Sequential, layers::Layer, loss::Mse},
    error::{NnErr, Result},
    optimization::GradientDescent,
};

/// Builds trainers and their components from configurations.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a ready-to-run trainer from a model and a training config.
    ///
    /// # Returns
    /// An error if any piece of the configuration is invalid.
    pub fn build(
        &self,
        model: &ModelConfig,
        training: &TrainingConfig,
    ) -> Result<ModelTrainer<GradientDescent, Mse, StdRng>> {
        let mut rng = self.generate_rng(training.seed);
        let model = self.resolve_model(model, &mut rng)?;
        let optimizer = self.resolve_optimizer(training.optimizer);
        let loss_fn = self.resolve_loss(training.loss_fn);

        Ok(ModelTrainer::new(
            model,
            optimizer,
            loss_fn,
            training.batch_size,
            rng,
        ))
    }

    /// Builds a model on its own, sampling params from `rng`.
    pub fn resolve_model<R: Rng>(&self, config: &ModelConfig, rng: &mut R) -> Result<Sequential> {
        match config {
            ModelConfig::Sequential { layers } => {
                if layers.is_empty() {
                    return Err(NnErr::InvalidConfig("model needs at least one layer"));
                }

                let layers = layers
                    .iter()
                    .map(|layer| self.resolve_layer(*layer, rng))
                    .collect::<Result<Vec<_>>>()?;

                Ok(Sequential::new(layers))
            }
        }
    }

    fn resolve_layer<R: Rng>(&self, config: LayerConfig, rng: &mut R) -> Result<Layer> {
        match config {
            LayerConfig::Linear { dim, init } => Layer::linear(dim, self.resolve_init(init)?, rng),
            LayerConfig::Relu => Ok(Layer::relu()),
            LayerConfig::Tanh => Ok(Layer::tanh()),
        }
    }

    fn resolve_init(&self, config: InitConfig) -> Result<ParamInit> {
        match config {
            InitConfig::Const { value } => Ok(ParamInit::Const(value)),
            InitConfig::Uniform { low, high } => ParamInit::uniform(low, high),
            InitConfig::XavierUniform { fan_in, fan_out } => {
                ParamInit::xavier_uniform(fan_in, fan_out)
            }
            InitConfig::Kaiming { fan_in } => ParamInit::kaiming(fan_in),
            InitConfig::Normal { mean, std_dev } => ParamInit::normal(mean, std_dev),
        }
    }

    fn resolve_optimizer(&self, config: OptimizerConfig) -> GradientDescent {
        match config {
            OptimizerConfig::GradientDescent { learning_rate } => {
                GradientDescent::new(learning_rate)
            }
        }
    }

    fn resolve_loss(&self, config: LossConfig) -> Mse {
        match config {
            LossConfig::Mse => Mse::new(),
        }
    }

    fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolves_the_mlp_config_into_a_model() {
        let config = ModelConfig::mlp(2, 2, 1, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let model = TrainerBuilder::new().resolve_model(&config, &mut rng).unwrap();

        assert_eq!(model.len(), 6);
        // one weight/bias pair per linear layer
        assert_eq!(model.params().len(), 6);
    }

    #[test]
    fn rejects_an_empty_model() {
        let config = ModelConfig::Sequential { layers: vec![] };
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            TrainerBuilder::new()
                .resolve_model(&config, &mut rng)
                .unwrap_err(),
            NnErr::InvalidConfig("model needs at least one layer"),
        );
    }

    #[test]
    fn seeded_builds_are_identical() {
        let config = ModelConfig::mlp(2, 2, 1, 4).unwrap();
        let builder = TrainerBuilder::new();

        let mut rng = StdRng::seed_from_u64(42);
        let first = builder.resolve_model(&config, &mut rng).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let second = builder.resolve_model(&config, &mut rng).unwrap();

        for (a, b) in first.params().iter().zip(second.params()) {
            assert_eq!(a.value, b.value);
        }
    }
}
