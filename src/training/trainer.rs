use std::num::NonZeroUsize;

use rand::Rng;

use super::{
    metrics::count_errors,
    report::{EpochStats, TrainingReport},
};
use crate::{
    arch::{Sequential, loss::Loss},
    dataset::Dataset,
    error::{NnErr, Result},
    optimization::Optimizer,
};

/// A model trainer. Contains the components needed for a training run,
/// including the model itself.
pub struct ModelTrainer<O, L, R>
where
    O: Optimizer,
    L: Loss,
    R: Rng,
{
    model: Sequential,
    optimizer: O,
    loss_fn: L,
    batch_size: NonZeroUsize,
    rng: R,
}

impl<O, L, R> ModelTrainer<O, L, R>
where
    O: Optimizer,
    L: Loss,
    R: Rng,
{
    /// Returns a new `ModelTrainer`.
    ///
    /// # Arguments
    /// * `model` - The model that will be trained.
    /// * `optimizer` - The algorithm that updates params from gradients.
    /// * `loss_fn` - The loss function measuring prediction quality.
    /// * `batch_size` - Rows per mini-batch.
    /// * `rng` - A random number generator, used to (re)initialize params.
    pub fn new(model: Sequential, optimizer: O, loss_fn: L, batch_size: NonZeroUsize, rng: R) -> Self {
        Self {
            model,
            optimizer,
            loss_fn,
            batch_size,
            rng,
        }
    }

    /// Trains the model for `epochs` epochs over `train_set`, starting from
    /// freshly initialized params.
    ///
    /// Every epoch walks the mini-batches strictly in order and runs, per
    /// batch: forward, loss, loss gradient, zero_grad, backward, optimizer
    /// step. A failure anywhere aborts the run; skipping a batch would
    /// corrupt the epoch's gradient statistics.
    ///
    /// # Arguments
    /// * `train_set` - The dataset to fit.
    /// * `test_set` - An optional held-out dataset evaluated every epoch.
    /// * `epochs` - The number of passes over `train_set`.
    ///
    /// # Returns
    /// A report with one entry per epoch, owned by the caller.
    pub fn train(
        &mut self,
        train_set: &Dataset,
        test_set: Option<&Dataset>,
        epochs: NonZeroUsize,
    ) -> Result<TrainingReport> {
        if train_set.is_empty() {
            return Err(NnErr::InvalidConfig("cannot train on an empty dataset"));
        }

        self.model.reset(&mut self.rng);
        let mut report = TrainingReport::new();

        for epoch in 0..epochs.get() {
            let mut total_loss = 0.;
            let mut num_batches = 0;

            for (x, y) in train_set.batches(self.batch_size) {
                let y_pred = self.model.forward(x)?;
                total_loss += self.loss_fn.forward(y, y_pred.view())?;
                num_batches += 1;

                let seed = self.loss_fn.backward()?;
                self.model.zero_grad();
                self.model.backward(seed)?;
                self.model.optimize(&mut self.optimizer);
            }

            // NOTE: getting the exact epoch loss would require forwarding over
            // all batches again, so we approximate it by averaging the loss
            // observed at each batch.
            let loss = total_loss / num_batches as f32;
            let train_errors = count_errors(&self.model, train_set, self.batch_size)?;
            let train_error_rate = train_errors as f32 / train_set.len() as f32;
            let test_error_rate = match test_set {
                Some(test_set) => Some(
                    count_errors(&self.model, test_set, self.batch_size)? as f32
                        / test_set.len() as f32,
                ),
                None => None,
            };

            log::info!(
                "epoch {epoch}: loss {loss:.6}, train error rate {train_error_rate:.4}"
            );
            report.push(EpochStats::new(epoch, loss, train_error_rate, test_error_rate));
        }

        Ok(report)
    }

    pub fn model(&self) -> &Sequential {
        &self.model
    }

    pub fn into_model(self) -> Sequential {
        self.model
    }
}
