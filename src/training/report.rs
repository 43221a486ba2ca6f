/// Statistics recorded at the end of one training epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    epoch: usize,
    loss: f32,
    train_error_rate: f32,
    test_error_rate: Option<f32>,
}

impl EpochStats {
    pub(crate) fn new(
        epoch: usize,
        loss: f32,
        train_error_rate: f32,
        test_error_rate: Option<f32>,
    ) -> Self {
        Self {
            epoch,
            loss,
            train_error_rate,
            test_error_rate,
        }
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Mean of the per-batch losses of the epoch.
    pub fn loss(&self) -> f32 {
        self.loss
    }

    /// Misclassified fraction of the training set after the epoch.
    pub fn train_error_rate(&self) -> f32 {
        self.train_error_rate
    }

    /// Misclassified fraction of the held-out set, when one was provided.
    pub fn test_error_rate(&self) -> Option<f32> {
        self.test_error_rate
    }
}

/// The result of a training run: one `EpochStats` per epoch, in order,
/// owned by the caller rather than accumulated in shared state.
#[derive(Debug, Default, Clone)]
pub struct TrainingReport {
    epochs: Vec<EpochStats>,
}

impl TrainingReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, stats: EpochStats) {
        self.epochs.push(stats);
    }

    pub fn epochs(&self) -> &[EpochStats] {
        &self.epochs
    }

    pub fn last(&self) -> Option<&EpochStats> {
        self.epochs.last()
    }
}
