use ndarray::{ArrayViewD, ArrayViewMutD};

use super::Optimizer;

/// Gradient descent optimization algorithm.
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update`.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    /// Updates the parameter according to the algorithm's learning rule,
    /// that is, making a step in the opposite direction of the gradient,
    /// with a length of `learning_rate`. Plain SGD, no momentum and no
    /// adaptive terms.
    fn update(&mut self, mut value: ArrayViewMutD<'_, f32>, grad: ArrayViewD<'_, f32>) {
        value.scaled_add(-self.learning_rate, &grad);
    }
}
