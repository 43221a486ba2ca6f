use ndarray::{Array2, ArrayView2};

use crate::error::Result;

/// A loss function with a manual backward pass.
///
/// `forward` computes the scalar loss and caches whatever the paired
/// `backward` needs to produce the gradient seed for the model.
pub trait Loss {
    /// Computes the loss. Argument order is `(target, prediction)`.
    fn forward(&mut self, target: ArrayView2<f32>, prediction: ArrayView2<f32>) -> Result<f32>;

    /// Returns the gradient of the loss with respect to the prediction of
    /// the last `forward` call.
    fn backward(&self) -> Result<Array2<f32>>;
}
