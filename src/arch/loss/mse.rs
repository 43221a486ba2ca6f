use ndarray::{Array2, ArrayView2};

use super::Loss;
use crate::error::{NnErr, Result};

/// Mean squared error loss function.
///
/// Holds no state beyond the prediction/target difference of the most
/// recent `forward` call, which `backward` turns into the gradient seed.
#[derive(Default)]
pub struct Mse {
    diff: Option<Array2<f32>>,
}

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Loss for Mse {
    /// Computes the mean of the squared elementwise differences. Argument
    /// order is `(target, prediction)`; both must have the same shape.
    fn forward(&mut self, target: ArrayView2<f32>, prediction: ArrayView2<f32>) -> Result<f32> {
        if target.dim() != prediction.dim() {
            return Err(NnErr::ShapeMismatch {
                what: "loss prediction",
                got: prediction.dim(),
                expected: target.dim(),
            });
        }

        let diff = &prediction - &target;
        let loss = diff.mapv(|d| d * d).mean().unwrap_or_default();
        self.diff = Some(diff);
        Ok(loss)
    }

    /// Returns `2 · (prediction − target) / count`, the gradient seed fed
    /// into the last layer's backward call.
    fn backward(&self) -> Result<Array2<f32>> {
        let diff = self
            .diff
            .as_ref()
            .ok_or(NnErr::MissingCache { layer: "mse loss" })?;

        Ok(diff * (2. / diff.len() as f32))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;

    #[test]
    fn loss_is_the_mean_squared_difference() {
        let mut mse = Mse::new();
        let target = array![[0., 0.], [1., 1.]];
        let prediction = array![[1., 1.], [1., 1.]];

        let loss = mse.forward(target.view(), prediction.view()).unwrap();

        assert_eq!(loss, 0.5);
    }

    #[test]
    fn backward_returns_the_scaled_difference() {
        let mut mse = Mse::new();
        let target = array![[0., 0.]];
        let prediction = array![[1., 3.]];

        mse.forward(target.view(), prediction.view()).unwrap();
        let seed = mse.backward().unwrap();

        // 2 * diff / count, count = 2
        assert_eq!(seed, array![[1., 3.]]);
    }

    #[test]
    fn rejects_mismatched_shapes() {
        let mut mse = Mse::new();
        let target = array![[0., 0.]];
        let prediction = array![[1.]];

        assert!(matches!(
            mse.forward(target.view(), prediction.view()),
            Err(NnErr::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn backward_before_forward_fails_fast() {
        let mse = Mse::new();

        assert_eq!(
            mse.backward().unwrap_err(),
            NnErr::MissingCache { layer: "mse loss" },
        );
    }
}
