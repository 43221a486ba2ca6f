use ndarray::{Array2, ArrayView2};

use crate::error::{NnErr, Result};

/// Rectified linear unit. Parameter-free; caches its input so `backward`
/// knows where the gradient passes through.
#[derive(Debug, Default)]
pub struct Relu {
    x: Option<Array2<f32>>,
}

impl Relu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward(&mut self, x: ArrayView2<f32>) -> Array2<f32> {
        let y = x.mapv(|v| v.max(0.));
        self.x = Some(x.to_owned());
        y
    }

    pub fn predict(&self, x: ArrayView2<f32>) -> Array2<f32> {
        x.mapv(|v| v.max(0.))
    }

    /// Passes the gradient through where the cached input was strictly
    /// positive and zeroes it elsewhere (zero sub-gradient at the boundary).
    pub fn backward(&mut self, mut d: Array2<f32>) -> Result<Array2<f32>> {
        let x = self.x.as_ref().ok_or(NnErr::MissingCache { layer: "relu" })?;

        if d.dim() != x.dim() {
            return Err(NnErr::ShapeMismatch {
                what: "relu output gradient",
                got: d.dim(),
                expected: x.dim(),
            });
        }

        d.zip_mut_with(x, |d, &x| {
            if x <= 0. {
                *d = 0.;
            }
        });

        Ok(d)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;

    #[test]
    fn forward_clamps_negatives() {
        let mut relu = Relu::new();
        let y = relu.forward(array![[-1., 0., 2.]].view());

        assert_eq!(y, array![[0., 0., 2.]]);
    }

    #[test]
    fn backward_masks_on_the_cached_input() {
        let mut relu = Relu::new();
        relu.forward(array![[-1., 0., 2.]].view());

        let dx = relu.backward(array![[5., 5., 5.]]).unwrap();

        assert_eq!(dx, array![[0., 0., 5.]]);
    }

    #[test]
    fn backward_before_forward_fails_fast() {
        let mut relu = Relu::new();

        assert_eq!(
            relu.backward(array![[1.]]).unwrap_err(),
            NnErr::MissingCache { layer: "relu" },
        );
    }
}
