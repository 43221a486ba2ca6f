use ndarray::{Array2, ArrayView2};

use crate::error::{NnErr, Result};

/// Hyperbolic tangent activation. Parameter-free; caches its *output*,
/// which is cheaper to differentiate from than the input.
#[derive(Debug, Default)]
pub struct Tanh {
    y: Option<Array2<f32>>,
}

impl Tanh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward(&mut self, x: ArrayView2<f32>) -> Array2<f32> {
        let y = x.mapv(f32::tanh);
        self.y = Some(y.clone());
        y
    }

    pub fn predict(&self, x: ArrayView2<f32>) -> Array2<f32> {
        x.mapv(f32::tanh)
    }

    /// Multiplies the gradient elementwise by `1 - y²`, with `y` the cached
    /// forward output.
    pub fn backward(&mut self, mut d: Array2<f32>) -> Result<Array2<f32>> {
        let y = self.y.as_ref().ok_or(NnErr::MissingCache { layer: "tanh" })?;

        if d.dim() != y.dim() {
            return Err(NnErr::ShapeMismatch {
                what: "tanh output gradient",
                got: d.dim(),
                expected: y.dim(),
            });
        }

        d.zip_mut_with(y, |d, &y| *d *= 1. - y * y);
        Ok(d)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;

    #[test]
    fn forward_applies_tanh_elementwise() {
        let mut tanh = Tanh::new();
        let y = tanh.forward(array![[0., 1.]].view());

        assert_eq!(y[[0, 0]], 0.);
        assert!((y[[0, 1]] - 1f32.tanh()).abs() < 1e-7);
    }

    #[test]
    fn backward_scales_by_one_minus_y_squared() {
        let mut tanh = Tanh::new();
        let y = tanh.forward(array![[0.5]].view());

        let dx = tanh.backward(array![[2.]]).unwrap();

        let expected = 2. * (1. - y[[0, 0]] * y[[0, 0]]);
        assert!((dx[[0, 0]] - expected).abs() < 1e-7);
    }

    #[test]
    fn backward_before_forward_fails_fast() {
        let mut tanh = Tanh::new();

        assert_eq!(
            tanh.backward(array![[1.]]).unwrap_err(),
            NnErr::MissingCache { layer: "tanh" },
        );
    }
}
