use ndarray::{Array2, ArrayView2, Axis, Ix1, Ix2, linalg};
use rand::Rng;

use crate::{
    arch::param::{Param, ParamInit, ParamView},
    error::{NnErr, Result},
    optimization::Optimizer,
};

/// Affine layer computing `y = x · weightᵀ + bias`.
///
/// The weight has shape `(dim_out, dim_in)` and the bias `(dim_out)`; the
/// bias starts at zero. `forward` retains its input so the paired
/// `backward` can compute the weight gradient.
#[derive(Debug)]
pub struct Linear {
    dim: (usize, usize),
    weight: Param<Ix2>,
    bias: Param<Ix1>,

    // Cache of the last forward input, refreshed on every forward call.
    x: Option<Array2<f32>>,
}

impl Linear {
    /// Creates a new `Linear`.
    ///
    /// # Arguments
    /// * `dim_in` - Number of input features.
    /// * `dim_out` - Number of output features.
    /// * `init` - Initialization scheme for the weight.
    /// * `rng` - A random number generator.
    ///
    /// # Returns
    /// An error if either dimension is zero.
    pub fn new<R: Rng>(dim_in: usize, dim_out: usize, init: ParamInit, rng: &mut R) -> Result<Self> {
        if dim_in == 0 || dim_out == 0 {
            return Err(NnErr::InvalidConfig("linear dimensions must be nonzero"));
        }

        Ok(Self {
            dim: (dim_in, dim_out),
            weight: Param::new("weight", Ix2(dim_out, dim_in), init, rng),
            bias: Param::new("bias", Ix1(dim_out), ParamInit::Const(0.), rng),
            x: None,
        })
    }

    /// Computes the affine transform and caches `x` for `backward`.
    ///
    /// # Arguments
    /// * `x` - The input batch, of shape `(batch, dim_in)`.
    ///
    /// # Returns
    /// The output batch, of shape `(batch, dim_out)`.
    pub fn forward(&mut self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let y = self.affine(x)?;
        self.x = Some(x.to_owned());
        Ok(y)
    }

    /// Inference-only forward pass; the cache is left untouched.
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        self.affine(x)
    }

    fn affine(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let (dim_in, dim_out) = self.dim;
        if x.ncols() != dim_in {
            return Err(NnErr::ShapeMismatch {
                what: "linear input",
                got: x.dim(),
                expected: (x.nrows(), dim_in),
            });
        }

        let mut y = Array2::zeros((x.nrows(), dim_out));
        linalg::general_mat_mul(1., &x, &self.weight.value().t(), 0., &mut y);
        y += &self.bias.value();
        Ok(y)
    }

    /// Accumulates the parameter gradients from `d` and the cached input,
    /// and returns the gradient with respect to that input.
    ///
    /// The weight and bias gradients are *added* to the accumulators, so
    /// repeated backward calls without a `zero_grad` in between sum up.
    ///
    /// # Returns
    /// An error if no forward preceded this call or if `d` does not match
    /// the shape of the last forward output.
    pub fn backward(&mut self, d: ArrayView2<f32>) -> Result<Array2<f32>> {
        let (dim_in, dim_out) = self.dim;
        let x = self.x.as_ref().ok_or(NnErr::MissingCache { layer: "linear" })?;

        if d.dim() != (x.nrows(), dim_out) {
            return Err(NnErr::ShapeMismatch {
                what: "linear output gradient",
                got: d.dim(),
                expected: (x.nrows(), dim_out),
            });
        }

        let mut dw = self.weight.grad_mut();
        linalg::general_mat_mul(1., &d.t(), x, 1., &mut dw);

        let mut db = self.bias.grad_mut();
        db += &d.sum_axis(Axis(0));

        let mut dx = Array2::zeros((d.nrows(), dim_in));
        linalg::general_mat_mul(1., &d, &self.weight.value(), 0., &mut dx);
        Ok(dx)
    }

    pub fn weight(&self) -> &Param<Ix2> {
        &self.weight
    }

    pub fn bias(&self) -> &Param<Ix1> {
        &self.bias
    }

    pub(crate) fn weight_mut(&mut self) -> &mut Param<Ix2> {
        &mut self.weight
    }

    pub fn params(&self) -> Vec<ParamView<'_>> {
        vec![self.weight.as_view(), self.bias.as_view()]
    }

    pub fn zero_grad(&mut self) {
        self.weight.zero_grad();
        self.bias.zero_grad();
    }

    pub fn optimize(&mut self, optimizer: &mut impl Optimizer) {
        self.weight.optimize(optimizer);
        self.bias.optimize(optimizer);
    }

    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.weight.reset(rng);
        self.bias.reset(rng);
    }
}
