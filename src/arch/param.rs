use ndarray::{Array, ArrayView, ArrayViewD, ArrayViewMut, Dimension};
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

use crate::{
    error::{NnErr, Result},
    optimization::Optimizer,
};

/// How a parameter buffer gets its values, both at construction and on
/// every `reset`.
#[derive(Debug, Clone, Copy)]
pub enum ParamInit {
    Const(f32),
    Uniform(Uniform<f32>),
    Normal(Normal<f32>),
}

impl ParamInit {
    /// Creates a uniform initializer over `[low, high)`.
    ///
    /// # Returns
    /// An error if the range is invalid (low > high or not finite).
    pub fn uniform(low: f32, high: f32) -> Result<Self> {
        let dist = Uniform::new(low, high)
            .map_err(|_| NnErr::InvalidConfig("uniform init needs a finite low < high range"))?;
        Ok(Self::Uniform(dist))
    }

    /// Creates a Xavier uniform initializer for a weight with the given fans.
    pub fn xavier_uniform(fan_in: usize, fan_out: usize) -> Result<Self> {
        let range = (6. / (fan_in + fan_out) as f32).sqrt();
        Self::uniform(-range, range)
    }

    /// Creates a Kaiming normal initializer for a weight with the given fan-in.
    pub fn kaiming(fan_in: usize) -> Result<Self> {
        let std_dev = (2. / fan_in as f32).sqrt();
        Self::normal(0., std_dev)
    }

    /// Creates a normal initializer.
    ///
    /// # Returns
    /// An error if `std_dev` is not finite (NaN or infinite).
    pub fn normal(mean: f32, std_dev: f32) -> Result<Self> {
        let dist = Normal::new(mean, std_dev)
            .map_err(|_| NnErr::InvalidConfig("normal init needs a finite std deviation"))?;
        Ok(Self::Normal(dist))
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        match self {
            Self::Const(value) => *value,
            Self::Uniform(dist) => dist.sample(rng),
            Self::Normal(dist) => dist.sample(rng),
        }
    }
}

/// A learnable tensor owned by the layer that created it: a value buffer
/// plus a gradient accumulator of the same shape.
///
/// Params are allocated once at layer construction and never reallocated;
/// the optimizer mutates the value in place and `zero_grad` clears the
/// accumulator.
#[derive(Debug)]
pub struct Param<D: Dimension> {
    name: &'static str,
    value: Array<f32, D>,
    grad: Array<f32, D>,
    init: ParamInit,
}

impl<D: Dimension> Param<D> {
    /// Creates a new `Param`, sampling the value buffer from `init` and
    /// zeroing the gradient accumulator.
    pub fn new<R: Rng>(name: &'static str, dim: D, init: ParamInit, rng: &mut R) -> Self {
        let value = Array::from_shape_simple_fn(dim.clone(), || init.sample(rng));
        let grad = Array::zeros(dim);

        Self {
            name,
            value,
            grad,
            init,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> ArrayView<'_, f32, D> {
        self.value.view()
    }

    pub fn grad(&self) -> ArrayView<'_, f32, D> {
        self.grad.view()
    }

    pub(crate) fn value_mut(&mut self) -> ArrayViewMut<'_, f32, D> {
        self.value.view_mut()
    }

    pub(crate) fn grad_mut(&mut self) -> ArrayViewMut<'_, f32, D> {
        self.grad.view_mut()
    }

    /// Clears the gradient accumulator.
    pub fn zero_grad(&mut self) {
        self.grad.fill(0.);
    }

    /// Lets `optimizer` update the value buffer from the accumulated gradient.
    pub fn optimize(&mut self, optimizer: &mut impl Optimizer) {
        optimizer.update(self.value.view_mut().into_dyn(), self.grad.view().into_dyn());
    }

    /// Re-samples the value buffer in place from the recorded init scheme
    /// and clears the gradient, without reallocating either buffer.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        let init = self.init;
        self.value.mapv_inplace(|_| init.sample(rng));
        self.grad.fill(0.);
    }

    pub fn as_view(&self) -> ParamView<'_> {
        ParamView {
            name: self.name,
            value: self.value.view().into_dyn(),
            grad: self.grad.view().into_dyn(),
        }
    }
}

/// A read-only, dimension-erased view of a `Param`, in the stable order
/// the owning model exposes them.
pub struct ParamView<'a> {
    pub name: &'static str,
    pub value: ArrayViewD<'a, f32>,
    pub grad: ArrayViewD<'a, f32>,
}
