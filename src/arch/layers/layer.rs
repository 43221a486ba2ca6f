use ndarray::{Array2, ArrayView2};
use rand::Rng;

use super::{Linear, Relu, Tanh};
use crate::{arch::param::{ParamInit, ParamView}, error::Result, optimization::Optimizer};

/// A layer of a sequential model, dispatching the common capability set
/// {forward, backward, predict, params, zero_grad, optimize, reset} over
/// the concrete layer kinds.
#[derive(Debug)]
pub enum Layer {
    Linear(Linear),
    Relu(Relu),
    Tanh(Tanh),
}
use Layer::*;

impl Layer {
    pub fn linear<R: Rng>(dim: (usize, usize), init: ParamInit, rng: &mut R) -> Result<Self> {
        Ok(Self::Linear(Linear::new(dim.0, dim.1, init, rng)?))
    }

    pub fn relu() -> Self {
        Self::Relu(Relu::new())
    }

    pub fn tanh() -> Self {
        Self::Tanh(Tanh::new())
    }

    /// Training forward pass; every variant refreshes its backward cache.
    pub fn forward(&mut self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        match self {
            Linear(l) => l.forward(x),
            Relu(l) => Ok(l.forward(x)),
            Tanh(l) => Ok(l.forward(x)),
        }
    }

    /// Inference forward pass; no cache is written.
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        match self {
            Linear(l) => l.predict(x),
            Relu(l) => Ok(l.predict(x)),
            Tanh(l) => Ok(l.predict(x)),
        }
    }

    /// Consumes the gradient with respect to this layer's output and
    /// returns the gradient with respect to its input.
    pub fn backward(&mut self, d: Array2<f32>) -> Result<Array2<f32>> {
        match self {
            Linear(l) => l.backward(d.view()),
            Relu(l) => l.backward(d),
            Tanh(l) => l.backward(d),
        }
    }

    /// The layer's params in a stable order (weight before bias); empty for
    /// the activations.
    pub fn params(&self) -> Vec<ParamView<'_>> {
        match self {
            Linear(l) => l.params(),
            Relu(_) | Tanh(_) => Vec::new(),
        }
    }

    pub fn zero_grad(&mut self) {
        match self {
            Linear(l) => l.zero_grad(),
            Relu(_) | Tanh(_) => {}
        }
    }

    pub fn optimize(&mut self, optimizer: &mut impl Optimizer) {
        match self {
            Linear(l) => l.optimize(optimizer),
            Relu(_) | Tanh(_) => {}
        }
    }

    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        match self {
            Linear(l) => l.reset(rng),
            Relu(_) | Tanh(_) => {}
        }
    }
}
