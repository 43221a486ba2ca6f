use ndarray::{Array2, ArrayView2};
use rand::Rng;

use super::{layers::Layer, param::ParamView};
use crate::{error::Result, optimization::Optimizer};

/// A sequential model: information flows forward through the layers when
/// computing an output and backward, in reverse layer order, when
/// computing gradients.
///
/// Only one forward/backward pair may be in flight at a time: each layer's
/// cache is refreshed by `forward` and read by the paired `backward`.
#[derive(Debug)]
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Layer>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// Makes a training forward pass through the network, layer by layer.
    ///
    /// # Arguments
    /// * `x` - The input batch.
    ///
    /// # Returns
    /// The prediction for the given input, or an error on a shape mismatch.
    pub fn forward(&mut self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let mut x = x.to_owned();
        for layer in &mut self.layers {
            x = layer.forward(x.view())?;
        }
        Ok(x)
    }

    /// Makes an inference-only forward pass; no backward caches are touched.
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let mut x = x.to_owned();
        for layer in &self.layers {
            x = layer.predict(x.view())?;
        }
        Ok(x)
    }

    /// Propagates the loss gradient through the layers in reverse order,
    /// letting each accumulate its parameter gradients. Terminal operation:
    /// the gradient with respect to the model input is discarded.
    ///
    /// # Arguments
    /// * `grad` - The gradient seed, of the shape of the last forward output.
    pub fn backward(&mut self, grad: Array2<f32>) -> Result<()> {
        let mut d = grad;
        for layer in self.layers.iter_mut().rev() {
            d = layer.backward(d)?;
        }
        Ok(())
    }

    /// All params of the model, concatenated in layer order. The order is
    /// stable across calls.
    pub fn params(&self) -> Vec<ParamView<'_>> {
        self.layers.iter().flat_map(|layer| layer.params()).collect()
    }

    /// Clears every gradient accumulator in the model.
    pub fn zero_grad(&mut self) {
        for layer in &mut self.layers {
            layer.zero_grad();
        }
    }

    /// Lets `optimizer` update every param in the model, in `params` order.
    pub fn optimize(&mut self, optimizer: &mut impl Optimizer) {
        for layer in &mut self.layers {
            layer.optimize(optimizer);
        }
    }

    /// Re-samples every param in place, giving a fresh model without
    /// rebuilding the layer graph.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        for layer in &mut self.layers {
            layer.reset(rng);
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }
}
