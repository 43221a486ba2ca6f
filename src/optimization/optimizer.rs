use ndarray::{ArrayViewD, ArrayViewMutD};

pub trait Optimizer {
    /// Updates one parameter buffer in place from its accumulated gradient.
    /// `value` and `grad` always have the same shape.
    fn update(&mut self, value: ArrayViewMutD<'_, f32>, grad: ArrayViewD<'_, f32>);
}
