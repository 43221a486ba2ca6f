mod layer;
mod linear;
mod relu;
mod tanh;

pub use layer::Layer;
pub use linear::Linear;
pub use relu::Relu;
pub use tanh::Tanh;
