mod loss_fn;
mod mse;

pub use loss_fn::Loss;
pub use mse::Mse;
