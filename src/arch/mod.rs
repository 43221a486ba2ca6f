pub mod layers;
pub mod loss;
mod param;
mod sequential;

pub use param::{Param, ParamInit, ParamView};
pub use sequential::Sequential;
