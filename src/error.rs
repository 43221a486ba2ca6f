use std::{error::Error, fmt};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, NnErr>;

/// The crate's error type.
///
/// Shape and cache errors indicate a construction or wiring bug; they are
/// fatal to the current run and never retried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NnErr {
    /// Two buffers that must agree in shape do not.
    ShapeMismatch {
        what: &'static str,
        got: (usize, usize),
        expected: (usize, usize),
    },

    /// `backward` was called with no matching `forward` cache to read.
    MissingCache { layer: &'static str },

    /// A component was built from values outside its domain.
    InvalidConfig(&'static str),
}

impl fmt::Display for NnErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NnErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "shape mismatch for {what}: got {}x{}, expected {}x{}",
                got.0, got.1, expected.0, expected.1
            ),
            NnErr::MissingCache { layer } => {
                write!(f, "backward called on {layer} before a matching forward")
            }
            NnErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for NnErr {}
