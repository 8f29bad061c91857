use thiserror::Error;

use crate::math::fixed::Fix64x61;

/// Failure of a fixed-point or noise operation.
///
/// Every variant is a hard rejection; no operation substitutes an approximate value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseError {
    #[error("Fixed-point result is outside the representable range")]
    Overflow,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Percentile {0} is outside [0, 1]")]
    OutOfRange(Fix64x61),
}
