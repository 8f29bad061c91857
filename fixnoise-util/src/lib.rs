pub mod error;
pub mod math;
pub mod noise;

pub use error::NoiseError;
pub use math::{Fix64x61, Vector3};

/// Absolute and relative tolerance used when comparing against reference reals: agreement to
/// five decimal places.
pub const REFERENCE_TOLERANCE: f64 = 5e-7;

/// `true` when `a` and `b` agree within `tolerance`, either absolutely or relative to the
/// larger magnitude.
#[inline]
pub fn almost_equal(a: f64, b: f64, tolerance: f64) -> bool {
    let difference = (a - b).abs();
    difference <= tolerance || difference <= tolerance * a.abs().max(b.abs())
}

#[macro_export]
macro_rules! assert_eq_delta {
    ($x:expr, $y:expr, $d:expr) => {
        if !$crate::almost_equal($x, $y, $d) {
            panic!("{} vs {} ({} vs {})", $x, $y, ($x - $y).abs(), $d);
        }
    };
}
