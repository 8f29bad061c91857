//! Deterministic 3D simplex noise on 64.61 fixed-point numbers.
//!
//! Every entry point is a pure function over immutable inputs and `const` tables, so results are
//! bit-identical across calls, threads and conforming implementations.

pub mod noise;
pub mod table;

pub use fixnoise_util::{Fix64x61, NoiseError, Vector3};
pub use noise::octave::{noise3_octaves, OctaveSpec};
pub use noise::percentile::{noise3_at_percentile, PercentileTable};
pub use noise::simplex::noise3;
