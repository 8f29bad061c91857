use fixnoise_util::{Fix64x61, NoiseError, Vector3};

use super::simplex::noise3;

/// Validated octave parameters.
///
/// Octave `k` has amplitude `persistence^k` and samples the kernel at the coordinate divided by
/// that same amplitude, so frequency and amplitude move together. The weighted sum is divided by
/// the total weight, keeping the result in the kernel's range for any octave count.
///
/// Amplitudes truncate like every other product, so a deep enough octave has zero amplitude and
/// sampling fails with [`NoiseError::DivisionByZero`]. At persistence 0.5 this starts with the
/// 63rd octave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OctaveSpec {
    octaves: u32,
    persistence: Fix64x61,
}

impl OctaveSpec {
    pub fn new(octaves: u32, persistence: Fix64x61) -> Result<Self, NoiseError> {
        if octaves < 1 {
            return Err(NoiseError::InvalidArgument(
                "octave count must be at least 1",
            ));
        }
        if !persistence.is_positive() {
            return Err(NoiseError::InvalidArgument("persistence must be positive"));
        }
        Ok(Self {
            octaves,
            persistence,
        })
    }

    pub const fn octaves(&self) -> u32 {
        self.octaves
    }

    pub const fn persistence(&self) -> Fix64x61 {
        self.persistence
    }

    pub fn sample(&self, pos: Vector3<Fix64x61>) -> Result<Fix64x61, NoiseError> {
        let mut amplitude = Fix64x61::ONE;
        let mut weighted_sum = Fix64x61::ZERO;
        let mut total_weight = Fix64x61::ZERO;

        for octave in 0..self.octaves {
            if octave > 0 {
                amplitude = amplitude.mul(self.persistence)?;
            }
            let scaled = pos.div_scalar(amplitude)?;
            let value = noise3(scaled.x, scaled.y, scaled.z)?;
            log::trace!("octave {octave}: amplitude {amplitude}, value {value}");

            weighted_sum = weighted_sum.add(amplitude.mul(value)?)?;
            total_weight = total_weight.add(amplitude)?;
        }

        weighted_sum.div(total_weight)
    }
}

/// Fractal noise: `Σ p^k · noise3(v / p^k) / Σ p^k` for `k` in `0..octaves`.
pub fn noise3_octaves(
    x: Fix64x61,
    y: Fix64x61,
    z: Fix64x61,
    octaves: u32,
    persistence: Fix64x61,
) -> Result<Fix64x61, NoiseError> {
    OctaveSpec::new(octaves, persistence)?.sample(Vector3::new(x, y, z))
}
