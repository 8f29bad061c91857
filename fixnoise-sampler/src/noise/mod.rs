use fixnoise_util::{Fix64x61, NoiseError};

pub mod octave;
pub mod percentile;
pub mod simplex;

#[inline]
pub fn lerp(delta: Fix64x61, start: Fix64x61, end: Fix64x61) -> Result<Fix64x61, NoiseError> {
    start.add(delta.mul(end.sub(start)?)?)
}

#[inline]
pub fn lerp_progress(
    value: Fix64x61,
    start: Fix64x61,
    end: Fix64x61,
) -> Result<Fix64x61, NoiseError> {
    value.sub(start)?.div(end.sub(start)?)
}

/// Maps a kernel output from `[-1, 1]` onto `[0, 1]`.
#[inline]
pub fn normalize_unit(value: Fix64x61) -> Result<Fix64x61, NoiseError> {
    value.add(Fix64x61::ONE)?.mul(Fix64x61::HALF)
}
