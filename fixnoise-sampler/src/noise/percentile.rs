use fixnoise_data::percentile::{PercentileBreakpoint, PERCENTILE_BREAKPOINTS};
use fixnoise_util::{Fix64x61, NoiseError};

use super::{lerp, lerp_progress};

/// Inverse cumulative distribution of the single-octave kernel, sampled offline.
///
/// Lookups binary-search the bracketing breakpoints and interpolate linearly between them.
#[derive(Clone, Copy, Debug)]
pub struct PercentileTable<'a> {
    breakpoints: &'a [PercentileBreakpoint],
}

/// The compiled-in table for the current gradient table revision.
pub const DEFAULT_TABLE: PercentileTable<'static> = PercentileTable {
    breakpoints: &PERCENTILE_BREAKPOINTS,
};

impl<'a> PercentileTable<'a> {
    /// Checks that the breakpoints form a valid inverse CDF over `[0, 1]`: at least two entries,
    /// strictly increasing percentiles starting at 0 and ending at 1, and non-decreasing values.
    pub fn new(breakpoints: &'a [PercentileBreakpoint]) -> Result<Self, NoiseError> {
        let (Some(first), Some(last)) = (breakpoints.first(), breakpoints.last()) else {
            return Err(NoiseError::InvalidArgument("percentile table is empty"));
        };
        if breakpoints.len() < 2 {
            return Err(NoiseError::InvalidArgument(
                "percentile table needs at least two breakpoints",
            ));
        }
        if first.percentile != Fix64x61::ZERO || last.percentile != Fix64x61::ONE {
            return Err(NoiseError::InvalidArgument(
                "percentile table must span [0, 1]",
            ));
        }
        let ordered = |pair: &[PercentileBreakpoint]| {
            pair[0].percentile < pair[1].percentile && pair[0].value <= pair[1].value
        };
        if !breakpoints.windows(2).all(ordered) {
            return Err(NoiseError::InvalidArgument(
                "percentile table must be monotonic",
            ));
        }
        Ok(Self { breakpoints })
    }

    pub const fn breakpoints(&self) -> &'a [PercentileBreakpoint] {
        self.breakpoints
    }

    /// The value whose cumulative probability is `percentile`.
    pub fn value_at(&self, percentile: Fix64x61) -> Result<Fix64x61, NoiseError> {
        if percentile < Fix64x61::ZERO || percentile > Fix64x61::ONE {
            return Err(NoiseError::OutOfRange(percentile));
        }

        // Index of the first breakpoint strictly above the percentile. The first breakpoint sits
        // at 0, so this is at least 1.
        let upper = self
            .breakpoints
            .partition_point(|breakpoint| breakpoint.percentile <= percentile);
        if upper == self.breakpoints.len() {
            return Ok(self.breakpoints[upper - 1].value);
        }
        let low = self.breakpoints[upper - 1];
        let high = self.breakpoints[upper];

        let delta = lerp_progress(percentile, low.percentile, high.percentile)?;
        lerp(delta, low.value, high.value)
    }
}

impl Default for PercentileTable<'static> {
    fn default() -> Self {
        DEFAULT_TABLE
    }
}

/// Maps a percentile in `[0, 1]` to the normalized single-octave noise value at that point of
/// the distribution.
pub fn noise3_at_percentile(percentile: Fix64x61) -> Result<Fix64x61, NoiseError> {
    DEFAULT_TABLE.value_at(percentile)
}
