//! Offline generation of the percentile table.
//!
//! The kernel is sampled on a cubic grid, each sample is mapped onto `[0, 1]`, and the sorted
//! samples are read off at evenly spaced percentiles. The result is written as JSON to
//! `assets/percentile_table.json`, from which `fixnoise-data` compiles the constant table.

use std::{fs, io, path::Path};

use fixnoise_data::percentile::{
    PercentileBreakpoint, PERCENTILE_BREAKPOINTS, SAMPLE_ORIGIN, SAMPLE_RESOLUTION, SAMPLE_STEP,
    TABLE_REVISION,
};
use fixnoise_util::{noise, Fix64x61, NoiseError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::noise::{normalize_unit, simplex::noise3};

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to sample noise: {0}")]
    Noise(#[from] NoiseError),
    #[error("Failed to access table file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to (de)serialize table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sampling grid and breakpoint count of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableSpec {
    /// Samples per axis; the grid holds `resolution^3` samples.
    pub resolution: u32,
    pub step: Fix64x61,
    pub origin: Fix64x61,
    /// Number of intervals; the table holds one more breakpoint than this.
    pub breakpoints: u32,
}

impl Default for TableSpec {
    /// The parameters the compiled-in table was generated with.
    fn default() -> Self {
        Self {
            resolution: SAMPLE_RESOLUTION,
            step: SAMPLE_STEP,
            origin: SAMPLE_ORIGIN,
            breakpoints: (PERCENTILE_BREAKPOINTS.len() - 1) as u32,
        }
    }
}

/// Serialized form of a percentile table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PercentileTableData {
    pub revision: u32,
    pub resolution: u32,
    pub step: Fix64x61,
    pub origin: Fix64x61,
    pub breakpoints: Vec<(Fix64x61, Fix64x61)>,
}

impl PercentileTableData {
    pub fn to_breakpoints(&self) -> Vec<PercentileBreakpoint> {
        self.breakpoints
            .iter()
            .map(|&(percentile, value)| PercentileBreakpoint::new(percentile, value))
            .collect()
    }

    /// `true` when this table is exactly the one compiled into the crate.
    pub fn matches_compiled(&self) -> bool {
        self.revision == TABLE_REVISION
            && self.resolution == SAMPLE_RESOLUTION
            && self.step == SAMPLE_STEP
            && self.origin == SAMPLE_ORIGIN
            && self.to_breakpoints() == PERCENTILE_BREAKPOINTS
    }

    pub fn read_json(path: &Path) -> Result<Self, TableError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), TableError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Samples the kernel on the grid described by `spec` and returns every sample, normalized to
/// `[0, 1]` and sorted ascending.
pub fn sample_distribution(spec: &TableSpec) -> Result<Vec<Fix64x61>, NoiseError> {
    if spec.resolution == 0 {
        return Err(NoiseError::InvalidArgument("resolution must be at least 1"));
    }
    let coordinates = (0..spec.resolution)
        .map(|i| {
            let offset = Fix64x61::from_int(i.into())?.mul(spec.step)?;
            spec.origin.add(offset)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let planes = coordinates
        .par_iter()
        .map(|&x| -> Result<Vec<Fix64x61>, NoiseError> {
            let mut plane = Vec::with_capacity(coordinates.len() * coordinates.len());
            for &y in &coordinates {
                for &z in &coordinates {
                    plane.push(normalize_unit(noise3(x, y, z)?)?);
                }
            }
            Ok(plane)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut samples: Vec<Fix64x61> = planes.into_iter().flatten().collect();
    samples.par_sort_unstable();
    Ok(samples)
}

/// Generates the percentile table for `spec`.
///
/// Breakpoint `k` sits at percentile `k / breakpoints` and takes the sorted sample at index
/// `k * (samples - 1) / breakpoints`.
pub fn generate(spec: &TableSpec) -> Result<PercentileTableData, NoiseError> {
    if spec.breakpoints == 0 {
        return Err(NoiseError::InvalidArgument(
            "breakpoint count must be at least 1",
        ));
    }
    log::debug!(
        "Sampling {}^3 grid from {} with step {}",
        spec.resolution,
        spec.origin,
        spec.step
    );
    let samples = sample_distribution(spec)?;
    let last = samples.len() - 1;
    let intervals = spec.breakpoints as usize;
    let denominator = Fix64x61::from_int(spec.breakpoints.into())?;

    let breakpoints = (0..=spec.breakpoints)
        .map(|k| -> Result<_, NoiseError> {
            let percentile = Fix64x61::from_int(k.into())?.div(denominator)?;
            Ok((percentile, samples[k as usize * last / intervals]))
        })
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "Sampled {} values between {} and {}",
        samples.len(),
        samples[0],
        samples[last]
    );

    Ok(PercentileTableData {
        revision: noise::TABLE_REVISION,
        resolution: spec.resolution,
        step: spec.step,
        origin: spec.origin,
        breakpoints,
    })
}
