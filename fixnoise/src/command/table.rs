use std::{path::Path, time::Instant};

use fixnoise_config::TableConfig;
use fixnoise_sampler::{
    table::{self, TableSpec},
    Fix64x61,
};
use log::info;

use crate::CliError;

pub fn spec_from_config(config: &TableConfig) -> Result<TableSpec, CliError> {
    Ok(TableSpec {
        resolution: config.resolution,
        step: Fix64x61::from_f64(config.step)?,
        origin: Fix64x61::from_f64(config.origin)?,
        breakpoints: config.breakpoints,
    })
}

pub fn generate_table(config: &TableConfig, path: &Path) -> Result<(), CliError> {
    let spec = spec_from_config(config)?;
    let started = Instant::now();
    let data = table::generate(&spec)?;
    info!(
        "Generated {} breakpoints from {}^3 samples in {:.2?}",
        data.breakpoints.len(),
        spec.resolution,
        started.elapsed()
    );
    if !data.matches_compiled() {
        info!("Table differs from the compiled one; rebuild fixnoise-data");
    }

    data.write_json(path)?;
    info!("Wrote {}", path.display());
    Ok(())
}
