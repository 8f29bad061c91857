use fixnoise_sampler::{noise3, noise3_at_percentile, noise3_octaves, Fix64x61, Vector3};
use log::info;

use crate::CliError;

fn report(label: &str, value: Fix64x61) {
    info!("{label} = {value:.5} (raw {})", value.to_bits());
}

pub fn noise(x: f64, y: f64, z: f64) -> Result<(), CliError> {
    let pos = Vector3::from_f64(x, y, z)?;
    report(
        &format!("noise3({x}, {y}, {z})"),
        noise3(pos.x, pos.y, pos.z)?,
    );
    Ok(())
}

pub fn octaves(x: f64, y: f64, z: f64, octaves: u32, persistence: f64) -> Result<(), CliError> {
    let pos = Vector3::from_f64(x, y, z)?;
    let factor = Fix64x61::from_f64(persistence)?;
    let value = noise3_octaves(pos.x, pos.y, pos.z, octaves, factor)?;
    report(
        &format!("noise3_octaves({x}, {y}, {z}, {octaves}, {persistence})"),
        value,
    );
    Ok(())
}

pub fn percentile(percentile: f64) -> Result<(), CliError> {
    let value = noise3_at_percentile(Fix64x61::from_f64(percentile)?)?;
    report(&format!("noise3_at_percentile({percentile})"), value);
    Ok(())
}
