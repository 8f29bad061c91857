//! Self-check of the reference scenarios for the current table revision.

use fixnoise_config::NoiseConfiguration;
use fixnoise_sampler::{
    noise3, noise3_at_percentile, noise3_octaves,
    table::{self, TableSpec},
    Fix64x61, NoiseError, Vector3,
};
use fixnoise_util::{almost_equal, noise::TABLE_REVISION};
use log::{error, info};

use crate::CliError;

type CheckResult = Result<(), String>;

/// `noise3` at the harness points, as raw wire integers.
const KERNEL_REFERENCE: [((f64, f64, f64), i128); 5] = [
    ((0.0, 0.0, 0.0), 0),
    ((0.5, -1.23, 1.63), -1_971_262_445_671_503_744),
    ((-1.94, -1.25, -1.63), 805_294_853_188_628_096),
    ((-9.99, 8.25, 6.98), 2_055_876_839_565_166_976),
    ((-0.005, 12.578, -2.87), 957_615_407_864_918_432),
];

/// `noise3_octaves(0.5, -1.23, 1.63, octaves, persistence)`.
const OCTAVE_REFERENCE: [((u32, f64), i128); 3] = [
    ((3, 0.5), -919_406_189_405_222_006),
    ((4, 0.75), -323_788_109_686_725_616),
    ((2, 2.0), -719_892_722_142_225_216),
];

const PERCENTILE_REFERENCE: [(f64, i128); 3] = [
    (0.1, 483_077_598_870_716_238),
    (0.5, 1_152_921_504_606_846_976),
    (0.9, 1_819_611_297_045_505_755),
];

fn fix(value: f64) -> Result<Fix64x61, String> {
    Fix64x61::from_f64(value).map_err(|err| format!("{value}: {err}"))
}

fn fix_point((x, y, z): (f64, f64, f64)) -> Result<Vector3<Fix64x61>, String> {
    Vector3::from_f64(x, y, z).map_err(|err| format!("({x}, {y}, {z}): {err}"))
}

fn expect_bits(label: &str, actual: Result<Fix64x61, NoiseError>, expected: i128) -> CheckResult {
    match actual {
        Ok(value) if value.to_bits() == expected => Ok(()),
        Ok(value) => Err(format!(
            "{label}: got {} ({value:.5}), expected {expected} ({:.5})",
            value.to_bits(),
            Fix64x61::from_bits(expected)
        )),
        Err(err) => Err(format!("{label}: {err}")),
    }
}

fn kernel_reference(_: f64) -> CheckResult {
    for (point, expected) in KERNEL_REFERENCE {
        let v = fix_point(point)?;
        expect_bits(&format!("noise3{point:?}"), noise3(v.x, v.y, v.z), expected)?;
    }
    Ok(())
}

fn kernel_deterministic(_: f64) -> CheckResult {
    for i in -20..20 {
        let v = fix_point((f64::from(i) * 1.37, f64::from(i) * -0.61, 0.25))?;
        if noise3(v.x, v.y, v.z) != noise3(v.x, v.y, v.z) {
            return Err(format!("noise3{v:?} is not deterministic"));
        }
    }
    Ok(())
}

fn octave_reference(_: f64) -> CheckResult {
    let v = fix_point((0.5, -1.23, 1.63))?;
    for ((octaves, persistence), expected) in OCTAVE_REFERENCE {
        let actual = noise3_octaves(v.x, v.y, v.z, octaves, fix(persistence)?);
        expect_bits(
            &format!("noise3_octaves({octaves}, {persistence})"),
            actual,
            expected,
        )?;
    }
    Ok(())
}

fn octave_identity(_: f64) -> CheckResult {
    for (point, _) in KERNEL_REFERENCE {
        let v = fix_point(point)?;
        let kernel = noise3(v.x, v.y, v.z).map_err(|err| err.to_string())?;
        let single = noise3_octaves(v.x, v.y, v.z, 1, Fix64x61::ONE);
        expect_bits(
            &format!("noise3_octaves{point:?} x1"),
            single,
            kernel.to_bits(),
        )?;
    }
    Ok(())
}

fn octave_weighted_average(tolerance: f64) -> CheckResult {
    let (x, y, z) = (0.5, -1.23, 1.63);
    let v = fix_point((x, y, z))?;
    for ((octaves, persistence), _) in OCTAVE_REFERENCE {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for k in 0..octaves {
            let amplitude = persistence.powi(k as i32);
            let scaled = fix_point((x / amplitude, y / amplitude, z / amplitude))?;
            let value = noise3(scaled.x, scaled.y, scaled.z).map_err(|err| err.to_string())?;
            weighted_sum += amplitude * value.to_f64();
            total_weight += amplitude;
        }
        let expected = weighted_sum / total_weight;
        let actual = noise3_octaves(v.x, v.y, v.z, octaves, fix(persistence)?)
            .map_err(|err| err.to_string())?
            .to_f64();
        if !almost_equal(actual, expected, tolerance) {
            return Err(format!(
                "noise3_octaves({octaves}, {persistence}) = {actual}, weighted average {expected}"
            ));
        }
    }
    Ok(())
}

fn percentile_reference(_: f64) -> CheckResult {
    for (percentile, expected) in PERCENTILE_REFERENCE {
        let actual = noise3_at_percentile(fix(percentile)?);
        expect_bits(
            &format!("noise3_at_percentile({percentile})"),
            actual,
            expected,
        )?;
    }
    Ok(())
}

fn percentile_range(_: f64) -> CheckResult {
    for percentile in [-0.1, 1.1] {
        match noise3_at_percentile(fix(percentile)?) {
            Err(NoiseError::OutOfRange(_)) => {}
            other => {
                return Err(format!(
                    "noise3_at_percentile({percentile}) = {other:?}, expected OutOfRange"
                ))
            }
        }
    }
    Ok(())
}

fn percentile_monotonic(_: f64) -> CheckResult {
    let mut previous = Fix64x61::MIN;
    for i in 0..=1000 {
        let percentile = Fix64x61::from_ratio(i, 1000);
        let value = noise3_at_percentile(percentile).map_err(|err| err.to_string())?;
        if value < previous {
            return Err(format!("noise3_at_percentile({percentile}) decreased"));
        }
        previous = value;
    }
    Ok(())
}

fn compiled_table(_: f64) -> CheckResult {
    let data = table::generate(&TableSpec::default()).map_err(|err| err.to_string())?;
    if data.matches_compiled() {
        Ok(())
    } else {
        Err("regenerated percentile table differs from the compiled one".to_string())
    }
}

const CHECKS: [(&str, fn(f64) -> CheckResult); 9] = [
    ("kernel reference points", kernel_reference),
    ("kernel determinism", kernel_deterministic),
    ("octave reference points", octave_reference),
    ("single octave equals kernel", octave_identity),
    ("octaves match weighted average", octave_weighted_average),
    ("percentile reference points", percentile_reference),
    ("percentile range", percentile_range),
    ("percentile monotonic", percentile_monotonic),
    ("compiled percentile table", compiled_table),
];

pub fn run(config: &NoiseConfiguration) -> Result<(), CliError> {
    info!("Checking table revision {TABLE_REVISION}");
    let mut failed = 0;
    for (name, check) in CHECKS {
        match check(config.tolerance) {
            Ok(()) => info!("ok: {name}"),
            Err(reason) => {
                error!("FAILED: {name}: {reason}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::CheckFailed {
            failed,
            total: CHECKS.len(),
        });
    }
    info!("All {} checks passed", CHECKS.len());
    Ok(())
}
