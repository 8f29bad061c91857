#![no_main]

use fixnoise_sampler::{noise3, noise3_at_percentile, noise3_octaves};
use fixnoise_util::Fix64x61;
use libfuzzer_sys::fuzz_target;

fn raw_values(data: &[u8]) -> impl Iterator<Item = Fix64x61> + '_ {
    data.chunks_exact(16).filter_map(|chunk| {
        let bytes: [u8; 16] = chunk.try_into().ok()?;
        Fix64x61::try_from_bits(i128::from_le_bytes(bytes)).ok()
    })
}

fuzz_target!(|data: &[u8]| {
    let values: Vec<Fix64x61> = raw_values(data).collect();
    let [a, b, c, ..] = values[..] else {
        return;
    };

    // Arithmetic either fails cleanly or stays within range.
    for result in [a.add(b), a.sub(b), a.mul(b), a.div(b), a.abs().sqrt()] {
        if let Ok(value) = result {
            assert!(value >= Fix64x61::MIN && value <= Fix64x61::MAX);
        }
    }
    if !b.is_zero() {
        assert!(a.div(b).is_ok() || a.abs() > b.abs());
    }

    assert_eq!(noise3(a, b, c), noise3(a, b, c));
    assert_eq!(noise3_octaves(a, b, c, 1, Fix64x61::ONE), noise3(a, b, c));
    let percentile = Fix64x61::from_bits(a.to_bits().rem_euclid(Fix64x61::ONE.to_bits() + 1));
    assert!(noise3_at_percentile(percentile).is_ok());
});
