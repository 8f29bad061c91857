use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use fixnoise_sampler::{
    noise3, noise3_at_percentile, noise3_octaves,
    table::{generate, TableSpec},
    Fix64x61, Vector3,
};

fn bench_noise(c: &mut Criterion) {
    let pos = Vector3::from_f64(0.5, -1.23, 1.63).unwrap();
    let persistence = Fix64x61::from_f64(0.5).unwrap();
    let percentile = Fix64x61::from_f64(0.755).unwrap();

    c.bench_function("noise3", |b| {
        b.iter(|| noise3(black_box(pos.x), black_box(pos.y), black_box(pos.z)));
    });

    c.bench_function("noise3 octaves 6", |b| {
        b.iter(|| noise3_octaves(black_box(pos.x), pos.y, pos.z, 6, persistence));
    });

    c.bench_function("noise3 at percentile", |b| {
        b.iter(|| noise3_at_percentile(black_box(percentile)));
    });

    let spec = TableSpec {
        resolution: 16,
        ..TableSpec::default()
    };
    c.bench_function("percentile table 16^3", |b| {
        b.iter(|| generate(black_box(&spec)));
    });
}

criterion_group!(benches, bench_noise);
criterion_main!(benches);
