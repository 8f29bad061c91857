use proc_macro2::TokenStream;
use quote::quote;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct PercentileTableAsset {
    revision: u32,
    resolution: u32,
    step: i128,
    origin: i128,
    breakpoints: Vec<(i128, i128)>,
}

pub(crate) fn build() -> TokenStream {
    println!("cargo:rerun-if-changed=../assets/percentile_table.json");

    let asset: PercentileTableAsset =
        serde_json::from_str(include_str!("../../assets/percentile_table.json"))
            .expect("Failed to parse percentile_table.json");

    assert!(
        asset.breakpoints.len() >= 2,
        "percentile_table.json needs at least two breakpoints"
    );
    assert!(
        asset
            .breakpoints
            .windows(2)
            .all(|pair| pair[0].0 < pair[1].0 && pair[0].1 <= pair[1].1),
        "percentile_table.json breakpoints must be increasing"
    );

    let revision = asset.revision;
    let resolution = asset.resolution;
    let step = asset.step;
    let origin = asset.origin;
    let len = asset.breakpoints.len();

    let mut entries = TokenStream::new();
    for (percentile, value) in &asset.breakpoints {
        entries.extend([quote! {
            PercentileBreakpoint::new(
                Fix64x61::from_bits(#percentile),
                Fix64x61::from_bits(#value),
            ),
        }]);
    }

    quote! {
        use fixnoise_util::math::fixed::Fix64x61;

        /// One `(percentile, value)` entry of an inverse cumulative distribution table.
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct PercentileBreakpoint {
            pub percentile: Fix64x61,
            pub value: Fix64x61,
        }

        impl PercentileBreakpoint {
            pub const fn new(percentile: Fix64x61, value: Fix64x61) -> Self {
                Self { percentile, value }
            }
        }

        /// Gradient table revision the breakpoints were sampled with.
        pub const TABLE_REVISION: u32 = #revision;
        /// Samples per axis of the cubic sampling grid.
        pub const SAMPLE_RESOLUTION: u32 = #resolution;
        /// Spacing between neighbouring grid samples.
        pub const SAMPLE_STEP: Fix64x61 = Fix64x61::from_bits(#step);
        /// Coordinate of the first sample on every axis.
        pub const SAMPLE_ORIGIN: Fix64x61 = Fix64x61::from_bits(#origin);

        /// Single-octave noise distribution, values normalized to `[0, 1]`.
        pub const PERCENTILE_BREAKPOINTS: [PercentileBreakpoint; #len] = [
            #entries
        ];
    }
}
