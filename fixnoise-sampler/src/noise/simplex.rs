//! Single-octave 3D simplex noise evaluated entirely in 64.61 fixed point.
//!
//! The skew factors, the `0.6` corner radius, the fourth-power falloff and the final `32`
//! multiplier are part of the output contract: changing any of them changes every sample.

use fixnoise_util::{
    noise::{dot, permute},
    Fix64x61, NoiseError,
};

/// Skewing factor into simplex space: `1/3`.
const F3: Fix64x61 = Fix64x61::from_ratio(1, 3);
/// Unskewing factor back to input space: `1/6`.
const G3: Fix64x61 = Fix64x61::from_ratio(1, 6);
const G3_TWICE: Fix64x61 = Fix64x61::from_bits(G3.to_bits() * 2);
/// Squared radius of a corner's influence.
const RADIUS_SQUARED: Fix64x61 = Fix64x61::from_ratio(6, 10);
/// Brings the summed contributions to roughly `[-1, 1]`.
const SCALE: Fix64x61 = Fix64x61::from_ratio(32, 1);

/// Offsets of the second and third corner of the simplex containing the sample.
type Traversal = ([i64; 3], [i64; 3]);

/// Sample 3D simplex noise at the given coordinates.
///
/// Returns a value in roughly `[-1, 1]`. Identical inputs always produce bit-identical output.
#[allow(clippy::many_single_char_names)]
pub fn noise3(x: Fix64x61, y: Fix64x61, z: Fix64x61) -> Result<Fix64x61, NoiseError> {
    let s = x.add(y)?.add(z)?.mul(F3)?;
    let i = x.add(s)?.floor();
    let j = y.add(s)?.floor();
    let k = z.add(s)?.floor();
    let t = i.add(j)?.add(k)?.mul(G3)?;
    let x0 = x.sub(i.sub(t)?)?;
    let y0 = y.sub(j.sub(t)?)?;
    let z0 = z.sub(k.sub(t)?)?;

    let (second, third) = traversal(x0, y0, z0);

    let x1 = x0.sub(unit(second[0]))?.add(G3)?;
    let y1 = y0.sub(unit(second[1]))?.add(G3)?;
    let z1 = z0.sub(unit(second[2]))?.add(G3)?;
    let x2 = x0.sub(unit(third[0]))?.add(G3_TWICE)?;
    let y2 = y0.sub(unit(third[1]))?.add(G3_TWICE)?;
    let z2 = z0.sub(unit(third[2]))?.add(G3_TWICE)?;
    let x3 = x0.sub(Fix64x61::ONE)?.add(Fix64x61::HALF)?;
    let y3 = y0.sub(Fix64x61::ONE)?.add(Fix64x61::HALF)?;
    let z3 = z0.sub(Fix64x61::ONE)?.add(Fix64x61::HALF)?;

    let ii = lattice_index(i);
    let jj = lattice_index(j);
    let kk = lattice_index(k);
    let gradient_index = |[a, b, c]: [i64; 3]| -> usize {
        (permute(ii + a + permute(jj + b + permute(kk + c))) % 12) as usize
    };

    let n0 = corner_noise(gradient_index([0, 0, 0]), x0, y0, z0)?;
    let n1 = corner_noise(gradient_index(second), x1, y1, z1)?;
    let n2 = corner_noise(gradient_index(third), x2, y2, z2)?;
    let n3 = corner_noise(gradient_index([1, 1, 1]), x3, y3, z3)?;

    n0.add(n1)?.add(n2)?.add(n3)?.mul(SCALE)
}

/// Picks which of the six tetrahedra of the skewed cube contains the offset.
///
/// The first comparison uses `>=`, so every ordering of the offsets, ties included, lands in
/// exactly one branch.
fn traversal(x0: Fix64x61, y0: Fix64x61, z0: Fix64x61) -> Traversal {
    if x0 >= y0 {
        if y0 >= z0 {
            ([1, 0, 0], [1, 1, 0])
        } else if x0 >= z0 {
            ([1, 0, 0], [1, 0, 1])
        } else {
            ([0, 0, 1], [1, 0, 1])
        }
    } else if y0 < z0 {
        ([0, 0, 1], [0, 1, 1])
    } else if x0 < z0 {
        ([0, 1, 0], [0, 1, 1])
    } else {
        ([0, 1, 0], [1, 1, 0])
    }
}

#[inline]
const fn unit(offset: i64) -> Fix64x61 {
    if offset == 0 {
        Fix64x61::ZERO
    } else {
        Fix64x61::ONE
    }
}

#[inline]
fn lattice_index(cell: Fix64x61) -> i64 {
    (cell.floor_to_int() & 0xFF) as i64
}

/// Contribution of one simplex corner: `t^4 * dot(gradient, offset)` with
/// `t = 0.6 - |offset|^2`, or zero outside the corner's radius.
#[inline]
fn corner_noise(
    gradient_index: usize,
    x: Fix64x61,
    y: Fix64x61,
    z: Fix64x61,
) -> Result<Fix64x61, NoiseError> {
    let t = RADIUS_SQUARED
        .sub(x.mul(x)?)?
        .sub(y.mul(y)?)?
        .sub(z.mul(z)?)?;
    if t.is_negative() {
        return Ok(Fix64x61::ZERO);
    }
    let t = t.mul(t)?;
    t.mul(t)?.mul(dot(gradient_index, x, y, z)?)
}
