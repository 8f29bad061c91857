//! Constant lattice tables shared by every noise evaluation.
//!
//! Outputs depend bit-for-bit on these tables, so any change to them must bump
//! [`TABLE_REVISION`] and regenerate the percentile table asset.

use crate::error::NoiseError;
use crate::math::fixed::Fix64x61;

/// Version of the permutation and gradient tables below.
pub const TABLE_REVISION: u32 = 1;

pub struct Gradient {
    x: i8,
    y: i8,
    z: i8,
}

/// Edge midpoints of a cube.
pub const GRADIENTS: [Gradient; 12] = [
    Gradient { x: 1, y: 1, z: 0 },
    Gradient { x: -1, y: 1, z: 0 },
    Gradient { x: 1, y: -1, z: 0 },
    Gradient { x: -1, y: -1, z: 0 },
    Gradient { x: 1, y: 0, z: 1 },
    Gradient { x: -1, y: 0, z: 1 },
    Gradient { x: 1, y: 0, z: -1 },
    Gradient { x: -1, y: 0, z: -1 },
    Gradient { x: 0, y: 1, z: 1 },
    Gradient { x: 0, y: -1, z: 1 },
    Gradient { x: 0, y: 1, z: -1 },
    Gradient { x: 0, y: -1, z: -1 },
];

/// Ken Perlin's reference permutation of `0..256`.
#[rustfmt::skip]
pub const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// Looks up `index` in [`PERMUTATION`], wrapping with a Euclidean modulo so every integer is
/// a valid input.
#[inline]
pub const fn permute(index: i64) -> i64 {
    PERMUTATION[index.rem_euclid(PERMUTATION.len() as i64) as usize] as i64
}

impl Gradient {
    #[inline]
    pub fn dot(&self, x: Fix64x61, y: Fix64x61, z: Fix64x61) -> Result<Fix64x61, NoiseError> {
        let mut sum = Fix64x61::ZERO;
        for (component, offset) in [(self.x, x), (self.y, y), (self.z, z)] {
            sum = sum.add(Fix64x61::from_int(component.into())?.mul(offset)?)?;
        }
        Ok(sum)
    }

    pub const fn components(&self) -> [i8; 3] {
        [self.x, self.y, self.z]
    }
}

/// Dot product of the gradient selected by `gradient_index` (taken modulo the table length)
/// with the offset `(x, y, z)`.
#[inline]
pub fn dot(
    gradient_index: usize,
    x: Fix64x61,
    y: Fix64x61,
    z: Fix64x61,
) -> Result<Fix64x61, NoiseError> {
    GRADIENTS[gradient_index % GRADIENTS.len()].dot(x, y, z)
}

#[cfg(test)]
mod gradient_table_test {
    use super::{dot, permute, GRADIENTS, PERMUTATION};
    use crate::math::fixed::Fix64x61;

    fn fix(value: f64) -> Fix64x61 {
        Fix64x61::from_f64(value).unwrap()
    }

    #[test]
    fn permutation_is_bijection() {
        let mut seen = [false; 256];
        for value in PERMUTATION {
            assert!(!seen[value as usize], "{value} appears twice");
            seen[value as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn permute_wraps() {
        assert_eq!(permute(0), 151);
        assert_eq!(permute(255), 180);
        assert_eq!(permute(256), 151);
        assert_eq!(permute(511), 180);
        assert_eq!(permute(-1), 180);
        assert_eq!(permute(-256), 151);
    }

    #[test]
    fn gradients_are_edge_midpoints() {
        for gradient in &GRADIENTS {
            let [x, y, z] = gradient.components();
            assert_eq!(x.abs() + y.abs() + z.abs(), 2);
        }
    }

    #[test]
    fn dot_product() {
        let (x, y, z) = (fix(0.25), fix(-0.5), fix(0.75));
        let values = [
            (0, -0.25),
            (3, 0.25),
            (4, 1.0),
            (11, -0.25),
            (12, -0.25),
            (23, -0.25),
        ];

        for (index, expected) in values {
            assert_eq!(dot(index, x, y, z), Ok(fix(expected)), "gradient {index}");
        }
    }

    #[test]
    fn dot_is_exact() {
        let x = Fix64x61::from_bits(-7);
        let y = Fix64x61::from_bits(3);
        assert_eq!(dot(0, x, y, Fix64x61::ZERO), Ok(Fix64x61::from_bits(-4)));
        assert_eq!(dot(1, x, y, Fix64x61::ZERO), Ok(Fix64x61::from_bits(10)));
    }
}
