//! Unsigned 256-bit intermediate used by fixed-point multiplication, division and square root.
//!
//! Only the handful of operations the 64.61 arithmetic needs are provided. Everything works
//! on magnitudes; callers re-apply the sign afterwards.

use std::cmp::Ordering;

const LOW_64: u128 = u64::MAX as u128;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) struct U256 {
    hi: u128,
    lo: u128,
}

impl U256 {
    pub(crate) const ZERO: Self = Self { hi: 0, lo: 0 };

    pub(crate) const fn from_u128(value: u128) -> Self {
        Self { hi: 0, lo: value }
    }

    /// Full 128x128 -> 256 bit product.
    pub(crate) const fn mul_u128(a: u128, b: u128) -> Self {
        let a_lo = a & LOW_64;
        let a_hi = a >> 64;
        let b_lo = b & LOW_64;
        let b_hi = b >> 64;

        let ll = a_lo * b_lo;
        let lh = a_lo * b_hi;
        let hl = a_hi * b_lo;
        let hh = a_hi * b_hi;

        // Each partial product fits in 128 bits; the carries are collected from the middle column.
        let mid = (ll >> 64) + (lh & LOW_64) + (hl & LOW_64);
        let lo = (ll & LOW_64) | (mid << 64);
        let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);

        Self { hi, lo }
    }

    pub(crate) const fn shl(self, shift: u32) -> Self {
        match shift {
            0 => self,
            1..=127 => Self {
                hi: (self.hi << shift) | (self.lo >> (128 - shift)),
                lo: self.lo << shift,
            },
            128..=255 => Self {
                hi: self.lo << (shift - 128),
                lo: 0,
            },
            _ => Self::ZERO,
        }
    }

    pub(crate) const fn shr(self, shift: u32) -> Self {
        match shift {
            0 => self,
            1..=127 => Self {
                hi: self.hi >> shift,
                lo: (self.lo >> shift) | (self.hi << (128 - shift)),
            },
            128..=255 => Self {
                hi: 0,
                lo: self.hi >> (shift - 128),
            },
            _ => Self::ZERO,
        }
    }

    /// Narrows to 128 bits, or `None` if any of the upper half is set.
    pub(crate) const fn to_u128(self) -> Option<u128> {
        if self.hi == 0 {
            Some(self.lo)
        } else {
            None
        }
    }

    /// Truncating division by a 128-bit divisor.
    ///
    /// Returns `None` when the divisor is zero or the quotient does not fit in 128 bits.
    pub(crate) fn div_u128(self, divisor: u128) -> Option<u128> {
        if divisor == 0 || self.hi >= divisor {
            return None;
        }

        // Restoring long division over the low half; the running remainder starts as the high
        // half, which is already smaller than the divisor.
        let mut remainder = self.hi;
        let mut quotient: u128 = 0;
        for bit in (0..128).rev() {
            let carry = remainder >> 127;
            remainder = (remainder << 1) | ((self.lo >> bit) & 1);
            if carry != 0 || remainder >= divisor {
                remainder = remainder.wrapping_sub(divisor);
                quotient |= 1 << bit;
            }
        }
        Some(quotient)
    }

    /// Floor of the square root.
    pub(crate) fn isqrt(self) -> u128 {
        // sqrt(2^256 - 1) < 2^128, so the root always fits.
        let mut root: u128 = 0;
        for bit in (0..128).rev() {
            let candidate = root | (1 << bit);
            if Self::mul_u128(candidate, candidate) <= self {
                root = candidate;
            }
        }
        root
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hi.cmp(&other.hi).then(self.lo.cmp(&other.lo))
    }
}

#[cfg(test)]
mod wide_test {
    use super::U256;

    #[test]
    fn mul_small() {
        assert_eq!(U256::mul_u128(7, 6).to_u128(), Some(42));
        assert_eq!(U256::mul_u128(0, u128::MAX), U256::ZERO);
    }

    #[test]
    fn mul_max() {
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        let product = U256::mul_u128(u128::MAX, u128::MAX);
        assert_eq!(product.hi, u128::MAX - 1);
        assert_eq!(product.lo, 1);
    }

    #[test]
    fn mul_carries_into_high_half() {
        let product = U256::mul_u128(1 << 127, 4);
        assert_eq!(product.hi, 2);
        assert_eq!(product.lo, 0);
        assert_eq!(product.to_u128(), None);
    }

    #[test]
    fn shifts() {
        let value = U256::from_u128(0b1011);
        assert_eq!(value.shl(130).shr(130), value);
        assert_eq!(value.shl(126).hi, 0b10);
        assert_eq!(value.shr(2).to_u128(), Some(0b10));
        assert_eq!(value.shl(256), U256::ZERO);
        let square = U256::mul_u128(1 << 100, 1 << 100);
        assert_eq!(square.shr(100).to_u128(), Some(1 << 100));
    }

    #[test]
    fn division() {
        assert_eq!(U256::from_u128(100).div_u128(7), Some(14));
        assert_eq!(U256::from_u128(100).div_u128(0), None);

        let dividend = U256::mul_u128(u128::MAX, 3);
        assert_eq!(dividend.div_u128(3), Some(u128::MAX));
        assert_eq!(dividend.div_u128(2), None);

        let shifted = U256::from_u128(5).shl(61);
        assert_eq!(shifted.div_u128(1 << 61), Some(5));
    }

    #[test]
    fn square_root() {
        assert_eq!(U256::ZERO.isqrt(), 0);
        assert_eq!(U256::from_u128(15).isqrt(), 3);
        assert_eq!(U256::from_u128(16).isqrt(), 4);
        assert_eq!(U256::mul_u128(1 << 93, 1 << 93).isqrt(), 1 << 93);
        assert_eq!(U256::mul_u128(u128::MAX, u128::MAX).isqrt(), u128::MAX);
    }

    #[test]
    fn ordering() {
        assert!(U256::mul_u128(u128::MAX, 2) > U256::from_u128(u128::MAX));
        assert!(U256::from_u128(3) < U256::from_u128(4));
    }
}
