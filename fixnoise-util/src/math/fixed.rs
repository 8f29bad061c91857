use std::fmt;

use num_traits::{Bounded, FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

use super::wide::U256;
use crate::error::NoiseError;

/// Number of fractional bits.
pub const FRACTION_BITS: u32 = 61;

const RAW_ONE: i128 = 1 << FRACTION_BITS;
/// Largest magnitude a raw value may have: 64 integer bits above the fraction.
const RAW_BOUND: i128 = 1 << 125;

const ONE_F64: f64 = RAW_ONE as f64;
const BOUND_F64: f64 = RAW_BOUND as f64;

/// Signed 64.61 fixed-point number.
///
/// The wrapped integer is the wire representation: `real = raw / 2^61`. Every operation either
/// produces an exactly defined, in-range result or returns an error; nothing wraps or saturates.
/// Products and quotients truncate toward zero.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fix64x61(i128);

#[allow(clippy::should_implement_trait)]
impl Fix64x61 {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(RAW_ONE);
    pub const HALF: Self = Self(RAW_ONE / 2);
    pub const MIN: Self = Self(-RAW_BOUND);
    pub const MAX: Self = Self(RAW_BOUND);

    /// Wraps a raw value without a range check. Meant for constant tables whose values are known
    /// to be in range; use [`Self::try_from_bits`] for anything coming from outside.
    pub const fn from_bits(raw: i128) -> Self {
        Self(raw)
    }

    pub const fn try_from_bits(raw: i128) -> Result<Self, NoiseError> {
        if raw < -RAW_BOUND || raw > RAW_BOUND {
            Err(NoiseError::Overflow)
        } else {
            Ok(Self(raw))
        }
    }

    pub const fn to_bits(self) -> i128 {
        self.0
    }

    /// The fixed-point value of `numerator / denominator`, truncated toward zero.
    ///
    /// Only for building constants; `denominator` must not be zero.
    pub const fn from_ratio(numerator: i64, denominator: i64) -> Self {
        Self(((numerator as i128) << FRACTION_BITS) / denominator as i128)
    }

    pub const fn from_int(value: i64) -> Result<Self, NoiseError> {
        Self::try_from_bits((value as i128) << FRACTION_BITS)
    }

    /// `round(value * 2^61)`, rounding half away from zero.
    pub fn from_f64(value: f64) -> Result<Self, NoiseError> {
        let scaled = (value * ONE_F64).round();
        if !scaled.is_finite() || scaled.abs() > BOUND_F64 {
            return Err(NoiseError::Overflow);
        }
        Ok(Self(scaled as i128))
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / ONE_F64
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn add(self, rhs: Self) -> Result<Self, NoiseError> {
        // Both operands are within 2^125, so the raw sum cannot leave i128.
        Self::try_from_bits(self.0 + rhs.0)
    }

    pub fn sub(self, rhs: Self) -> Result<Self, NoiseError> {
        Self::try_from_bits(self.0 - rhs.0)
    }

    pub fn mul(self, rhs: Self) -> Result<Self, NoiseError> {
        let negative = self.is_negative() != rhs.is_negative();
        let product = U256::mul_u128(self.0.unsigned_abs(), rhs.0.unsigned_abs());
        let magnitude = product
            .shr(FRACTION_BITS)
            .to_u128()
            .ok_or(NoiseError::Overflow)?;
        Self::from_magnitude(magnitude, negative)
    }

    pub fn div(self, rhs: Self) -> Result<Self, NoiseError> {
        if rhs.is_zero() {
            return Err(NoiseError::DivisionByZero);
        }
        let negative = self.is_negative() != rhs.is_negative();
        let magnitude = U256::from_u128(self.0.unsigned_abs())
            .shl(FRACTION_BITS)
            .div_u128(rhs.0.unsigned_abs())
            .ok_or(NoiseError::Overflow)?;
        Self::from_magnitude(magnitude, negative)
    }

    /// Floor of the exact square root.
    pub fn sqrt(self) -> Result<Self, NoiseError> {
        if self.is_negative() {
            return Err(NoiseError::InvalidArgument(
                "square root of a negative value",
            ));
        }
        let root = U256::from_u128(self.0.unsigned_abs())
            .shl(FRACTION_BITS)
            .isqrt();
        Self::from_magnitude(root, false)
    }

    /// `self^exponent` by repeated multiplication, truncating after every step.
    pub fn powi(self, exponent: u32) -> Result<Self, NoiseError> {
        let mut result = Self::ONE;
        for _ in 0..exponent {
            result = result.mul(self)?;
        }
        Ok(result)
    }

    /// Largest integer value not greater than `self`.
    pub const fn floor(self) -> Self {
        // -2^125 is itself a multiple of one, so this never leaves the range.
        Self((self.0 >> FRACTION_BITS) << FRACTION_BITS)
    }

    /// Integer part of [`Self::floor`].
    pub const fn floor_to_int(self) -> i128 {
        self.0 >> FRACTION_BITS
    }

    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub const fn neg(self) -> Self {
        Self(-self.0)
    }

    fn from_magnitude(magnitude: u128, negative: bool) -> Result<Self, NoiseError> {
        if magnitude > RAW_BOUND as u128 {
            return Err(NoiseError::Overflow);
        }
        let raw = magnitude as i128;
        Ok(Self(if negative { -raw } else { raw }))
    }
}

impl fmt::Display for Fix64x61 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, Fix64x61::to_f64(*self)),
            None => write!(f, "{}", Fix64x61::to_f64(*self)),
        }
    }
}

impl TryFrom<f64> for Fix64x61 {
    type Error = NoiseError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl From<Fix64x61> for f64 {
    fn from(value: Fix64x61) -> Self {
        value.to_f64()
    }
}

impl ToPrimitive for Fix64x61 {
    fn to_i64(&self) -> Option<i64> {
        // Truncates toward zero, like the primitive float conversions.
        i64::try_from(self.0 / RAW_ONE).ok()
    }

    fn to_u64(&self) -> Option<u64> {
        u64::try_from(self.0 / RAW_ONE).ok()
    }

    fn to_i128(&self) -> Option<i128> {
        Some(self.0 / RAW_ONE)
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Self::to_f64(*self))
    }
}

impl FromPrimitive for Fix64x61 {
    fn from_i64(n: i64) -> Option<Self> {
        Self::from_int(n).ok()
    }

    fn from_u64(n: u64) -> Option<Self> {
        i64::try_from(n).ok().and_then(Self::from_i64)
    }

    fn from_f64(n: f64) -> Option<Self> {
        Self::from_f64(n).ok()
    }
}

impl Bounded for Fix64x61 {
    fn min_value() -> Self {
        Self::MIN
    }

    fn max_value() -> Self {
        Self::MAX
    }
}

#[cfg(test)]
mod fixed_test {
    use num_traits::{Bounded, FromPrimitive, ToPrimitive};

    use super::Fix64x61;
    use crate::error::NoiseError;

    fn fix(value: f64) -> Fix64x61 {
        Fix64x61::from_f64(value).unwrap()
    }

    #[test]
    fn constants() {
        assert_eq!(Fix64x61::ONE.to_bits(), 2305843009213693952);
        assert_eq!(Fix64x61::HALF.to_bits(), 1152921504606846976);
        assert_eq!(Fix64x61::from_ratio(1, 3).to_bits(), 768614336404564650);
        assert_eq!(Fix64x61::from_ratio(-1, 3).to_bits(), -768614336404564650);
        assert_eq!(Fix64x61::from_ratio(6, 10).to_bits(), 1383505805528216371);
        assert_eq!(Fix64x61::MAX.to_f64(), 2f64.powi(64));
    }

    #[test]
    fn real_conversion() {
        let values = [
            (0.1, 230584300921369408),
            (-2.5, -5764607523034234880),
            (1.23, 2836186901332843520),
            (0.0, 0),
        ];

        for (real, raw) in values {
            assert_eq!(fix(real).to_bits(), raw);
        }
    }

    #[test]
    fn real_round_trip() {
        for value in [0.5, -1.23, 1.63, -9.99, 12.578, 1e-12, -123456.789, 1e15] {
            let round_trip = fix(value).to_f64();
            assert!(
                (round_trip - value).abs() <= 2f64.powi(-61) + value.abs() * f64::EPSILON,
                "{value} -> {round_trip}"
            );
        }
    }

    #[test]
    fn real_conversion_rejects_unrepresentable() {
        assert_eq!(Fix64x61::from_f64(f64::NAN), Err(NoiseError::Overflow));
        assert_eq!(Fix64x61::from_f64(f64::INFINITY), Err(NoiseError::Overflow));
        assert_eq!(Fix64x61::from_f64(2f64.powi(65)), Err(NoiseError::Overflow));
        assert_eq!(Fix64x61::from_f64(2f64.powi(64)), Ok(Fix64x61::MAX));
        assert_eq!(Fix64x61::from_f64(-(2f64.powi(64))), Ok(Fix64x61::MIN));
    }

    #[test]
    fn bits_range() {
        assert!(Fix64x61::try_from_bits(1 << 125).is_ok());
        assert_eq!(
            Fix64x61::try_from_bits((1 << 125) + 1),
            Err(NoiseError::Overflow)
        );
        assert_eq!(
            Fix64x61::try_from_bits(-(1 << 125) - 1),
            Err(NoiseError::Overflow)
        );
    }

    #[test]
    fn add_sub() {
        assert_eq!(fix(1.5).add(fix(-2.25)), Ok(fix(-0.75)));
        assert_eq!(fix(1.5).sub(fix(-2.25)), Ok(fix(3.75)));
        assert_eq!(
            Fix64x61::MAX.add(Fix64x61::from_bits(1)),
            Err(NoiseError::Overflow)
        );
        assert_eq!(
            Fix64x61::MIN.sub(Fix64x61::from_bits(1)),
            Err(NoiseError::Overflow)
        );
        assert_eq!(Fix64x61::MAX.add(Fix64x61::MIN), Ok(Fix64x61::ZERO));
    }

    #[test]
    fn mul_truncates_toward_zero() {
        let half = Fix64x61::HALF;
        assert_eq!(Fix64x61::from_bits(1).mul(half), Ok(Fix64x61::ZERO));
        assert_eq!(Fix64x61::from_bits(-1).mul(half), Ok(Fix64x61::ZERO));
        assert_eq!(
            Fix64x61::from_bits(-3).mul(half),
            Ok(Fix64x61::from_bits(-1))
        );
        assert_eq!(
            Fix64x61::from_bits(3).mul(half.neg()),
            Ok(Fix64x61::from_bits(-1))
        );
        assert_eq!(
            fix(1.23).mul(fix(-0.5)).map(Fix64x61::to_bits),
            Ok(-1418093450666421760)
        );
    }

    #[test]
    fn mul_range() {
        let big = Fix64x61::from_int(1 << 32).unwrap();
        assert_eq!(big.mul(big), Ok(Fix64x61::MAX));
        assert_eq!(big.mul(big.neg()), Ok(Fix64x61::MIN));
        assert_eq!(
            big.mul(big.add(Fix64x61::ONE).unwrap()),
            Err(NoiseError::Overflow)
        );
        assert_eq!(Fix64x61::MAX.mul(Fix64x61::MAX), Err(NoiseError::Overflow));
        assert_eq!(Fix64x61::MAX.mul(Fix64x61::ZERO), Ok(Fix64x61::ZERO));
    }

    #[test]
    fn div() {
        let three = Fix64x61::from_int(3).unwrap();
        assert_eq!(
            Fix64x61::ONE.div(three).map(Fix64x61::to_bits),
            Ok(768614336404564650)
        );
        let minus_one = Fix64x61::from_int(-1).unwrap();
        assert_eq!(
            minus_one.div(three).map(Fix64x61::to_bits),
            Ok(-768614336404564650)
        );
        assert_eq!(fix(-7.5).div(fix(2.5)), Ok(fix(-3.0)));
        assert_eq!(
            fix(7.5).div(Fix64x61::ZERO),
            Err(NoiseError::DivisionByZero)
        );
        assert_eq!(Fix64x61::MAX.div(Fix64x61::HALF), Err(NoiseError::Overflow));

        let tiny = Fix64x61::from_bits(1);
        assert_eq!(Fix64x61::MAX.div(tiny), Err(NoiseError::Overflow));
        assert_eq!(Fix64x61::ONE.div(tiny).map(Fix64x61::to_bits), Ok(1 << 122));
    }

    #[test]
    fn sqrt() {
        assert_eq!(fix(4.0).sqrt(), Ok(fix(2.0)));
        assert_eq!(Fix64x61::ZERO.sqrt(), Ok(Fix64x61::ZERO));
        assert_eq!(
            fix(2.0).sqrt().map(Fix64x61::to_bits),
            Ok(3260954456333195553)
        );
        assert_eq!(
            Fix64x61::HALF.sqrt().map(Fix64x61::to_bits),
            Ok(1630477228166597776)
        );
        let root = Fix64x61::from_int(1 << 32).unwrap();
        assert_eq!(Fix64x61::MAX.sqrt(), Ok(root));
        assert!(matches!(
            fix(-1.0).sqrt(),
            Err(NoiseError::InvalidArgument(_))
        ));
    }

    #[test]
    fn powi() {
        assert_eq!(fix(0.5).powi(0), Ok(Fix64x61::ONE));
        assert_eq!(fix(0.5).powi(3), Ok(fix(0.125)));
        assert_eq!(fix(-2.0).powi(3), Ok(fix(-8.0)));
        assert_eq!(fix(2.0).powi(65), Err(NoiseError::Overflow));
    }

    #[test]
    fn floor_abs() {
        let values = [
            (-1.5, -2.0, -2),
            (1.5, 1.0, 1),
            (-2.0, -2.0, -2),
            (0.25, 0.0, 0),
        ];

        for (value, floored, int) in values {
            assert_eq!(fix(value).floor(), fix(floored));
            assert_eq!(fix(value).floor_to_int(), int);
        }
        assert_eq!(Fix64x61::MIN.floor(), Fix64x61::MIN);
        assert_eq!(fix(-3.25).abs(), fix(3.25));
        assert_eq!(Fix64x61::MIN.abs(), Fix64x61::MAX);
    }

    #[test]
    fn ordering() {
        assert!(fix(-0.1) < Fix64x61::ZERO);
        assert!(fix(0.3) > fix(0.2));
        assert_eq!(fix(1.0).max(fix(2.0)), fix(2.0));
    }

    #[test]
    fn display() {
        assert_eq!(fix(-0.5).to_string(), "-0.5");
        assert_eq!(format!("{:.3}", fix(0.1234)), "0.123");
        assert_eq!(format!("{:.5}", Fix64x61::ONE.neg()), "-1.00000");
        assert_eq!(format!("{:.2}", Fix64x61::HALF), "0.50");
    }

    #[test]
    fn num_traits() {
        assert_eq!(fix(-2.75).to_i64(), Some(-2));
        assert_eq!(fix(-2.75).to_u64(), None);
        assert_eq!(Fix64x61::MAX.to_i64(), None);
        assert_eq!(<Fix64x61 as FromPrimitive>::from_i64(-4), Some(fix(-4.0)));
        assert_eq!(<Fix64x61 as FromPrimitive>::from_u64(u64::MAX), None);
        assert_eq!(<Fix64x61 as FromPrimitive>::from_f64(f64::NAN), None);
        assert_eq!(Fix64x61::max_value(), Fix64x61::MAX);
        assert_eq!(Fix64x61::min_value(), Fix64x61::MIN);
    }

    #[test]
    fn serde_uses_raw_integer() {
        let json = serde_json::to_string(&Fix64x61::HALF.neg()).unwrap();
        assert_eq!(json, "-1152921504606846976");
        let parsed: Fix64x61 = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Fix64x61::HALF.neg());
    }

    #[test]
    fn wide_arithmetic_matches_bigint() {
        use num_bigint::BigInt;

        let bound = BigInt::from(Fix64x61::MAX.to_bits());
        let checked = |exact: BigInt| {
            if exact.magnitude() > bound.magnitude() {
                Err(NoiseError::Overflow)
            } else {
                Ok(Fix64x61::from_bits(i128::try_from(exact).unwrap()))
            }
        };

        let scale = BigInt::from(1) << 61;
        let mut state = 0x2545_f491_4f6c_dd1d_u64;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        for _ in 0..2000 {
            let shift = next() % 126;
            let a = (i128::from(next()) << 64 | i128::from(next())) >> (2 + shift);
            let b = (i128::from(next()) << 64 | i128::from(next())) >> (2 + next() % 126);
            let (x, y) = (Fix64x61::from_bits(a), Fix64x61::from_bits(b));
            let (big_a, big_b) = (BigInt::from(a), BigInt::from(b));

            assert_eq!(x.mul(y), checked(&big_a * &big_b / &scale));
            if b != 0 {
                assert_eq!(x.div(y), checked((big_a << 61) / big_b));
            }
        }
    }
}
