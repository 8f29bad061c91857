use super::fixed::Fix64x61;
use crate::error::NoiseError;

/// Ordered `(x, y, z)` triple. Sampling coordinates are `Vector3<Fix64x61>`.
#[derive(Clone, Copy, Debug, PartialEq, Hash, Eq, Default)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Copy> Vector3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Vector3 { x, y, z }
    }

    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Vector3<U> {
        Vector3 {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
        }
    }
}

impl Vector3<Fix64x61> {
    pub fn from_f64(x: f64, y: f64, z: f64) -> Result<Self, NoiseError> {
        Ok(Self::new(
            Fix64x61::from_f64(x)?,
            Fix64x61::from_f64(y)?,
            Fix64x61::from_f64(z)?,
        ))
    }

    pub fn add(&self, other: &Self) -> Result<Self, NoiseError> {
        Ok(Self::new(
            self.x.add(other.x)?,
            self.y.add(other.y)?,
            self.z.add(other.z)?,
        ))
    }

    pub fn sub(&self, other: &Self) -> Result<Self, NoiseError> {
        Ok(Self::new(
            self.x.sub(other.x)?,
            self.y.sub(other.y)?,
            self.z.sub(other.z)?,
        ))
    }

    pub fn div_scalar(&self, divisor: Fix64x61) -> Result<Self, NoiseError> {
        Ok(Self::new(
            self.x.div(divisor)?,
            self.y.div(divisor)?,
            self.z.div(divisor)?,
        ))
    }

    pub fn length_squared(&self) -> Result<Fix64x61, NoiseError> {
        self.x
            .mul(self.x)?
            .add(self.y.mul(self.y)?)?
            .add(self.z.mul(self.z)?)
    }
}

impl<T> From<(T, T, T)> for Vector3<T> {
    #[inline(always)]
    fn from((x, y, z): (T, T, T)) -> Self {
        Vector3 { x, y, z }
    }
}

impl<T> From<Vector3<T>> for (T, T, T) {
    #[inline(always)]
    fn from(vector: Vector3<T>) -> Self {
        (vector.x, vector.y, vector.z)
    }
}

impl<T: Copy> Vector3<T>
where
    T: Into<f64>,
{
    pub fn to_f64(&self) -> Vector3<f64> {
        Vector3 {
            x: self.x.into(),
            y: self.y.into(),
            z: self.z.into(),
        }
    }
}
