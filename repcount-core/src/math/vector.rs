//! 3-vector type and projection helpers

use core::ops::{Add, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3-axis sample in device-local coordinates
///
/// Used both for linear acceleration and for the gravity estimate. Units
/// are whatever the sensor reports (m/s² on phones).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// The zero vector (also the "no gravity sample yet" estimate)
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector from its components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length
    ///
    /// Components are scaled by the largest magnitude before squaring so
    /// very large or very small vectors neither overflow nor flush to zero.
    pub fn magnitude(&self) -> f32 {
        let scale = libm::fabsf(self.x)
            .max(libm::fabsf(self.y))
            .max(libm::fabsf(self.z));
        if scale == 0.0 || scale.is_infinite() {
            return scale;
        }

        let scaled = Self::new(self.x / scale, self.y / scale, self.z / scale);
        scale * libm::sqrtf(scaled.dot(scaled))
    }

    /// Check if every component is exactly zero
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Dot product with another vector
    pub fn dot(&self, other: Vector3) -> f32 {
        (self.x * other.x) + (self.y * other.y) + (self.z * other.z)
    }

    /// Normalize to unit length
    ///
    /// Returns `None` for a zero-length vector, which has no direction.
    pub fn try_unit(&self) -> Option<Vector3> {
        let mag = self.magnitude();
        if mag > 0.0 {
            Some(Self::new(self.x / mag, self.y / mag, self.z / mag))
        } else {
            None
        }
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f32) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Normalize `v` to unit magnitude
///
/// A zero vector has no direction; it maps to [`Vector3::ZERO`] rather than
/// dividing by zero, so any projection onto it is `0.0`.
pub fn unit_vector(v: Vector3) -> Vector3 {
    v.try_unit().unwrap_or(Vector3::ZERO)
}

/// Standard dot product
pub fn dot(a: Vector3, b: Vector3) -> f32 {
    a.dot(b)
}

/// Scalar projection of `a` onto the direction of `onto`
///
/// With `onto` set to the gravity estimate, positive values mean the device
/// is accelerating downward and negative values mean upward. Projecting onto
/// the zero vector yields `0.0`.
pub fn projection(a: Vector3, onto: Vector3) -> f32 {
    dot(a, unit_vector(onto))
}
