//! Quaternion rotations
//!
//! Unit quaternions represent 3D orientations. Rotation composition is
//! quaternion multiplication; applying a rotation to a vector is the
//! sandwich product q * v * q⁻¹.
//!
//! Basis convention: forward = +Z, right = +X, up = +Y.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use crate::Vec3;

/// A rotation quaternion
///
/// Q = w + x*i + y*j + z*k, with `w` the scalar part.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    /// Vector component along i
    pub x: f32,
    /// Vector component along j
    pub y: f32,
    /// Vector component along k
    pub z: f32,
    /// Scalar component
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Create a quaternion from raw components
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion rotating by `angle` radians about `axis`
    ///
    /// For a rotation by angle θ the quaternion is:
    /// Q = cos(θ/2) + sin(θ/2) * (axis as pure quaternion)
    ///
    /// The axis is normalized automatically; a zero axis yields identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let half = angle * 0.5;
        let sin_h = half.sin();
        Self {
            x: axis.x * sin_h,
            y: axis.y * sin_h,
            z: axis.z * sin_h,
            w: half.cos(),
        }
    }

    /// Quaternion dot product
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Compute the squared magnitude of the quaternion
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Compute the magnitude of the quaternion
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Normalize the quaternion to unit magnitude
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv_mag = 1.0 / mag;
            Self {
                x: self.x * inv_mag,
                y: self.y * inv_mag,
                z: self.z * inv_mag,
                w: self.w * inv_mag,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Compute the conjugate of the quaternion
    ///
    /// For unit quaternions, this is the inverse rotation.
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Rotate a vector using the sandwich product: v' = Q * v * Q†
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        // Expanded sandwich product: v' = v + 2*qv × (qv × v + w*v)
        let qv = Vec3::new(self.x, self.y, self.z);
        let t = qv.cross(v) * 2.0;
        v + t * self.w + qv.cross(t)
    }

    /// Forward basis vector (+Z rotated into world space)
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotate(Vec3::Z)
    }

    /// Right basis vector (+X rotated into world space)
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotate(Vec3::X)
    }

    /// Up basis vector (+Y rotated into world space)
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotate(Vec3::Y)
    }

    /// Spherical interpolation from `self` toward `other` by factor `t`
    ///
    /// Takes the shortest arc. Falls back to normalized linear
    /// interpolation when the endpoints are nearly parallel, where the
    /// spherical formula loses precision.
    pub fn slerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut cos_theta = self.dot(other);

        // Negate one endpoint to take the shorter of the two arcs
        let mut end = other;
        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            end = Self::new(-other.x, -other.y, -other.z, -other.w);
        }

        if cos_theta > 0.9995 {
            // Nearly parallel: nlerp
            return Self {
                x: self.x + (end.x - self.x) * t,
                y: self.y + (end.y - self.y) * t,
                z: self.z + (end.z - self.z) * t,
                w: self.w + (end.w - self.w) * t,
            }
            .normalized();
        }

        let theta = cos_theta.clamp(-1.0, 1.0).acos();
        let sin_theta = theta.sin();
        let a = ((1.0 - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;

        Self {
            x: self.x * a + end.x * b,
            y: self.y * a + end.y * b,
            z: self.z * a + end.z * b,
            w: self.w * a + end.w * b,
        }
    }
}

/// Rotation composition: `a * b` applies `b` first, then `a`
impl std::ops::Mul for Quat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!(
            (a - b).length() < EPSILON,
            "vectors differ: {:?} vs {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_vec_eq(Quat::IDENTITY.rotate(v), v);
    }

    #[test]
    fn test_axis_angle_quarter_turn() {
        // 90° about Y takes +Z to +X
        let q = Quat::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        assert_vec_eq(q.rotate(Vec3::Z), Vec3::X);
    }

    #[test]
    fn test_axis_angle_half_turn() {
        // 180° about Y takes +Z to -Z
        let q = Quat::from_axis_angle(Vec3::Y, std::f32::consts::PI);
        assert_vec_eq(q.rotate(Vec3::Z), -Vec3::Z);
    }

    #[test]
    fn test_zero_axis_is_identity() {
        let q = Quat::from_axis_angle(Vec3::ZERO, 1.0);
        assert_eq!(q, Quat::IDENTITY);
    }

    #[test]
    fn test_conjugate_inverts() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 0.5), 0.7);
        let v = Vec3::new(3.0, -1.0, 2.0);
        assert_vec_eq(q.conjugate().rotate(q.rotate(v)), v);
    }

    #[test]
    fn test_composition_order() {
        // 90° about Y then 90° about X (world axes)
        let yaw = Quat::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        let pitch = Quat::from_axis_angle(Vec3::X, std::f32::consts::FRAC_PI_2);
        let combined = pitch * yaw;

        let expected = pitch.rotate(yaw.rotate(Vec3::Z));
        assert_vec_eq(combined.rotate(Vec3::Z), expected);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let q = Quat::from_axis_angle(Vec3::new(0.3, 1.0, -0.5), 2.1);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!((q.rotate(v).length() - v.length()).abs() < EPSILON);
    }

    #[test]
    fn test_normalized() {
        let q = Quat::new(2.0, 0.0, 0.0, 0.0).normalized();
        assert!((q.magnitude() - 1.0).abs() < EPSILON);
        assert!((q.x - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_basis_vectors() {
        // Identity basis matches the world axes
        assert_vec_eq(Quat::IDENTITY.forward(), Vec3::Z);
        assert_vec_eq(Quat::IDENTITY.right(), Vec3::X);
        assert_vec_eq(Quat::IDENTITY.up(), Vec3::Y);

        // After a 90° yaw, forward points along +X
        let q = Quat::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        assert_vec_eq(q.forward(), Vec3::X);
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle(Vec3::Y, 1.0);

        let start = a.slerp(b, 0.0);
        let end = a.slerp(b, 1.0);
        assert!((start.dot(a).abs() - 1.0).abs() < EPSILON);
        assert!((end.dot(b).abs() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_slerp_halfway() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        let mid = a.slerp(b, 0.5);

        // Halfway between identity and a 90° yaw is a 45° yaw
        let expected = Quat::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_4);
        assert!((mid.dot(expected).abs() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_slerp_is_unit() {
        let a = Quat::from_axis_angle(Vec3::X, 0.4);
        let b = Quat::from_axis_angle(Vec3::Y, 2.5);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((a.slerp(b, t).magnitude() - 1.0).abs() < EPSILON);
        }
    }
}
