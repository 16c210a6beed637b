//! Rigid body types for the underwater simulation

use crate::overlap::OverlapFilter;
use undertow_math::{Quat, Vec3};
use slotmap::new_key_type;

// Define generational key type for rigid bodies
new_key_type! {
    /// Key to a rigid body in the physics world
    ///
    /// Uses generational indexing to prevent the ABA problem where a handle
    /// could point to a reused slot. If a body is removed and its slot reused,
    /// old keys will return None instead of pointing to the wrong body.
    pub struct BodyKey;
}

/// Smallest mass a body may carry; keeps force-to-acceleration finite
const MIN_MASS: f32 = 0.001;

/// How a vector handed to [`crate::PhysicsWorld::apply_force`] is interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force: accumulated, then scaled by 1/mass and dt at the
    /// next `step`
    Force,
    /// Instantaneous velocity change: mass-independent, applied immediately
    VelocityChange,
}

/// A rigid body with position, orientation, and velocity state
///
/// Bodies are mutated through the [`crate::PhysicsWorld`] command surface;
/// integration happens once per fixed step.
#[derive(Clone, Debug)]
pub struct RigidBody {
    /// Position in world space
    pub position: Vec3,
    /// Orientation in world space
    pub orientation: Quat,
    /// Linear velocity (units per second)
    pub velocity: Vec3,
    /// Angular velocity (axis scaled by radians per second)
    pub angular_velocity: Vec3,
    /// Mass of the body
    pub mass: f32,
    /// Bounding radius used for trigger-volume overlap tests
    pub radius: f32,
    /// Linear drag from the surrounding water (per-second rate)
    pub linear_damping: f32,
    /// Angular drag from the surrounding water (per-second rate)
    pub angular_damping: f32,
    /// Overlap layer membership
    pub filter: OverlapFilter,
    /// Force accumulated since the last `step` (cleared on integration)
    pub(crate) accumulated_force: Vec3,
}

impl RigidBody {
    /// Create a new body at the given position
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 1.0,
            radius: 0.5,
            linear_damping: 0.0,
            angular_damping: 0.0,
            filter: OverlapFilter::default(),
            accumulated_force: Vec3::ZERO,
        }
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the orientation of this body
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation.normalized();
        self
    }

    /// Set the mass of this body (clamped to a small positive minimum)
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass.max(MIN_MASS);
        self
    }

    /// Set the bounding radius used for overlap tests
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius.max(0.0);
        self
    }

    /// Set linear and angular water damping rates
    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear.max(0.0);
        self.angular_damping = angular.max(0.0);
        self
    }

    /// Set the overlap filter for this body
    pub fn with_filter(mut self, filter: OverlapFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Speed of the body (velocity magnitude)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::OverlapLayer;

    #[test]
    fn test_new_body() {
        let pos = Vec3::new(1.0, 2.0, 3.0);
        let body = RigidBody::new(pos);

        assert_eq!(body.position, pos);
        assert_eq!(body.velocity, Vec3::ZERO);
        assert_eq!(body.orientation, Quat::IDENTITY);
        assert_eq!(body.mass, 1.0);
        assert_eq!(body.accumulated_force, Vec3::ZERO);
    }

    #[test]
    fn test_builder_methods() {
        let body = RigidBody::new(Vec3::ZERO)
            .with_velocity(Vec3::new(1.0, 2.0, 0.0))
            .with_mass(5.0)
            .with_radius(1.5)
            .with_damping(0.8, 0.4)
            .with_filter(OverlapFilter::pilot());

        assert_eq!(body.velocity, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(body.mass, 5.0);
        assert_eq!(body.radius, 1.5);
        assert_eq!(body.linear_damping, 0.8);
        assert_eq!(body.angular_damping, 0.4);
        assert_eq!(body.filter.layer, OverlapLayer::PILOT);
    }

    #[test]
    fn test_mass_clamped_positive() {
        let body = RigidBody::new(Vec3::ZERO).with_mass(0.0);
        assert!(body.mass > 0.0);

        let body = RigidBody::new(Vec3::ZERO).with_mass(-3.0);
        assert!(body.mass > 0.0);
    }

    #[test]
    fn test_speed() {
        let body = RigidBody::new(Vec3::ZERO).with_velocity(Vec3::new(3.0, 0.0, 4.0));
        assert!((body.speed() - 5.0).abs() < 0.0001);
    }
}
