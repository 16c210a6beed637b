//! Physics world and fixed-step simulation
//!
//! The world owns the rigid-body and trigger-volume arenas and exposes the
//! force/velocity command surface that gameplay components drive. Per fixed
//! tick, callers are expected to resolve overlaps first, run component
//! logic, then integrate with `step`.

use crate::body::{BodyKey, ForceMode, RigidBody};
use crate::overlap::{OverlapEvent, OverlapKind};
use crate::volume::{TriggerVolume, VolumeKey};
use undertow_math::{Quat, Vec3};
use serde::{Serialize, Deserialize};
use slotmap::SlotMap;

/// Configuration for the physics simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Net vertical acceleration (gravity minus buoyancy, applied to Y)
    ///
    /// Defaults to zero: submerged bodies are treated as neutrally buoyant.
    pub gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { gravity: 0.0 }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given net vertical acceleration
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }
}

/// The physics world containing all rigid bodies and trigger volumes
pub struct PhysicsWorld {
    /// All rigid bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, RigidBody>,
    /// All trigger volumes in the world
    volumes: SlotMap<VolumeKey, TriggerVolume>,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            volumes: SlotMap::with_key(),
            config,
        }
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: RigidBody) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    ///
    /// Volumes still listing the body report an Exit event at the next
    /// overlap resolution.
    pub fn remove_body(&mut self, key: BodyKey) -> Option<RigidBody> {
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&RigidBody> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody> {
        self.bodies.get_mut(key)
    }

    /// Check whether a key still refers to a live body
    pub fn contains_body(&self, key: BodyKey) -> bool {
        self.bodies.contains_key(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all body keys
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    /// Add a trigger volume to the world and return its key
    pub fn add_volume(&mut self, volume: TriggerVolume) -> VolumeKey {
        self.volumes.insert(volume)
    }

    /// Remove a trigger volume from the world and return it
    pub fn remove_volume(&mut self, key: VolumeKey) -> Option<TriggerVolume> {
        self.volumes.remove(key)
    }

    /// Get an immutable reference to a volume by key
    pub fn get_volume(&self, key: VolumeKey) -> Option<&TriggerVolume> {
        self.volumes.get(key)
    }

    /// Get a mutable reference to a volume by key
    pub fn get_volume_mut(&mut self, key: VolumeKey) -> Option<&mut TriggerVolume> {
        self.volumes.get_mut(key)
    }

    /// Get the number of trigger volumes in the world
    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    /// Apply a force or velocity change to a body
    ///
    /// `Force` accumulates until the next `step`; `VelocityChange` lands on
    /// the body's velocity immediately. Stale keys are a no-op.
    pub fn apply_force(&mut self, key: BodyKey, vector: Vec3, mode: ForceMode) {
        if let Some(body) = self.bodies.get_mut(key) {
            match mode {
                ForceMode::Force => body.accumulated_force += vector,
                ForceMode::VelocityChange => body.velocity += vector,
            }
        }
    }

    /// Set a body's linear velocity outright
    pub fn set_velocity(&mut self, key: BodyKey, velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(key) {
            body.velocity = velocity;
        }
    }

    /// Read a body's linear velocity
    pub fn velocity(&self, key: BodyKey) -> Option<Vec3> {
        self.bodies.get(key).map(|b| b.velocity)
    }

    /// Rotate a body by a world-space rotation delta
    pub fn rotate(&mut self, key: BodyKey, rotation: Quat) {
        if let Some(body) = self.bodies.get_mut(key) {
            body.orientation = (rotation * body.orientation).normalized();
        }
    }

    /// Rotate a body about one of its own local axes
    pub fn rotate_local(&mut self, key: BodyKey, local_axis: Vec3, angle: f32) {
        if let Some(body) = self.bodies.get_mut(key) {
            let world_axis = body.orientation.rotate(local_axis);
            let rotation = Quat::from_axis_angle(world_axis, angle);
            body.orientation = (rotation * body.orientation).normalized();
        }
    }

    /// Resolve trigger overlaps, reporting membership edges
    ///
    /// For each volume (in insertion order), bodies are tested in insertion
    /// order and compared against the volume's previous overlap set. Exits
    /// are reported before enters within a volume. Bodies destroyed since
    /// the last pass surface as Exit events.
    pub fn update_overlaps(&mut self) -> Vec<OverlapEvent> {
        let mut events = Vec::new();

        for (volume_key, volume) in &mut self.volumes {
            let mut inside: Vec<BodyKey> = Vec::new();
            for (body_key, body) in &self.bodies {
                if volume.filter.detects(&body.filter)
                    && volume.region.overlaps_sphere(body.position, body.radius)
                {
                    inside.push(body_key);
                }
            }

            for &prev in &volume.inside {
                if !inside.contains(&prev) {
                    events.push(OverlapEvent {
                        volume: volume_key,
                        body: prev,
                        kind: OverlapKind::Exit,
                    });
                }
            }
            for &cur in &inside {
                if !volume.inside.contains(&cur) {
                    events.push(OverlapEvent {
                        volume: volume_key,
                        body: cur,
                        kind: OverlapKind::Enter,
                    });
                }
            }

            volume.inside = inside;
        }

        events
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs, per body:
    /// 1. Integration of accumulated forces (scaled by 1/mass) and gravity
    /// 2. Water damping of linear and angular velocity
    /// 3. Velocity integration into position and orientation
    pub fn step(&mut self, dt: f32) {
        for (_key, body) in &mut self.bodies {
            // Phase 1: forces and gravity into velocity
            body.velocity += body.accumulated_force * (dt / body.mass);
            body.velocity.y += self.config.gravity * dt;
            body.accumulated_force = Vec3::ZERO;

            // Phase 2: water damping
            body.velocity *= 1.0 / (1.0 + body.linear_damping * dt);
            body.angular_velocity *= 1.0 / (1.0 + body.angular_damping * dt);

            // Phase 3: integrate velocity into position and orientation
            body.position += body.velocity * dt;
            let spin_speed = body.angular_velocity.length();
            if spin_speed > 0.0 {
                let spin = Quat::from_axis_angle(body.angular_velocity, spin_speed * dt);
                body.orientation = (spin * body.orientation).normalized();
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::{OverlapFilter, OverlapLayer};
    use crate::shapes::Region;

    const EPSILON: f32 = 0.0001;

    fn pilot_at(position: Vec3) -> RigidBody {
        RigidBody::new(position)
            .with_radius(0.5)
            .with_filter(OverlapFilter::pilot())
    }

    #[test]
    fn test_world_add_body() {
        let mut world = PhysicsWorld::new();
        assert_eq!(world.body_count(), 0);

        let key = world.add_body(RigidBody::new(Vec3::new(0.0, 5.0, 0.0)));

        assert!(world.get_body(key).is_some());
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn test_stale_key_returns_none() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new(Vec3::ZERO));

        assert!(world.get_body(key).is_some());
        assert!(world.remove_body(key).is_some());
        assert!(world.get_body(key).is_none());

        // Add a new body - old key still reads as stale
        let new_key = world.add_body(RigidBody::new(Vec3::X));
        assert!(world.get_body(key).is_none());
        assert!(world.get_body(new_key).is_some());
    }

    #[test]
    fn test_velocity_integration() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(
            RigidBody::new(Vec3::new(0.0, 10.0, 0.0)).with_velocity(Vec3::new(10.0, 0.0, 0.0)),
        );

        world.step(1.0);

        let body = world.get_body(key).unwrap();
        assert!((body.position.x - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_force_mode_scales_by_mass_and_dt() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new(Vec3::ZERO).with_mass(2.0));

        world.apply_force(key, Vec3::new(10.0, 0.0, 0.0), ForceMode::Force);

        // Force is not visible until integration
        assert_eq!(world.velocity(key).unwrap(), Vec3::ZERO);

        world.step(0.5);

        // dv = F/m * dt = 10/2 * 0.5 = 2.5
        let v = world.velocity(key).unwrap();
        assert!((v.x - 2.5).abs() < EPSILON);
    }

    #[test]
    fn test_velocity_change_mode_is_immediate_and_mass_independent() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new(Vec3::ZERO).with_mass(100.0));

        world.apply_force(key, Vec3::new(0.0, 0.0, 3.0), ForceMode::VelocityChange);

        let v = world.velocity(key).unwrap();
        assert!((v.z - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_forces_cleared_after_step() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new(Vec3::ZERO));

        world.apply_force(key, Vec3::new(1.0, 0.0, 0.0), ForceMode::Force);
        world.step(1.0);
        let v1 = world.velocity(key).unwrap();

        // A second step without new forces must not accelerate further
        world.step(1.0);
        let v2 = world.velocity(key).unwrap();
        assert!((v1.x - v2.x).abs() < EPSILON);
    }

    #[test]
    fn test_commands_on_stale_key_are_noops() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new(Vec3::ZERO));
        world.remove_body(key);

        // None of these should panic or affect anything
        world.apply_force(key, Vec3::X, ForceMode::Force);
        world.apply_force(key, Vec3::X, ForceMode::VelocityChange);
        world.set_velocity(key, Vec3::X);
        world.rotate(key, Quat::from_axis_angle(Vec3::Y, 1.0));
        assert!(world.velocity(key).is_none());
    }

    #[test]
    fn test_linear_damping_slows_body() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(
            RigidBody::new(Vec3::ZERO)
                .with_velocity(Vec3::new(10.0, 0.0, 0.0))
                .with_damping(1.0, 0.0),
        );

        world.step(0.5);

        // v' = v / (1 + damping*dt) = 10 / 1.5
        let v = world.velocity(key).unwrap();
        assert!((v.x - 10.0 / 1.5).abs() < EPSILON);
    }

    #[test]
    fn test_gravity_disabled_by_default() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new(Vec3::new(0.0, 10.0, 0.0)));

        world.step(1.0);

        let body = world.get_body(key).unwrap();
        assert_eq!(body.position.y, 10.0);
    }

    #[test]
    fn test_negative_buoyancy_sinks_body() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(-2.0));
        let key = world.add_body(RigidBody::new(Vec3::new(0.0, 10.0, 0.0)));

        world.step(0.5);

        let body = world.get_body(key).unwrap();
        assert!((body.velocity.y - (-1.0)).abs() < EPSILON);
    }

    #[test]
    fn test_rotate_local_spins_about_own_axis() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new(Vec3::ZERO));

        // Quarter turn about the local up axis: forward goes from +Z to +X
        world.rotate_local(key, Vec3::Y, std::f32::consts::FRAC_PI_2);

        let fwd = world.get_body(key).unwrap().orientation.forward();
        assert!((fwd - Vec3::X).length() < EPSILON);
    }

    #[test]
    fn test_angular_velocity_integration() {
        let mut world = PhysicsWorld::new();
        let mut body = RigidBody::new(Vec3::ZERO);
        body.angular_velocity = Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0);
        let key = world.add_body(body);

        world.step(1.0);

        // After 1s at pi/2 rad/s about Y, forward is +X
        let fwd = world.get_body(key).unwrap().orientation.forward();
        assert!((fwd - Vec3::X).length() < 0.001);
    }

    // ==================== Overlap resolution ====================

    #[test]
    fn test_overlap_enter_event() {
        let mut world = PhysicsWorld::new();
        let volume = world.add_volume(TriggerVolume::new(Region::sphere(Vec3::ZERO, 2.0)));
        let body = world.add_body(pilot_at(Vec3::new(10.0, 0.0, 0.0)));

        // Outside: no events
        assert!(world.update_overlaps().is_empty());

        // Move inside
        world.get_body_mut(body).unwrap().position = Vec3::ZERO;
        let events = world.update_overlaps();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, OverlapKind::Enter);
        assert_eq!(events[0].volume, volume);
        assert_eq!(events[0].body, body);

        // Staying inside: no further events
        assert!(world.update_overlaps().is_empty());
    }

    #[test]
    fn test_overlap_exit_event() {
        let mut world = PhysicsWorld::new();
        world.add_volume(TriggerVolume::new(Region::sphere(Vec3::ZERO, 2.0)));
        let body = world.add_body(pilot_at(Vec3::ZERO));

        world.update_overlaps();

        world.get_body_mut(body).unwrap().position = Vec3::new(10.0, 0.0, 0.0);
        let events = world.update_overlaps();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, OverlapKind::Exit);
    }

    #[test]
    fn test_destroyed_body_reports_exit() {
        let mut world = PhysicsWorld::new();
        world.add_volume(TriggerVolume::new(Region::sphere(Vec3::ZERO, 2.0)));
        let body = world.add_body(pilot_at(Vec3::ZERO));

        world.update_overlaps();
        world.remove_body(body);

        let events = world.update_overlaps();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, OverlapKind::Exit);
        assert_eq!(events[0].body, body);
    }

    #[test]
    fn test_overlap_respects_filter() {
        let mut world = PhysicsWorld::new();
        world.add_volume(
            TriggerVolume::new(Region::sphere(Vec3::ZERO, 2.0))
                .with_detects(OverlapLayer::PILOT),
        );
        world.add_body(RigidBody::new(Vec3::ZERO).with_filter(OverlapFilter::creature()));

        // Creature layer is not detected by a pilot-only sensor
        assert!(world.update_overlaps().is_empty());
    }

    #[test]
    fn test_bounding_radius_widens_overlap() {
        let mut world = PhysicsWorld::new();
        world.add_volume(TriggerVolume::new(Region::sphere(Vec3::ZERO, 2.0)));
        // Center outside the region, bounding sphere reaching in
        world.add_body(pilot_at(Vec3::new(2.3, 0.0, 0.0)));

        let events = world.update_overlaps();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, OverlapKind::Enter);
    }

    #[test]
    fn test_body_in_two_volumes() {
        let mut world = PhysicsWorld::new();
        let a = world.add_volume(TriggerVolume::new(Region::sphere(Vec3::ZERO, 2.0)));
        let b = world.add_volume(TriggerVolume::new(Region::boxed(
            Vec3::ZERO,
            Vec3::new(3.0, 3.0, 3.0),
        )));
        world.add_body(pilot_at(Vec3::ZERO));

        let events = world.update_overlaps();
        assert_eq!(events.len(), 2);
        // Volume insertion order is preserved
        assert_eq!(events[0].volume, a);
        assert_eq!(events[1].volume, b);
    }

    #[test]
    fn test_overlap_events_deterministic_order() {
        let mut world = PhysicsWorld::new();
        world.add_volume(TriggerVolume::new(Region::sphere(Vec3::ZERO, 5.0)));
        let first = world.add_body(pilot_at(Vec3::ZERO));
        let second = world.add_body(pilot_at(Vec3::new(1.0, 0.0, 0.0)));

        let events = world.update_overlaps();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].body, first);
        assert_eq!(events[1].body, second);
    }
}
