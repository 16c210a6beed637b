//! Volumetric current zones
//!
//! A current zone tracks the bodies inside its trigger volume and, every
//! fixed step, blends each one toward the current's flow. Two blend
//! modes: Push (bounded velocity-change steps toward a target flow) and
//! Override (direct interpolation toward the raw force vector).

use crate::cues::CueSink;
use crate::error::SetupError;
use undertow_math::Vec3;
use undertow_physics::{Aabb3, BodyKey, ForceMode, PhysicsWorld, VolumeKey};
use serde::{Serialize, Deserialize};

/// How a zone blends occupant velocity toward its current
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentMode {
    /// Step velocity toward the target flow by at most
    /// `acceleration_rate * dt` per tick, as an instantaneous velocity
    /// change. Bounded approach rate regardless of mass; converges without
    /// overshoot.
    Push,
    /// Interpolate velocity toward the raw force vector by factor
    /// `acceleration_rate * dt` (clamped to [0, 1]) per tick. The force
    /// magnitude is the target speed; a zero force brakes occupants
    /// toward rest.
    Override,
}

/// A timed protection grant for one occupant
#[derive(Clone, Copy, Debug)]
struct Shield {
    body: BodyKey,
    remaining: f32,
}

/// A placed current volume
///
/// Owns its membership bookkeeping; the trigger volume in the physics
/// world supplies the enter/exit edges. Occupants are held in stable
/// insertion order so per-tick iteration is deterministic.
pub struct CurrentZone {
    volume: VolumeKey,
    force: Vec3,
    mode: CurrentMode,
    acceleration_rate: f32,
    max_current_speed: f32,
    /// Shield grant duration for entering bodies; None disables the grant
    shield_duration: Option<f32>,
    /// Display color for external debug rendering
    color: [f32; 4],
    occupants: Vec<BodyKey>,
    shields: Vec<Shield>,
}

impl CurrentZone {
    /// Create a zone over an existing trigger volume
    ///
    /// `force` sets the flow direction and strength; its interpretation
    /// depends on `mode`. Fails if the volume handle does not resolve.
    pub fn new(
        world: &PhysicsWorld,
        volume: VolumeKey,
        force: Vec3,
        mode: CurrentMode,
    ) -> Result<Self, SetupError> {
        if world.get_volume(volume).is_none() {
            return Err(SetupError::VolumeNotFound);
        }
        Ok(Self {
            volume,
            force,
            mode,
            acceleration_rate: 10.0,
            max_current_speed: 60.0,
            shield_duration: None,
            color: [0.2, 0.5, 0.9, 0.4],
            occupants: Vec::new(),
            shields: Vec::new(),
        })
    }

    /// Set how fast occupant velocity approaches the current
    pub fn with_acceleration_rate(mut self, rate: f32) -> Self {
        self.acceleration_rate = rate.max(0.0);
        self
    }

    /// Set the speed ceiling for Push-mode flow
    pub fn with_max_current_speed(mut self, speed: f32) -> Self {
        self.max_current_speed = speed.max(0.0);
        self
    }

    /// Grant entering bodies a timed protection shield
    pub fn with_shield_duration(mut self, duration: f32) -> Self {
        self.shield_duration = Some(duration.max(0.0));
        self
    }

    /// Set the display color reported to external renderers
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    /// The trigger volume this zone listens to
    pub fn volume(&self) -> VolumeKey {
        self.volume
    }

    /// The raw current force vector
    pub fn force(&self) -> Vec3 {
        self.force
    }

    /// Replace the current force vector
    pub fn set_force(&mut self, force: Vec3) {
        self.force = force;
    }

    /// The active blend mode
    pub fn mode(&self) -> CurrentMode {
        self.mode
    }

    /// Switch the blend mode
    pub fn set_mode(&mut self, mode: CurrentMode) {
        self.mode = mode;
    }

    /// Unit flow direction (zero if the force is zero)
    pub fn flow_direction(&self) -> Vec3 {
        self.force.normalized()
    }

    /// Display color for external debug rendering
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Bounds of the zone's region, if the volume is still alive
    pub fn bounds(&self, world: &PhysicsWorld) -> Option<Aabb3> {
        world.get_volume(self.volume).map(|v| v.region.bounds())
    }

    /// Number of tracked occupants
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    /// Tracked occupants in insertion order
    pub fn occupants(&self) -> &[BodyKey] {
        &self.occupants
    }

    /// Whether a body is currently tracked
    pub fn is_occupant(&self, body: BodyKey) -> bool {
        self.occupants.contains(&body)
    }

    /// Whether a body currently holds this zone's protection shield
    ///
    /// Signaled as a capability flag; enforcement is up to the damage
    /// system consuming it.
    pub fn is_shielded(&self, body: BodyKey) -> bool {
        self.shields.iter().any(|s| s.body == body)
    }

    /// Remaining shield time for a body, if any
    pub fn shield_remaining(&self, body: BodyKey) -> Option<f32> {
        self.shields
            .iter()
            .find(|s| s.body == body)
            .map(|s| s.remaining)
    }

    /// Track a body that entered the trigger volume
    ///
    /// Idempotent: a body already tracked produces no state change and no
    /// cues. On a genuine absent→present transition the enter cue and
    /// particles fire once, the ambience loop starts if the zone was
    /// empty, and a shield is granted if configured and none is active.
    pub fn on_body_enter(&mut self, body: BodyKey, cues: &mut dyn CueSink) {
        if self.occupants.contains(&body) {
            return;
        }
        if self.occupants.is_empty() {
            cues.start_loop();
        }
        self.occupants.push(body);
        cues.play_enter_cue();
        cues.start_particles();
        log::trace!("current zone gained occupant ({} total)", self.occupants.len());

        if let Some(duration) = self.shield_duration {
            if !self.is_shielded(body) {
                self.shields.push(Shield {
                    body,
                    remaining: duration,
                });
            }
        }
    }

    /// Stop tracking a body that left the trigger volume
    ///
    /// Idempotent: an untracked body is a no-op. Leaving cancels any
    /// shield held from this zone; the ambience loop stops when the last
    /// occupant leaves.
    pub fn on_body_exit(&mut self, body: BodyKey, cues: &mut dyn CueSink) {
        let Some(index) = self.occupants.iter().position(|&k| k == body) else {
            return;
        };
        self.occupants.remove(index);
        self.shields.retain(|s| s.body != body);
        log::trace!("current zone lost occupant ({} remain)", self.occupants.len());

        if self.occupants.is_empty() {
            cues.stop_loop();
        }
    }

    /// Run one fixed step of current influence
    ///
    /// Bodies destroyed since the last tick are dropped as implicit exits
    /// (including their shields, and the ambience loop if the zone
    /// empties). Each surviving occupant receives one blend application;
    /// calling this more than once per tick double-counts the blend.
    pub fn advance(&mut self, world: &mut PhysicsWorld, dt: f32, cues: &mut dyn CueSink) {
        let had_occupants = !self.occupants.is_empty();
        self.occupants.retain(|&k| world.contains_body(k));
        self.shields.retain(|s| world.contains_body(s.body));
        if had_occupants && self.occupants.is_empty() {
            cues.stop_loop();
        }

        for &body in &self.occupants {
            let Some(velocity) = world.velocity(body) else {
                continue;
            };
            match self.mode {
                CurrentMode::Push => {
                    let target = self.force.clamp_length(self.max_current_speed);
                    let step = (target - velocity).clamp_length(self.acceleration_rate * dt);
                    world.apply_force(body, step, ForceMode::VelocityChange);
                }
                CurrentMode::Override => {
                    let t = (self.acceleration_rate * dt).clamp(0.0, 1.0);
                    world.set_velocity(body, velocity.lerp(self.force, t));
                }
            }
        }

        for shield in &mut self.shields {
            shield.remaining -= dt;
        }
        self.shields.retain(|s| s.remaining > 0.0);
    }
}
