//! Pilot movement control
//!
//! Converts per-tick input axes into force/velocity and rotation commands
//! for a single controlled body. Translation supports two policies with
//! different composition behavior toward external contributors such as
//! current zones; rotation (yaw, pitch, auto-level) is shared.

use crate::error::SetupError;
use undertow_input::InputSnapshot;
use undertow_math::{Quat, Vec3};
use undertow_physics::{BodyKey, ForceMode, PhysicsWorld};
use serde::{Serialize, Deserialize};

/// Axis magnitude below which an input is treated as neutral
pub const DEAD_ZONE: f32 = 0.1;

/// Reverse speed cap as a fraction of max forward speed
const REVERSE_SPEED_FACTOR: f32 = 0.5;

/// Strafe thrust/speed as a fraction of the forward figures
const STRAFE_FACTOR: f32 = 0.5;

/// Pitch band (degrees) inside which auto-leveling stops
const LEVEL_BAND_DEG: f32 = 1.0;

/// Tunable parameters for the movement controller
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Forward thrust acceleration (units per second squared)
    pub acceleration: f32,
    /// Maximum forward speed (units per second)
    pub max_speed: f32,
    /// Relax rate toward rest when translation input is neutral (per second)
    pub drag: f32,
    /// Vertical thrust speed (units per second)
    pub vertical_speed: f32,
    /// Yaw rate (radians per second)
    pub turn_speed: f32,
    /// Pitch rate (radians per second)
    pub pitch_speed: f32,
    /// Pitch envelope half-angle (degrees)
    pub max_pitch_deg: f32,
    /// Auto-level rate when pitch input is neutral (radians per second)
    pub auto_level_speed: f32,
    /// Linear drag installed on the controlled body (per second)
    pub water_linear_damping: f32,
    /// Angular drag installed on the controlled body (per second)
    pub water_angular_damping: f32,
    /// Home-pose blend rate while reset is held (per second)
    pub reset_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            acceleration: 8.0,
            max_speed: 6.0,
            drag: 2.0,
            vertical_speed: 3.0,
            turn_speed: 1.5,
            pitch_speed: 1.0,
            max_pitch_deg: 60.0,
            auto_level_speed: 0.8,
            water_linear_damping: 0.5,
            water_angular_damping: 1.0,
            reset_speed: 2.0,
        }
    }
}

/// How translation input becomes motion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPolicy {
    /// Compose a commanded velocity each tick and assign it outright.
    ///
    /// Overwrites whatever velocity external contributors (current zones)
    /// produced last tick, so their influence only survives within the
    /// tick they are applied. Kept for the arcade feel of instant,
    /// drift-free control.
    VelocityTarget,
    /// Add thrust forces and let integration combine them.
    ///
    /// Only assigns velocity for idle-drag relaxation and the
    /// post-integration speed cap, so external contributors compose
    /// correctly. The default.
    ForceAdditive,
}

impl Default for MovementPolicy {
    fn default() -> Self {
        Self::ForceAdditive
    }
}

/// Orientation frame mapping input axes into world directions
///
/// Usually mirrors the follow camera; the embedding application updates
/// it before each tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceFrame {
    pub orientation: Quat,
}

impl ReferenceFrame {
    pub fn new(orientation: Quat) -> Self {
        Self { orientation }
    }

    /// World-space forward direction of the frame
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation.forward()
    }

    /// World-space right direction of the frame
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.orientation.right()
    }

    /// World-space up direction of the frame
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.orientation.up()
    }
}

/// Drives one rigid body from per-tick input snapshots
///
/// Holds the body by key, never by reference; a destroyed body turns
/// every operation into a no-op.
pub struct MovementController {
    body: BodyKey,
    frame: ReferenceFrame,
    policy: MovementPolicy,
    config: MovementConfig,
    /// Forward-speed accumulator (velocity-target policy only)
    current_speed: f32,
    home_position: Vec3,
    home_orientation: Quat,
}

impl MovementController {
    /// Create a controller for `body`, capturing its current pose as home
    ///
    /// Installs the config's water damping on the body. Fails if the body
    /// handle does not resolve: a controller without a body is a setup
    /// error, not a runtime condition.
    pub fn new(
        world: &mut PhysicsWorld,
        body: BodyKey,
        frame: ReferenceFrame,
        policy: MovementPolicy,
        config: MovementConfig,
    ) -> Result<Self, SetupError> {
        let b = world.get_body_mut(body).ok_or(SetupError::BodyNotFound)?;
        b.linear_damping = config.water_linear_damping;
        b.angular_damping = config.water_angular_damping;

        Ok(Self {
            home_position: b.position,
            home_orientation: b.orientation,
            body,
            frame,
            policy,
            config,
            current_speed: 0.0,
        })
    }

    /// The body this controller drives
    pub fn body(&self) -> BodyKey {
        self.body
    }

    /// The active translation policy
    pub fn policy(&self) -> MovementPolicy {
        self.policy
    }

    /// Forward-speed accumulator (meaningful under the velocity-target policy)
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Home position captured at construction
    pub fn home_position(&self) -> Vec3 {
        self.home_position
    }

    /// Home orientation captured at construction
    pub fn home_orientation(&self) -> Quat {
        self.home_orientation
    }

    /// Replace the input-mapping frame (typically once per tick, from the camera)
    pub fn set_reference_frame(&mut self, frame: ReferenceFrame) {
        self.frame = frame;
    }

    /// Run one fixed step of movement logic
    ///
    /// While reset is held, the body blends toward its home pose and all
    /// other movement input is ignored for the tick.
    pub fn advance(&mut self, world: &mut PhysicsWorld, input: &InputSnapshot, dt: f32) {
        if !world.contains_body(self.body) {
            return;
        }
        let input = input.clamped();

        if input.reset {
            self.return_home(world, dt);
            return;
        }

        match self.policy {
            MovementPolicy::VelocityTarget => self.advance_velocity_target(world, &input, dt),
            MovementPolicy::ForceAdditive => self.advance_force_additive(world, &input, dt),
        }
        self.advance_rotation(world, &input, dt);
    }

    /// Cap the body's speed after integration
    ///
    /// Part of the force-additive policy: thrust forces are unbounded, so
    /// the resulting speed is rescaled to `max_speed` (direction
    /// preserved) once integration has run. No-op under velocity-target,
    /// whose composed velocity is bounded by construction.
    pub fn limit_speed(&self, world: &mut PhysicsWorld) {
        if self.policy != MovementPolicy::ForceAdditive {
            return;
        }
        if let Some(v) = world.velocity(self.body) {
            let capped = v.clamp_length(self.config.max_speed);
            if capped != v {
                world.set_velocity(self.body, capped);
            }
        }
    }

    fn return_home(&mut self, world: &mut PhysicsWorld, dt: f32) {
        let t = (self.config.reset_speed * dt).clamp(0.0, 1.0);
        if let Some(body) = world.get_body_mut(self.body) {
            body.position = body.position.lerp(self.home_position, t);
            body.orientation = body.orientation.slerp(self.home_orientation, t);
            body.velocity = Vec3::ZERO;
            body.angular_velocity = Vec3::ZERO;
        }
        self.current_speed = 0.0;
    }

    fn advance_velocity_target(&mut self, world: &mut PhysicsWorld, input: &InputSnapshot, dt: f32) {
        if input.thrust.abs() > DEAD_ZONE {
            self.current_speed += self.config.acceleration * input.thrust * dt;
        } else {
            // Relax the accumulator toward rest
            let decay = self.config.drag * dt;
            if self.current_speed.abs() <= decay {
                self.current_speed = 0.0;
            } else {
                self.current_speed -= decay * self.current_speed.signum();
            }
        }
        self.current_speed = self.current_speed.clamp(
            -self.config.max_speed * REVERSE_SPEED_FACTOR,
            self.config.max_speed,
        );

        let velocity = self.frame.forward() * self.current_speed
            + self.frame.right() * (input.strafe * self.config.max_speed * STRAFE_FACTOR)
            + self.frame.up() * (input.lift * self.config.vertical_speed);
        world.set_velocity(self.body, velocity);
    }

    fn advance_force_additive(&mut self, world: &mut PhysicsWorld, input: &InputSnapshot, dt: f32) {
        let thrust_active = input.thrust.abs() > DEAD_ZONE;
        let strafe_active = input.strafe.abs() > DEAD_ZONE;

        if thrust_active {
            world.apply_force(
                self.body,
                self.frame.forward() * (input.thrust * self.config.acceleration),
                ForceMode::Force,
            );
        }
        if strafe_active {
            world.apply_force(
                self.body,
                self.frame.right() * (input.strafe * self.config.acceleration * STRAFE_FACTOR),
                ForceMode::Force,
            );
        }
        if input.lift.abs() > DEAD_ZONE {
            world.apply_force(
                self.body,
                self.frame.up() * (input.lift * self.config.vertical_speed),
                ForceMode::Force,
            );
        }

        if !thrust_active && !strafe_active {
            // Coast: bleed velocity toward rest
            if let Some(v) = world.velocity(self.body) {
                let t = (self.config.drag * dt).clamp(0.0, 1.0);
                world.set_velocity(self.body, v.lerp(Vec3::ZERO, t));
            }
        }
    }

    fn advance_rotation(&mut self, world: &mut PhysicsWorld, input: &InputSnapshot, dt: f32) {
        // Yaw about the body's own up axis
        if input.steer.abs() > DEAD_ZONE {
            world.rotate_local(self.body, Vec3::Y, input.steer * self.config.turn_speed * dt);
        }

        let Some(body) = world.get_body(self.body) else {
            return;
        };
        let orientation = body.orientation;
        let current_pitch = pitch_of(orientation);
        let max_pitch = self.config.max_pitch_deg.to_radians();

        if input.pitch.abs() > DEAD_ZONE {
            let delta = input.pitch * self.config.pitch_speed * dt;
            let rotation = self.pitch_rotation(delta);
            let candidate_pitch = pitch_of((rotation * orientation).normalized());
            // Stay inside the envelope, or allow any motion back toward level
            if candidate_pitch.abs() <= max_pitch || candidate_pitch.abs() < current_pitch.abs() {
                world.rotate(self.body, rotation);
            }
        } else if current_pitch.abs() > LEVEL_BAND_DEG.to_radians() {
            let delta = -current_pitch.signum()
                * (self.config.auto_level_speed * dt).min(current_pitch.abs());
            world.rotate(self.body, self.pitch_rotation(delta));
        }
    }

    /// Rotation pitching the nose up by `delta` radians, about the frame's right axis
    fn pitch_rotation(&self, delta: f32) -> Quat {
        Quat::from_axis_angle(self.frame.right(), -delta)
    }
}

/// Pitch angle of an orientation: angle of its forward vector above level
fn pitch_of(orientation: Quat) -> f32 {
    orientation.forward().y.clamp(-1.0, 1.0).asin()
}
