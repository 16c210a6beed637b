//! Per-tick input snapshot
//!
//! The movement layer consumes one snapshot per fixed step. Whatever
//! produces it (gamepad, keyboard, script) is an external collaborator;
//! an absent device is simply the default snapshot.

/// Input axes and buttons for one fixed step
///
/// Axes are nominally in [-1, 1]; consumers clamp, so out-of-range values
/// from a misbehaving source are tolerated rather than rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Forward/backward axis (positive = forward)
    pub thrust: f32,
    /// Right/left strafe axis (positive = right)
    pub strafe: f32,
    /// Yaw axis (positive = turn right)
    pub steer: f32,
    /// Pitch axis (positive = nose up)
    pub pitch: f32,
    /// Rise/sink axis (positive = up)
    pub lift: f32,
    /// Return-to-home requested this tick
    pub reset: bool,
}

impl InputSnapshot {
    /// Return a copy with every axis clamped to [-1, 1]
    pub fn clamped(&self) -> Self {
        Self {
            thrust: self.thrust.clamp(-1.0, 1.0),
            strafe: self.strafe.clamp(-1.0, 1.0),
            steer: self.steer.clamp(-1.0, 1.0),
            pitch: self.pitch.clamp(-1.0, 1.0),
            lift: self.lift.clamp(-1.0, 1.0),
            reset: self.reset,
        }
    }
}
