//! Pilot controller for submarine-style input handling
//!
//! Controls (semantic, device mapping is up to the caller):
//! - Forward/Backward: main thrust
//! - StrafeLeft/StrafeRight: lateral thrust
//! - TurnLeft/TurnRight: yaw
//! - PitchUp/PitchDown: nose angle
//! - Rise/Sink: vertical thrust
//! - Reset: hold to return to the home pose

use crate::snapshot::InputSnapshot;

/// Semantic controls the pilot can hold down
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    PitchUp,
    PitchDown,
    Rise,
    Sink,
    Reset,
}

/// Folds held controls into per-tick axis snapshots
///
/// Axes derive from opposing control pairs; optional exponential smoothing
/// softens digital on/off edges into analog-feeling ramps.
pub struct PilotController {
    // Held-control state
    forward: bool,
    backward: bool,
    strafe_left: bool,
    strafe_right: bool,
    turn_left: bool,
    turn_right: bool,
    pitch_up: bool,
    pitch_down: bool,
    rise: bool,
    sink: bool,
    reset: bool,

    // Smoothed axis state
    smooth_thrust: f32,
    smooth_strafe: f32,
    smooth_steer: f32,
    smooth_pitch: f32,
    smooth_lift: f32,

    // Configuration
    pub smoothing_half_life: f32, // Exponential smoothing half-life in seconds
    pub smoothing_enabled: bool,
}

impl Default for PilotController {
    fn default() -> Self {
        Self::new()
    }
}

impl PilotController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            strafe_left: false,
            strafe_right: false,
            turn_left: false,
            turn_right: false,
            pitch_up: false,
            pitch_down: false,
            rise: false,
            sink: false,
            reset: false,

            smooth_thrust: 0.0,
            smooth_strafe: 0.0,
            smooth_steer: 0.0,
            smooth_pitch: 0.0,
            smooth_lift: 0.0,

            smoothing_half_life: 0.05, // 50ms half-life when enabled
            smoothing_enabled: false,  // Disabled by default for responsive feel
        }
    }

    /// Set the smoothing half-life in seconds
    pub fn with_smoothing_half_life(mut self, half_life: f32) -> Self {
        self.smoothing_half_life = half_life;
        self
    }

    /// Enable or disable axis smoothing
    pub fn with_smoothing(mut self, enabled: bool) -> Self {
        self.smoothing_enabled = enabled;
        self
    }

    /// Record a control press or release
    pub fn set_control(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Forward => self.forward = pressed,
            Control::Backward => self.backward = pressed,
            Control::StrafeLeft => self.strafe_left = pressed,
            Control::StrafeRight => self.strafe_right = pressed,
            Control::TurnLeft => self.turn_left = pressed,
            Control::TurnRight => self.turn_right = pressed,
            Control::PitchUp => self.pitch_up = pressed,
            Control::PitchDown => self.pitch_down = pressed,
            Control::Rise => self.rise = pressed,
            Control::Sink => self.sink = pressed,
            Control::Reset => self.reset = pressed,
        }
    }

    /// Record a control press
    pub fn press(&mut self, control: Control) {
        self.set_control(control, true);
    }

    /// Record a control release
    pub fn release(&mut self, control: Control) {
        self.set_control(control, false);
    }

    /// Produce the snapshot for this tick
    ///
    /// With smoothing enabled, each axis decays exponentially toward its
    /// raw value: new = old * factor + raw * (1 - factor), with
    /// factor = 2^(-dt / half_life).
    pub fn snapshot(&mut self, dt: f32) -> InputSnapshot {
        let raw_thrust = (self.forward as i32 - self.backward as i32) as f32;
        let raw_strafe = (self.strafe_right as i32 - self.strafe_left as i32) as f32;
        let raw_steer = (self.turn_right as i32 - self.turn_left as i32) as f32;
        let raw_pitch = (self.pitch_up as i32 - self.pitch_down as i32) as f32;
        let raw_lift = (self.rise as i32 - self.sink as i32) as f32;

        let (thrust, strafe, steer, pitch, lift) =
            if self.smoothing_enabled && dt > 0.0 && self.smoothing_half_life > 0.0 {
                let factor = (-dt / self.smoothing_half_life).exp2();
                self.smooth_thrust = self.smooth_thrust * factor + raw_thrust * (1.0 - factor);
                self.smooth_strafe = self.smooth_strafe * factor + raw_strafe * (1.0 - factor);
                self.smooth_steer = self.smooth_steer * factor + raw_steer * (1.0 - factor);
                self.smooth_pitch = self.smooth_pitch * factor + raw_pitch * (1.0 - factor);
                self.smooth_lift = self.smooth_lift * factor + raw_lift * (1.0 - factor);
                (
                    self.smooth_thrust,
                    self.smooth_strafe,
                    self.smooth_steer,
                    self.smooth_pitch,
                    self.smooth_lift,
                )
            } else {
                self.smooth_thrust = raw_thrust;
                self.smooth_strafe = raw_strafe;
                self.smooth_steer = raw_steer;
                self.smooth_pitch = raw_pitch;
                self.smooth_lift = raw_lift;
                (raw_thrust, raw_strafe, raw_steer, raw_pitch, raw_lift)
            };

        InputSnapshot {
            thrust,
            strafe,
            steer,
            pitch,
            lift,
            reset: self.reset,
        }
        .clamped()
    }
}
