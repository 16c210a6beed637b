//! Fixed-timestep driver
//!
//! Accumulates raw frame time and subdivides it into fixed physics
//! ticks, so component logic always sees the same dt regardless of frame
//! rate. Raw frame time is capped to avoid the spiral of death after a
//! long stall.

use undertow_input::InputSnapshot;
use undertow_sim::{CueSink, Session};

/// Subdivides frame time into fixed session ticks
pub struct FixedStepDriver {
    fixed_dt: f32,
    max_frame_dt: f32,
    accumulator: f32,
}

impl FixedStepDriver {
    /// Create a driver with the given fixed timestep and frame-dt cap
    pub fn new(fixed_dt: f32, max_frame_dt: f32) -> Self {
        Self {
            fixed_dt,
            max_frame_dt,
            accumulator: 0.0,
        }
    }

    /// The fixed timestep handed to every tick
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Feed one frame of real time; returns how many ticks ran
    ///
    /// The same input snapshot is replayed into every tick of the frame.
    pub fn advance(
        &mut self,
        session: &mut Session,
        input: &InputSnapshot,
        frame_dt: f32,
        cues: &mut dyn CueSink,
    ) -> u32 {
        self.accumulator += frame_dt.min(self.max_frame_dt);

        let mut ticks = 0;
        while self.accumulator >= self.fixed_dt {
            session.tick(input, self.fixed_dt, cues);
            self.accumulator -= self.fixed_dt;
            ticks += 1;
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator (for render interpolation)
    pub fn alpha(&self) -> f32 {
        if self.fixed_dt > 0.0 {
            self.accumulator / self.fixed_dt
        } else {
            0.0
        }
    }
}
