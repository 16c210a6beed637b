//! Fire-and-forget cue notifications
//!
//! Current zones signal audio and particle collaborators through this
//! seam. Nothing in the core consumes a return value; implementations
//! are free to ignore any cue.

/// Receiver for zone presentation cues
///
/// All methods default to no-ops so implementations only override the
/// cues they care about.
pub trait CueSink {
    /// One-shot cue when a body enters a zone
    fn play_enter_cue(&mut self) {}

    /// Start the zone's looping ambience (first occupant arrived)
    fn start_loop(&mut self) {}

    /// Stop the zone's looping ambience (last occupant left)
    fn stop_loop(&mut self) {}

    /// Start the zone's particle effect for a newly entered body
    fn start_particles(&mut self) {}
}

/// Cue sink that discards every notification
pub struct NullCues;

impl CueSink for NullCues {}

/// Cue sink that counts notifications, for tests and diagnostics
#[derive(Debug, Default)]
pub struct CueCounter {
    pub enter_cues: usize,
    pub loop_starts: usize,
    pub loop_stops: usize,
    pub particle_starts: usize,
}

impl CueSink for CueCounter {
    fn play_enter_cue(&mut self) {
        self.enter_cues += 1;
    }

    fn start_loop(&mut self) {
        self.loop_starts += 1;
    }

    fn stop_loop(&mut self) {
        self.loop_stops += 1;
    }

    fn start_particles(&mut self) {
        self.particle_starts += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_cues_accepts_everything() {
        let mut cues = NullCues;
        cues.play_enter_cue();
        cues.start_loop();
        cues.stop_loop();
        cues.start_particles();
    }

    #[test]
    fn test_counter_counts() {
        let mut cues = CueCounter::default();
        cues.play_enter_cue();
        cues.play_enter_cue();
        cues.start_loop();
        assert_eq!(cues.enter_cues, 2);
        assert_eq!(cues.loop_starts, 1);
        assert_eq!(cues.loop_stops, 0);
    }
}
