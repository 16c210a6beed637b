//! Undertow - underwater current simulation
//!
//! Headless demo: builds the configured scene, runs a scripted dive, and
//! reports pilot state. Rendering, audio, and device input are external
//! collaborators; cues are logged instead of played.

use undertow::config::AppConfig;
use undertow::scene::{build_session, BuiltScene};
use undertow::systems::FixedStepDriver;
use undertow_input::{Control, PilotController};
use undertow_sim::CueSink;

/// Cue sink that logs notifications instead of playing them
struct LogCues;

impl CueSink for LogCues {
    fn play_enter_cue(&mut self) {
        log::debug!("cue: current entry splash");
    }

    fn start_loop(&mut self) {
        log::debug!("cue: current ambience loop start");
    }

    fn stop_loop(&mut self) {
        log::debug!("cue: current ambience loop stop");
    }

    fn start_particles(&mut self) {
        log::debug!("cue: current particles start");
    }
}

fn main() {
    // Load configuration, fall back to defaults
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let BuiltScene { mut session, pilot } = build_session(&config)
        .unwrap_or_else(|e| panic!("Failed to build scene: {}", e));

    let mut controls = PilotController::new()
        .with_smoothing_half_life(config.input.smoothing_half_life)
        .with_smoothing(config.input.smoothing_enabled);
    let mut driver = FixedStepDriver::new(
        config.simulation.fixed_dt,
        config.simulation.max_frame_dt,
    );
    let mut cues = LogCues;

    let fixed_dt = config.simulation.fixed_dt;
    let total_ticks = (config.simulation.demo_seconds / fixed_dt).ceil() as u32;
    let report_every = (config.debug.report_interval / fixed_dt).max(1.0) as u32;

    // Scripted dive: thrust ahead for the first half, coast for a while,
    // then hold reset to come home.
    let thrust_until = total_ticks / 2;
    let reset_from = total_ticks * 4 / 5;

    log::info!(
        "Running {:.1}s of simulation at dt={}s",
        config.simulation.demo_seconds,
        fixed_dt
    );

    for tick in 0..total_ticks {
        if tick == 0 {
            controls.press(Control::Forward);
        } else if tick == thrust_until {
            controls.release(Control::Forward);
        } else if tick == reset_from {
            controls.press(Control::Reset);
        }

        let snapshot = controls.snapshot(fixed_dt);
        driver.advance(&mut session, &snapshot, fixed_dt, &mut cues);

        if tick % report_every == 0 {
            if let Some(body) = session.physics().get_body(pilot) {
                let occupied_zones = session
                    .zones()
                    .iter()
                    .filter(|z| z.is_occupant(pilot))
                    .count();
                log::info!(
                    "t={:5.2}s pos=({:6.2}, {:6.2}, {:6.2}) speed={:5.2} zones={}",
                    tick as f32 * fixed_dt,
                    body.position.x,
                    body.position.y,
                    body.position.z,
                    body.speed(),
                    occupied_zones
                );
            }
        }
    }

    if let Some(body) = session.physics().get_body(pilot) {
        log::info!(
            "Dive complete: final pos=({:.2}, {:.2}, {:.2})",
            body.position.x,
            body.position.y,
            body.position.z
        );
    }
}
